use leptos::prelude::*;

use super::filter::ThresholdRange;

/// Range input for the edge-weight threshold, with the current value as a bold label.
#[component]
pub fn ThresholdSlider(range: ThresholdRange, threshold: RwSignal<u32>) -> impl IntoView {
	let on_input = move |ev: leptos::ev::Event| {
		if let Ok(value) = event_target_value(&ev).parse::<u32>() {
			threshold.set(range.clamp(value));
		}
	};

	view! {
		<p class="threshold-slider" style="text-align: center; font-size: 60%;">
			"Minimum interaction weight "
			<label for="threshold" style="font-weight: bold; font-size: 120%;">
				{move || threshold.get().to_string()}
			</label>
			<input
				type="range"
				id="threshold"
				min=range.min.to_string()
				max=range.max.to_string()
				step="1"
				prop:value=move || threshold.get().to_string()
				on:input=on_input
				style="width: 50%; display: block; margin: 0 auto;"
			/>
		</p>
	}
}
