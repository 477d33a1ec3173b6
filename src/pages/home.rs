use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::force_graph::{ForceGraphView, GraphConfig, fetch_graph};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// `?data=<url>` points the view at another document.
	let query = use_query_map();
	let config = Memo::new(move |_| GraphConfig::with_data_url(query.with(|q| q.get("data"))));

	let graph = LocalResource::new(move || {
		let url = config.with(|c| c.data_url.clone());
		async move { fetch_graph(&url).await }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="graph-page">
				<h1>"Game of Thrones Character Network"</h1>
				<p class="subtitle">
					"Click a character to show their ego network. Drag nodes to reposition. Scroll to zoom. Drag background to pan."
				</p>
				<Suspense fallback=|| view! { <p class="loading">"Loading network..."</p> }>
					{move || {
						graph
							.get()
							.map(|result| {
								result
									.map(|data| {
										view! { <ForceGraphView data=data config=config.get_untracked() /> }
									})
							})
					}}
				</Suspense>
			</div>
		</ErrorBoundary>
	}
}
