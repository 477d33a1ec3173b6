use js_sys::Error as JsError;
use log::{error, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::error::GraphError;
use super::types::{GraphData, GraphDocument};

/// Fetch and resolve the graph document at `url`. Any failure is fatal to the view.
pub async fn fetch_graph(url: &str) -> Result<GraphData, GraphError> {
	let result = async {
		let text = fetch_text(url).await?;
		parse_graph(&text)
	}
	.await;

	match &result {
		Ok(data) => info!(
			"Loaded {} nodes and {} links from {} ({} links skipped)",
			data.nodes.len(),
			data.links.len(),
			url,
			data.skipped_links
		),
		Err(e) => error!("{}", e),
	}
	result
}

pub fn parse_graph(text: &str) -> Result<GraphData, GraphError> {
	let doc: GraphDocument = serde_json::from_str(text)?;
	Ok(GraphData::from_document(doc))
}

async fn fetch_text(url: &str) -> Result<String, GraphError> {
	let fetch_err = |value: JsValue| GraphError::Fetch {
		url: url.to_string(),
		message: js_message(&value),
	};

	let window = web_sys::window().ok_or_else(|| GraphError::Fetch {
		url: url.to_string(),
		message: "no window available".into(),
	})?;
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(fetch_err)?
		.dyn_into()
		.map_err(fetch_err)?;

	if !response.ok() {
		return Err(GraphError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}

	let body = JsFuture::from(response.text().map_err(fetch_err)?)
		.await
		.map_err(fetch_err)?;
	body.as_string().ok_or_else(|| GraphError::Fetch {
		url: url.to_string(),
		message: "response body is not text".into(),
	})
}

fn js_message(value: &JsValue) -> String {
	value
		.dyn_ref::<JsError>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{:?}", value))
}
