use thiserror::Error;

/// Fatal failures while loading the graph document.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
	#[error("Failed to fetch graph document from {url}: {message}")]
	Fetch { url: String, message: String },
	#[error("Graph document request to {url} returned HTTP {status}")]
	Status { url: String, status: u16 },
	#[error("Malformed graph document: {0}")]
	Parse(String),
}

impl From<serde_json::Error> for GraphError {
	fn from(err: serde_json::Error) -> Self {
		GraphError::Parse(err.to_string())
	}
}
