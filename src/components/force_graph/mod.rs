mod adjacency;
mod component;
mod config;
mod error;
mod filter;
mod legend;
mod loader;
mod render;
mod scale;
mod simulation;
mod slider;
mod state;
mod types;

pub use component::ForceGraphView;
pub use config::GraphConfig;
pub use loader::fetch_graph;
