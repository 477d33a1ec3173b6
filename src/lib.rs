//! Interactive force-directed view of the Game of Thrones character network.
//!
//! The app is rendered client-side: [`App`] sets up document metadata and the
//! router, and the home page fetches the network and hands it to the graph view.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

const GRAPH_CSS: &str = r#"
body { font-family: sans-serif; margin: 1rem; }
.graph-surface { border: 1px solid #ddd; }
.node circle { cursor: pointer; }
#legend { margin-top: 0.5rem; }
"#;

/// Install the console logger and panic hook. Call once before mounting.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Root component: document head plus the network page and a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Game of Thrones Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content="Force-directed graph of character interactions" />
		<Style>{GRAPH_CSS}</Style>

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
