use leptos::prelude::*;
use log::error;
use wasm_bindgen_futures::spawn_local;

use crate::components::force_graph::{AuthorGraphCanvas, NetworkData};
use crate::net;

/// Relative path of the network description fetched at startup.
const NETWORK_URL: &str = "author_network.json";

/// Visualization page: fetches the network once, then hands it to the
/// canvas. On fetch or parse failure nothing is rendered and a single
/// diagnostic is logged.
#[component]
pub fn Home() -> impl IntoView {
	let data = RwSignal::new(None::<NetworkData>);

	spawn_local(async move {
		match net::fetch_network(NETWORK_URL).await {
			Ok(network) => data.set(Some(network)),
			Err(err) => error!("failed to load {NETWORK_URL}: {err}"),
		}
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
				<h1>"Author Collaboration Network"</h1>
				{move || {
					data.get()
						.map(|network| {
							let network = Signal::derive(move || network.clone());
							view! { <AuthorGraphCanvas data=network /> }
						})
				}}
			</div>
		</ErrorBoundary>
	}
}
