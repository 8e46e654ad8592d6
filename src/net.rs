//! One-shot fetch of the network data file.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::components::force_graph::NetworkData;

/// Why the network file could not be loaded. The caller logs this once
/// and renders nothing; there is no retry.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("request failed: {0}")]
	Request(String),
	#[error("server answered {0}")]
	Status(u16),
	#[error("could not read response body: {0}")]
	Body(String),
	#[error("malformed network data: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Fetch and parse the network description from a relative URL.
pub async fn fetch_network(url: &str) -> Result<NetworkData, LoadError> {
	let window = web_sys::window().ok_or_else(|| LoadError::Request("no window".to_owned()))?;
	let resp_value = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|err| LoadError::Request(describe(err)))?;
	let resp: Response = resp_value
		.dyn_into()
		.map_err(|err| LoadError::Request(describe(err)))?;
	if !resp.ok() {
		return Err(LoadError::Status(resp.status()));
	}

	let body = JsFuture::from(resp.text().map_err(|err| LoadError::Body(describe(err)))?)
		.await
		.map_err(|err| LoadError::Body(describe(err)))?;
	let body = body.as_string().unwrap_or_default();
	Ok(serde_json::from_str(&body)?)
}

fn describe(err: JsValue) -> String {
	err.dyn_into::<js_sys::Error>()
		.map(|err| String::from(err.message()))
		.unwrap_or_else(|err| format!("{err:?}"))
}
