use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures talking to the browser. None of these escape the viewport's
/// public entry points; they are logged and the operation is skipped.
#[derive(Debug, Error)]
pub enum VizError {
	#[error("no global window")]
	MissingWindow,
	#[error("no document on window")]
	MissingDocument,
	#[error("no <body> element")]
	MissingBody,
	#[error("2d canvas context unavailable")]
	MissingContext,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for VizError {
	fn from(value: JsValue) -> Self {
		VizError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub type VizResult<T> = Result<T, VizError>;
