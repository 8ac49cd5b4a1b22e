use std::fmt;

use wasm_bindgen::JsValue;

/// Failures while mounting a slider into the DOM.
#[derive(Debug)]
pub enum WebSliderError {
    NoWindow,
    NoDocument,
    /// Creating or inserting a DOM node failed.
    Dom(JsValue),
    /// `addEventListener` threw for `event_type`.
    Listener {
        event_type: &'static str,
        source: JsValue,
    },
    /// A style property was rejected.
    Style {
        property: &'static str,
        source: JsValue,
    },
}

impl fmt::Display for WebSliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebSliderError::NoWindow => write!(f, "no global window exists"),
            WebSliderError::NoDocument => write!(f, "window has no document"),
            WebSliderError::Dom(source) => write!(f, "DOM operation failed: {source:?}"),
            WebSliderError::Listener { event_type, source } => {
                write!(f, "failed to listen for '{event_type}': {source:?}")
            }
            WebSliderError::Style { property, source } => {
                write!(f, "failed to set style '{property}': {source:?}")
            }
        }
    }
}

impl std::error::Error for WebSliderError {}

impl From<JsValue> for WebSliderError {
    fn from(source: JsValue) -> Self {
        WebSliderError::Dom(source)
    }
}

impl From<WebSliderError> for JsValue {
    fn from(err: WebSliderError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
