//! POST body encoding: form values or JSON.

use serde::Serialize;

use super::Values;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Values),
    /// Sent as `application/json`.
    Json(serde_json::Value),
}

impl Body {
    /// Serializes any `Serialize` value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Body::Json)
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Form(_) => FORM_CONTENT_TYPE,
            Body::Json(_) => JSON_CONTENT_TYPE,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Body::Form(values) => Ok(values.encode().into_bytes()),
            Body::Json(value) => serde_json::to_vec(value),
        }
    }
}

impl From<Values> for Body {
    fn from(values: Values) -> Self {
        Body::Form(values)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}
