use crate::core::domain::value_object::serde_helpers::null_as_default;
use serde::{Deserialize, Serialize};

/// A text annotation drawn next to a node or a link endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Label {
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
    /// SVG style string (e.g. `"font-family: TypeWriter;font-size: 10.0;fill: #000000;"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: i32,
}

impl Label {
    pub fn new(text: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            ..Default::default()
        }
    }
}
