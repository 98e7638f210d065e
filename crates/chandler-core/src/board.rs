//! Board schema and raw item shapes as returned by the board platform.
//!
//! Every field decodes leniently: a missing or `null` field becomes its
//! default rather than a decode error, so a partially populated response
//! still yields usable values.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse a raw identifier, trimming whitespace. Blank input is `None`.
            pub fn parse(raw: &str) -> Option<Self> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self(trimmed.to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a board on the platform.
    BoardId
);

opaque_id!(
    /// Identifier of a single item (row) on a board.
    ItemId
);

/// Deserialize `null` the same way as an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// How a column stores its value, derived from the platform's type tag.
///
/// Only `Text` stores a plain string. Every other kind takes the
/// `{"labels": [...]}` form when written with a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    Text,
    Status,
    Dropdown,
    Date,
    #[default]
    Other,
}

impl ColumnKind {
    /// Map the platform's type tag (case-insensitive) onto a kind.
    pub fn from_type(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "status" | "color" => Self::Status,
            "dropdown" => Self::Dropdown,
            "date" => Self::Date,
            _ => Self::Other,
        }
    }

    /// Encode a single label for a column of this kind.
    pub fn encode_label(self, label: &str) -> Value {
        match self {
            Self::Text => Value::String(label.to_string()),
            Self::Status | Self::Dropdown | Self::Date | Self::Other => {
                json!({ "labels": [label] })
            }
        }
    }

    /// The value that clears a column of this kind.
    pub fn empty_value(self) -> Value {
        match self {
            Self::Text => Value::String(String::new()),
            Self::Status | Self::Dropdown | Self::Date | Self::Other => {
                json!({ "labels": [] })
            }
        }
    }
}

/// A board column as described by the board's schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub column_type: String,
}

impl Column {
    pub fn new(id: &str, title: &str, column_type: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            column_type: column_type.to_string(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        ColumnKind::from_type(&self.column_type)
    }
}

/// One cell of an item: the column it belongs to plus its rendered text
/// and raw JSON value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub column_type: String,
}

impl ColumnValue {
    /// A text-only cell, as the platform echoes it back on read.
    pub fn text(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// A board item together with its cell values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_values: Vec<ColumnValue>,
}
