//! GraphQL documents and response shapes for the board platform.
//!
//! Every response decodes through [`GraphQlResponse`]: the first reported
//! error becomes an [`ApiError::GraphQl`], otherwise `data` is handed back
//! with absent fields already defaulted.

use chandler_core::board::null_as_default;
use chandler_core::{Column, Item};
use serde::Deserialize;

use crate::ApiError;

pub const COLUMNS_QUERY: &str = r#"
query ($boardId: ID!) {
  boards(ids: [$boardId]) {
    columns { id title type }
  }
}"#;

pub const ITEMS_QUERY: &str = r#"
query ($boardId: ID!, $limit: Int!) {
  boards(ids: [$boardId]) {
    columns { id title type }
    items_page(limit: $limit) {
      items {
        id
        name
        column_values { id text value type }
      }
    }
  }
}"#;

pub const CREATE_ITEM_MUTATION: &str = r#"
mutation ($boardId: ID!, $itemName: String!, $columnValues: JSON!) {
  create_item(board_id: $boardId, item_name: $itemName, column_values: $columnValues) {
    id
  }
}"#;

pub const CHANGE_COLUMN_VALUES_MUTATION: &str = r#"
mutation ($boardId: ID!, $itemId: ID!, $columnValues: JSON!) {
  change_multiple_column_values(board_id: $boardId, item_id: $itemId, column_values: $columnValues) {
    id
  }
}"#;

pub const DELETE_ITEM_MUTATION: &str = r#"
mutation ($itemId: ID!) {
  delete_item(item_id: $itemId) {
    id
  }
}"#;

/// Standard GraphQL envelope, plus the platform's top-level error fields.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<GraphQlErrorEntry>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_data: Option<ErrorData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GraphQlErrorEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error_data: Option<ErrorData>,
}

/// Structured error detail; names the column a rejected value was for.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorData {
    #[serde(default)]
    pub column_name: Option<String>,
    #[serde(default)]
    pub column_id: Option<String>,
}

impl ErrorData {
    fn column(self) -> Option<String> {
        self.column_name.or(self.column_id)
    }
}

impl<T> GraphQlResponse<T> {
    /// Split the envelope into data or the first error.
    pub fn into_data(self) -> Result<Option<T>, ApiError> {
        if let Some(first) = self.errors.into_iter().next() {
            let column = first
                .extensions
                .and_then(|ext| ext.error_data)
                .and_then(ErrorData::column);
            return Err(ApiError::GraphQl {
                message: non_empty_message(first.message),
                column,
            });
        }
        if let Some(message) = self.error_message {
            return Err(ApiError::GraphQl {
                message: non_empty_message(message),
                column: self.error_data.and_then(ErrorData::column),
            });
        }
        Ok(self.data)
    }
}

fn non_empty_message(message: String) -> String {
    if message.trim().is_empty() {
        "request failed without an error message".to_string()
    } else {
        message
    }
}

/// Handle returned by item mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub boards: Vec<Option<BoardData>>,
}

impl BoardsData {
    /// The single requested board, or an empty board when none came back.
    pub fn first_board(data: Option<Self>) -> BoardData {
        data.and_then(|d| d.boards.into_iter().flatten().next())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<Column>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items_page: ItemsPage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemData {
    #[serde(default)]
    pub create_item: Option<ItemRef>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeColumnValuesData {
    #[serde(default)]
    pub change_multiple_column_values: Option<ItemRef>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemData {
    #[serde(default)]
    pub delete_item: Option<ItemRef>,
}
