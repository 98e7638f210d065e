//! Board platform collaborator: the operations the order layer needs, and an
//! HTTP GraphQL client implementing them.

mod error;
pub mod graphql;

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use chandler_core::{BoardId, Column, ColumnValuePayload, Item, ItemId};

pub use error::ApiError;
pub use graphql::ItemRef;

#[cfg(feature = "http")]
pub use http::MondayClient;

/// A board's schema together with one page of its items.
#[derive(Debug, Clone, Default)]
pub struct BoardItems {
    pub columns: Vec<Column>,
    pub items: Vec<Item>,
}

/// Reads and writes against the board platform.
///
/// Callers receive an explicitly constructed implementation by reference;
/// tests substitute an in-memory one.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Column schema of a board. An unknown board yields no columns.
    async fn columns(&self, board: &BoardId) -> Result<Vec<Column>, ApiError>;

    /// Columns plus the first `limit` items of a board.
    async fn items(&self, board: &BoardId, limit: u32) -> Result<BoardItems, ApiError>;

    async fn create_item(
        &self,
        board: &BoardId,
        name: &str,
        values: &ColumnValuePayload,
    ) -> Result<Option<ItemRef>, ApiError>;

    async fn change_column_values(
        &self,
        board: &BoardId,
        item: &ItemId,
        values: &ColumnValuePayload,
    ) -> Result<Option<ItemRef>, ApiError>;

    async fn delete_item(&self, item: &ItemId) -> Result<Option<ItemRef>, ApiError>;
}
