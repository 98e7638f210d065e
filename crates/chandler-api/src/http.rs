//! HTTP GraphQL client for the monday.com platform API.

use async_trait::async_trait;
use chandler_core::{BoardId, Column, ColumnValuePayload, ItemId};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::graphql::{
    BoardsData, CHANGE_COLUMN_VALUES_MUTATION, COLUMNS_QUERY, CREATE_ITEM_MUTATION,
    ChangeColumnValuesData, CreateItemData, DELETE_ITEM_MUTATION, DeleteItemData,
    GraphQlResponse, ITEMS_QUERY,
};
use crate::{ApiError, BoardApi, BoardItems, ItemRef};

pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// API version pinned in the `API-Version` header.
pub const API_VERSION: &str = "2024-10";

/// Item name used when the caller supplies a blank one.
const DEFAULT_ITEM_NAME: &str = "New item";

/// GraphQL client for the board platform.
pub struct MondayClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl MondayClient {
    /// Create a client for `api_url` authenticating with `token`.
    pub fn new(api_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Send one GraphQL document and decode its `data`.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Option<T>, ApiError> {
        debug!(url = %self.api_url, %variables, "sending GraphQL request");
        let resp = self
            .client
            .post(&self.api_url)
            .header(AUTHORIZATION, self.token.as_str())
            .header("API-Version", API_VERSION)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            // The platform reports some GraphQL errors with a non-2xx status.
            if let Ok(envelope) = serde_json::from_str::<GraphQlResponse<Value>>(&body) {
                envelope.into_data()?;
            }
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<GraphQlResponse<T>>(&body)?.into_data()
    }
}

fn item_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_ITEM_NAME
    } else {
        trimmed
    }
}

#[async_trait]
impl BoardApi for MondayClient {
    async fn columns(&self, board: &BoardId) -> Result<Vec<Column>, ApiError> {
        let data: Option<BoardsData> = self
            .execute(COLUMNS_QUERY, json!({ "boardId": board.as_str() }))
            .await?;
        let columns = BoardsData::first_board(data).columns;
        info!(board = %board, count = columns.len(), "fetched board columns");
        Ok(columns)
    }

    async fn items(&self, board: &BoardId, limit: u32) -> Result<BoardItems, ApiError> {
        let data: Option<BoardsData> = self
            .execute(
                ITEMS_QUERY,
                json!({ "boardId": board.as_str(), "limit": limit }),
            )
            .await?;
        let board_data = BoardsData::first_board(data);
        info!(
            board = %board,
            count = board_data.items_page.items.len(),
            "fetched board items"
        );
        Ok(BoardItems {
            columns: board_data.columns,
            items: board_data.items_page.items,
        })
    }

    async fn create_item(
        &self,
        board: &BoardId,
        name: &str,
        values: &ColumnValuePayload,
    ) -> Result<Option<ItemRef>, ApiError> {
        let data: Option<CreateItemData> = self
            .execute(
                CREATE_ITEM_MUTATION,
                json!({
                    "boardId": board.as_str(),
                    "itemName": item_name(name),
                    "columnValues": values.to_json_string(),
                }),
            )
            .await?;
        let created = data.and_then(|d| d.create_item);
        info!(board = %board, item = ?created.as_ref().map(|i| &i.id), "created item");
        Ok(created)
    }

    async fn change_column_values(
        &self,
        board: &BoardId,
        item: &ItemId,
        values: &ColumnValuePayload,
    ) -> Result<Option<ItemRef>, ApiError> {
        let data: Option<ChangeColumnValuesData> = self
            .execute(
                CHANGE_COLUMN_VALUES_MUTATION,
                json!({
                    "boardId": board.as_str(),
                    "itemId": item.as_str(),
                    "columnValues": values.to_json_string(),
                }),
            )
            .await?;
        info!(board = %board, item = %item, columns = values.len(), "updated item");
        Ok(data.and_then(|d| d.change_multiple_column_values))
    }

    async fn delete_item(&self, item: &ItemId) -> Result<Option<ItemRef>, ApiError> {
        let data: Option<DeleteItemData> = self
            .execute(DELETE_ITEM_MUTATION, json!({ "itemId": item.as_str() }))
            .await?;
        info!(item = %item, "deleted item");
        Ok(data.and_then(|d| d.delete_item))
    }
}
