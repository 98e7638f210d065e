//! In-memory board platform that records every call.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chandler_api::{ApiError, BoardApi, BoardItems, ItemRef};
use chandler_core::{BoardId, Column, ColumnValuePayload, Item, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Columns(String),
    Items(String, u32),
    Create {
        board: String,
        name: String,
        values: ColumnValuePayload,
    },
    Update {
        board: String,
        item: String,
        values: ColumnValuePayload,
    },
    Delete(String),
}

#[derive(Default)]
pub struct FakeBoardApi {
    columns: HashMap<String, Vec<Column>>,
    items: HashMap<String, Vec<Item>>,
    /// Zero-based index of the create call that fails.
    fail_create_at: Option<usize>,
    fail_reads: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeBoardApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, board: &str, columns: Vec<Column>) -> Self {
        self.columns.insert(board.to_string(), columns);
        self
    }

    pub fn with_items(mut self, board: &str, items: Vec<Item>) -> Self {
        self.items.insert(board.to_string(), items);
        self
    }

    pub fn failing_create_at(mut self, index: usize) -> Self {
        self.fail_create_at = Some(index);
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<(String, String, ColumnValuePayload)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create { board, name, values } => Some((board, name, values)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn read_error() -> ApiError {
        ApiError::Server {
            status: 503,
            body: "unavailable".into(),
        }
    }
}

#[async_trait]
impl BoardApi for FakeBoardApi {
    async fn columns(&self, board: &BoardId) -> Result<Vec<Column>, ApiError> {
        self.record(Call::Columns(board.to_string()));
        if self.fail_reads {
            return Err(Self::read_error());
        }
        Ok(self.columns.get(board.as_str()).cloned().unwrap_or_default())
    }

    async fn items(&self, board: &BoardId, limit: u32) -> Result<BoardItems, ApiError> {
        self.record(Call::Items(board.to_string(), limit));
        if self.fail_reads {
            return Err(Self::read_error());
        }
        Ok(BoardItems {
            columns: self.columns.get(board.as_str()).cloned().unwrap_or_default(),
            items: self.items.get(board.as_str()).cloned().unwrap_or_default(),
        })
    }

    async fn create_item(
        &self,
        board: &BoardId,
        name: &str,
        values: &ColumnValuePayload,
    ) -> Result<Option<ItemRef>, ApiError> {
        let index = self.creates().len();
        self.record(Call::Create {
            board: board.to_string(),
            name: name.to_string(),
            values: values.clone(),
        });
        if self.fail_create_at == Some(index) {
            return Err(ApiError::GraphQl {
                message: "create rejected".into(),
                column: None,
            });
        }
        Ok(Some(ItemRef {
            id: format!("item-{}", index + 1),
        }))
    }

    async fn change_column_values(
        &self,
        board: &BoardId,
        item: &ItemId,
        values: &ColumnValuePayload,
    ) -> Result<Option<ItemRef>, ApiError> {
        self.record(Call::Update {
            board: board.to_string(),
            item: item.to_string(),
            values: values.clone(),
        });
        Ok(Some(ItemRef {
            id: item.to_string(),
        }))
    }

    async fn delete_item(&self, item: &ItemId) -> Result<Option<ItemRef>, ApiError> {
        self.record(Call::Delete(item.to_string()));
        Ok(Some(ItemRef {
            id: item.to_string(),
        }))
    }
}

pub fn board(id: &str) -> BoardId {
    BoardId::parse(id).unwrap()
}

pub fn order_columns() -> Vec<Column> {
    vec![
        Column::new("customer", "Customer name", "text"),
        Column::new("order_no", "Order Number", "text"),
        Column::new("first", "First name", "text"),
        Column::new("last", "Last name", "text"),
        Column::new("c1", "Candle 1", "dropdown"),
        Column::new("c2", "Candle 2", "dropdown"),
        Column::new("c3", "Candle 3", "text"),
        Column::new("inscription", "Inscription", "long_text"),
        Column::new("created", "Created Date", "date"),
        Column::new("status", "Status", "status"),
    ]
}
