//! Auxiliary boards: selectable candles and CRM customers.

use chandler_api::{BoardApi, ItemRef};
use chandler_core::order::full_name;
use chandler_core::{
    BoardId, ColumnValuePayload, Customer, OptionValue, TitleIndex, id_to_title, project_customer,
};
use serde_json::Value;
use tracing::info;

use crate::{BoardConfig, ORDER_PAGE_SIZE, OrderError};

/// Items fetched from the candles board.
pub const OPTIONS_PAGE_SIZE: u32 = 200;

/// Item name used for a CRM contact with no name at all.
const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Where the candle choices came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsSource {
    /// No candles board configured.
    NotConfigured,
    /// The board exists but has no named items.
    Empty,
    Board(Vec<OptionValue>),
}

impl OptionsSource {
    pub fn options(&self) -> &[OptionValue] {
        match self {
            Self::Board(options) => options,
            Self::NotConfigured | Self::Empty => &[],
        }
    }
}

/// Customers read from the CRM board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerList {
    NotConfigured,
    Loaded(Vec<Customer>),
}

/// Candle choices: the names of the candles board's items.
pub async fn candle_options<A: BoardApi + ?Sized>(
    api: &A,
    config: &BoardConfig,
) -> Result<OptionsSource, OrderError> {
    let Some(board) = &config.candles_board else {
        return Ok(OptionsSource::NotConfigured);
    };
    let page = api.items(board, OPTIONS_PAGE_SIZE).await?;
    let options: Vec<OptionValue> = page
        .items
        .iter()
        .filter(|item| !item.name.trim().is_empty())
        .map(|item| OptionValue::new(&item.name))
        .collect();
    info!(board = %board, count = options.len(), "loaded candle options");
    if options.is_empty() {
        Ok(OptionsSource::Empty)
    } else {
        Ok(OptionsSource::Board(options))
    }
}

/// Every contact on the CRM board, projected into customers.
pub async fn list_customers<A: BoardApi + ?Sized>(
    api: &A,
    config: &BoardConfig,
) -> Result<CustomerList, OrderError> {
    let Some(board) = &config.crm_board else {
        return Ok(CustomerList::NotConfigured);
    };
    let page = api.items(board, ORDER_PAGE_SIZE).await?;
    let titles = id_to_title(&page.columns);
    let customers: Vec<Customer> = page
        .items
        .iter()
        .map(|item| project_customer(item, &titles))
        .collect();
    info!(board = %board, count = customers.len(), "loaded customers");
    Ok(CustomerList::Loaded(customers))
}

/// Add a contact to the CRM board.
///
/// The full name goes into a "Contact" column and the item name; first and
/// last names go into their own columns when the board has them.
pub async fn add_customer<A: BoardApi + ?Sized>(
    api: &A,
    crm_board: &BoardId,
    first_name: &str,
    last_name: &str,
) -> Result<Option<ItemRef>, OrderError> {
    let columns = api.columns(crm_board).await?;
    let index = TitleIndex::from_columns(&columns);

    let mut full = full_name(first_name, last_name);
    if full.is_empty() {
        full = UNKNOWN_CUSTOMER.to_string();
    }

    let mut values = ColumnValuePayload::default();
    if let Some(col) = index.find(&["Contact"]) {
        values.insert(&col.id, Value::String(full.clone()));
    }
    let names = [
        (&["First Name", "First name"], first_name.trim()),
        (&["Last Name", "Last name"], last_name.trim()),
    ];
    for (titles, value) in names {
        if value.is_empty() {
            continue;
        }
        if let Some(col) = index.find(titles) {
            values.insert(&col.id, Value::String(value.to_string()));
        }
    }

    info!(board = %crm_board, columns = values.len(), "adding customer to CRM");
    Ok(api.create_item(crm_board, &full, &values).await?)
}
