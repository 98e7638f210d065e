//! Read projection: flat column text back into named order and customer fields.

use std::collections::HashMap;

use crate::board::{Column, Item};
use crate::order::{Customer, OrderRecord, full_name};

/// Fallback display name for a contact with no usable name at all.
pub const UNNAMED: &str = "Unnamed";

/// Column id → title for a board's columns.
pub fn id_to_title(columns: &[Column]) -> HashMap<String, String> {
    columns
        .iter()
        .filter(|c| !c.id.is_empty())
        .map(|c| (c.id.clone(), c.title.clone()))
        .collect()
}

/// Title → trimmed text for one item. Unknown columns are keyed by their id,
/// `null` text reads as "", and a repeated title keeps the last value.
#[derive(Debug, Default)]
pub struct ColumnTextMap {
    by_title: HashMap<String, String>,
}

impl ColumnTextMap {
    pub fn new(item: &Item, id_to_title: &HashMap<String, String>) -> Self {
        let mut by_title = HashMap::with_capacity(item.column_values.len());
        for cv in &item.column_values {
            let title = id_to_title.get(&cv.id).unwrap_or(&cv.id);
            if title.is_empty() {
                continue;
            }
            let text = cv.text.as_deref().unwrap_or_default().trim();
            by_title.insert(title.clone(), text.to_string());
        }
        Self { by_title }
    }

    /// Text of the first title present, in the order given.
    pub fn first(&self, titles: &[&str]) -> Option<&str> {
        titles
            .iter()
            .find_map(|t| self.by_title.get(*t))
            .map(String::as_str)
    }

    /// Like [`first`](Self::first), defaulting to "".
    pub fn text(&self, titles: &[&str]) -> String {
        self.first(titles).unwrap_or_default().to_string()
    }
}

/// Project an order board item into an [`OrderRecord`].
///
/// The customer name falls back to the item name when the board has no
/// customer name column at all.
pub fn project_item(item: &Item, id_to_title: &HashMap<String, String>) -> OrderRecord {
    let cols = ColumnTextMap::new(item, id_to_title);
    OrderRecord {
        id: item.id.clone(),
        name: item.name.clone(),
        customer_name: cols
            .first(&["Customer name", "Customer Name"])
            .unwrap_or(item.name.as_str())
            .to_string(),
        order_number: cols.text(&["Order Number", "Order number"]),
        first_name: cols.text(&["First Name", "First name"]),
        last_name: cols.text(&["Last Name", "Last name"]),
        candle1: cols.text(&["Candle 1"]),
        candle2: cols.text(&["Candle 2"]),
        candle3: cols.text(&["Candle 3"]),
        inscription: cols.text(&["Inscription"]),
        last_update_date: cols.text(&["Created Date", "Created date"]),
        status: cols.text(&["Status", "status"]),
    }
}

/// Project a CRM board item into a [`Customer`].
///
/// Display name preference: first + last, a "Name" column, a "Contact"
/// column, the item's own name, then [`UNNAMED`]. With no first/last name
/// columns filled, the display name is split at its first space.
pub fn project_customer(item: &Item, id_to_title: &HashMap<String, String>) -> Customer {
    let cols = ColumnTextMap::new(item, id_to_title);
    let mut first_name = cols.text(&["First name", "First Name"]);
    let mut last_name = cols.text(&["Last name", "Last Name"]);

    let candidates = [
        full_name(&first_name, &last_name),
        cols.text(&["Name"]),
        cols.text(&["Contact"]),
        item.name.trim().to_string(),
    ];
    let display_name = candidates
        .into_iter()
        .find(|c| !c.is_empty())
        .unwrap_or_else(|| UNNAMED.to_string());

    if first_name.is_empty() && last_name.is_empty() {
        match display_name.split_once(' ') {
            Some((first, rest)) => {
                first_name = first.trim().to_string();
                last_name = rest.trim().to_string();
            }
            None => first_name = display_name.clone(),
        }
    }

    Customer {
        id: item.id.clone(),
        display_name,
        first_name,
        last_name,
    }
}
