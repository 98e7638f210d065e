//! Candle order types: the write-time aggregate and the read-time projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of candle slots on every order line.
pub const CANDLE_SLOTS: usize = 3;

/// Status text written on create and matched on list.
pub const CREATED_STATUS: &str = "Created";

/// A selectable candle. Label and value carry the same display text in practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub label: String,
    pub value: String,
}

impl OptionValue {
    pub fn new(name: &str) -> Self {
        Self {
            label: name.to_string(),
            value: name.to_string(),
        }
    }

    /// The text to store for this option; the label wins, the value is the fallback.
    pub fn display(&self) -> &str {
        if self.label.is_empty() {
            &self.value
        } else {
            &self.label
        }
    }
}

/// One row of an order: three candle slots plus an optional inscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: u32,
    pub values: [Option<OptionValue>; CANDLE_SLOTS],
    #[serde(default)]
    pub inscription: String,
}

impl OrderLine {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// A line is complete once every candle slot holds a value.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// The stored label for slot `slot`, if chosen.
    pub fn label(&self, slot: usize) -> Option<&str> {
        self.values.get(slot)?.as_ref().map(OptionValue::display)
    }
}

/// Order number shared by every item created from one submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Derive the order number from the submission instant.
    pub fn from_instant(at: DateTime<Utc>) -> Self {
        Self(format!("ORD-{}", at.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A submitted order: customer identification plus one or more lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub first_name: String,
    pub last_name: String,
    pub order_number: OrderNumber,
    pub submitted_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Start a submission now; the order number is fixed at this point.
    pub fn new(first_name: &str, last_name: &str, lines: Vec<OrderLine>) -> Self {
        Self::submitted_at(first_name, last_name, lines, Utc::now())
    }

    pub fn submitted_at(
        first_name: &str,
        last_name: &str,
        lines: Vec<OrderLine>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            order_number: OrderNumber::from_instant(at),
            submitted_at: at,
            lines,
        }
    }

    pub fn customer_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    /// Item name for line `index` (zero-based): the customer's name, or an
    /// ordinal placeholder when both names are blank.
    pub fn item_name(&self, index: usize) -> String {
        let name = self.customer_name();
        if name.is_empty() {
            format!("Order {}", index + 1)
        } else {
            name
        }
    }

    pub fn all_lines_complete(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(OrderLine::is_complete)
    }
}

/// Join first and last name with a single space, skipping blank parts.
pub fn full_name(first: &str, last: &str) -> String {
    [first.trim(), last.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A board item read back as a flat order row. Absent columns read as "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    pub name: String,
    pub customer_name: String,
    pub order_number: String,
    pub first_name: String,
    pub last_name: String,
    pub candle1: String,
    pub candle2: String,
    pub candle3: String,
    pub inscription: String,
    pub last_update_date: String,
    pub status: String,
}

impl OrderRecord {
    pub fn is_created(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(CREATED_STATUS)
    }

    pub fn candles(&self) -> [&str; CANDLE_SLOTS] {
        [&self.candle1, &self.candle2, &self.candle3]
    }
}

/// A contact from the CRM board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
}
