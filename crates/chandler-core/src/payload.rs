//! Column-value payloads for item create and update.
//!
//! Only resolved roles are written. On create, blank text fields are left
//! out; on update they are written so a user can clear a field.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::order::{CANDLE_SLOTS, CREATED_STATUS, full_name};
use crate::resolve::{ColumnRoleMap, Role};

/// Column id → encoded value, sent as the `column_values` JSON argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnValuePayload(Map<String, Value>);

impl ColumnValuePayload {
    pub fn insert(&mut self, column_id: &str, value: Value) {
        self.0.insert(column_id.to_string(), value);
    }

    pub fn get(&self, column_id: &str) -> Option<&Value> {
        self.0.get(column_id)
    }

    pub fn contains(&self, column_id: &str) -> bool {
        self.0.contains_key(column_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The payload as the JSON string the GraphQL `JSON!` scalar expects.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// Field values for one created item (one order line).
#[derive(Debug, Clone, Default)]
pub struct CreateFields {
    pub first_name: String,
    pub last_name: String,
    pub order_number: String,
    pub last_update: Option<DateTime<Utc>>,
    pub options: [Option<String>; CANDLE_SLOTS],
    pub inscription: String,
}

/// Field values for an edit of an existing item.
#[derive(Debug, Clone, Default)]
pub struct UpdateFields {
    pub first_name: String,
    pub last_name: String,
    pub options: [Option<String>; CANDLE_SLOTS],
    pub inscription: String,
}

/// Encode an instant as the platform's date column value: a calendar date
/// plus a time of day, both in UTC.
pub fn encode_date_time(at: DateTime<Utc>) -> Value {
    json!({
        "date": at.format("%Y-%m-%d").to_string(),
        "time": at.format("%H:%M:%S").to_string(),
    })
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn write_customer_name(
    roles: &ColumnRoleMap,
    payload: &mut ColumnValuePayload,
    first: &str,
    last: &str,
) {
    if let Some(id) = roles.id(Role::CustomerName) {
        let name = full_name(first, last);
        if !name.is_empty() {
            payload.insert(id, Value::String(name));
        }
    }
}

/// Build the payload for creating one order line item.
pub fn build_create_payload(roles: &ColumnRoleMap, fields: &CreateFields) -> ColumnValuePayload {
    let mut payload = ColumnValuePayload::default();

    write_customer_name(roles, &mut payload, &fields.first_name, &fields.last_name);

    let text_fields = [
        (Role::OrderNumber, fields.order_number.as_str()),
        (Role::FirstName, fields.first_name.as_str()),
        (Role::LastName, fields.last_name.as_str()),
        (Role::Inscription, fields.inscription.as_str()),
    ];
    for (role, value) in text_fields {
        if let (Some(id), Some(value)) = (roles.id(role), non_blank(value)) {
            payload.insert(id, Value::String(value.to_string()));
        }
    }

    for (role, option) in Role::CANDLES.into_iter().zip(&fields.options) {
        let label = option.as_deref().filter(|l| !l.trim().is_empty());
        if let (Some(col), Some(label)) = (roles.get(role), label) {
            payload.insert(&col.id, col.kind.encode_label(label));
        }
    }

    if let (Some(id), Some(at)) = (roles.id(Role::LastUpdateDate), fields.last_update) {
        payload.insert(id, encode_date_time(at));
    }

    if let Some(col) = roles.get(Role::Status) {
        payload.insert(&col.id, col.kind.encode_label(CREATED_STATUS));
    }

    payload
}

/// Build the payload for editing an existing order item.
///
/// Names and inscription are always written (trimmed, possibly empty). A
/// missing candle clears its column with the kind's empty value.
pub fn build_update_payload(roles: &ColumnRoleMap, fields: &UpdateFields) -> ColumnValuePayload {
    let mut payload = ColumnValuePayload::default();

    write_customer_name(roles, &mut payload, &fields.first_name, &fields.last_name);

    let text_fields = [
        (Role::FirstName, fields.first_name.as_str()),
        (Role::LastName, fields.last_name.as_str()),
        (Role::Inscription, fields.inscription.as_str()),
    ];
    for (role, value) in text_fields {
        if let Some(id) = roles.id(role) {
            payload.insert(id, Value::String(value.trim().to_string()));
        }
    }

    for (role, option) in Role::CANDLES.into_iter().zip(&fields.options) {
        let Some(col) = roles.get(role) else {
            continue;
        };
        let value = match option.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(label) => col.kind.encode_label(label),
            None => col.kind.empty_value(),
        };
        payload.insert(&col.id, value);
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ColumnKind;
    use chrono::TimeZone;

    fn text_roles() -> ColumnRoleMap {
        ColumnRoleMap::default()
            .with(Role::CustomerName, "customer", ColumnKind::Text)
            .with(Role::OrderNumber, "order_no", ColumnKind::Text)
            .with(Role::FirstName, "first", ColumnKind::Text)
            .with(Role::LastName, "last", ColumnKind::Text)
            .with(Role::Candle1, "c1", ColumnKind::Text)
            .with(Role::Candle2, "c2", ColumnKind::Dropdown)
            .with(Role::Candle3, "c3", ColumnKind::Status)
            .with(Role::Inscription, "inscription", ColumnKind::Text)
            .with(Role::LastUpdateDate, "created", ColumnKind::Date)
            .with(Role::Status, "status", ColumnKind::Status)
    }

    fn options(a: &str, b: &str, c: &str) -> [Option<String>; 3] {
        [Some(a.into()), Some(b.into()), Some(c.into())]
    }

    #[test]
    fn option_encoding_follows_column_kind() {
        let fields = CreateFields {
            options: [Some("Vanilla".into()), None, None],
            ..Default::default()
        };

        let text = ColumnRoleMap::default().with(Role::Candle1, "c1", ColumnKind::Text);
        assert_eq!(build_create_payload(&text, &fields).get("c1"), Some(&json!("Vanilla")));

        let status = ColumnRoleMap::default().with(Role::Candle1, "c1", ColumnKind::Status);
        assert_eq!(
            build_create_payload(&status, &fields).get("c1"),
            Some(&json!({ "labels": ["Vanilla"] }))
        );
    }

    #[test]
    fn create_omits_blank_inscription_update_writes_it() {
        let roles =
            ColumnRoleMap::default().with(Role::Inscription, "inscription", ColumnKind::Text);

        let create = build_create_payload(&roles, &CreateFields::default());
        assert!(!create.contains("inscription"));

        let update = build_update_payload(&roles, &UpdateFields::default());
        assert_eq!(update.get("inscription"), Some(&json!("")));
    }

    #[test]
    fn create_writes_full_line() {
        let at = Utc.with_ymd_and_hms(2026, 2, 14, 18, 30, 5).unwrap();
        let fields = CreateFields {
            first_name: " Ada ".into(),
            last_name: "Byron".into(),
            order_number: "ORD-1".into(),
            last_update: Some(at),
            options: options("Vanilla", "Cedar", "Fig"),
            inscription: "  Happy birthday ".into(),
        };
        let payload = build_create_payload(&text_roles(), &fields);

        assert_eq!(payload.get("customer"), Some(&json!("Ada Byron")));
        assert_eq!(payload.get("order_no"), Some(&json!("ORD-1")));
        assert_eq!(payload.get("first"), Some(&json!("Ada")));
        assert_eq!(payload.get("last"), Some(&json!("Byron")));
        assert_eq!(payload.get("c1"), Some(&json!("Vanilla")));
        assert_eq!(payload.get("c2"), Some(&json!({ "labels": ["Cedar"] })));
        assert_eq!(payload.get("c3"), Some(&json!({ "labels": ["Fig"] })));
        assert_eq!(payload.get("inscription"), Some(&json!("Happy birthday")));
        assert_eq!(
            payload.get("created"),
            Some(&json!({ "date": "2026-02-14", "time": "18:30:05" }))
        );
        assert_eq!(payload.get("status"), Some(&json!({ "labels": ["Created"] })));
        assert_eq!(payload.len(), 10);
    }

    #[test]
    fn create_skips_unresolved_roles() {
        let roles = ColumnRoleMap::default().with(Role::FirstName, "first", ColumnKind::Text);
        let fields = CreateFields {
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            options: options("A", "B", "C"),
            inscription: "hi".into(),
            ..Default::default()
        };
        let payload = build_create_payload(&roles, &fields);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("first"), Some(&json!("Ada")));
    }

    #[test]
    fn create_omits_blank_names_and_customer() {
        let payload = build_create_payload(&text_roles(), &CreateFields::default());
        for id in ["customer", "first", "last", "order_no", "c1", "c2", "c3", "created"] {
            assert!(!payload.contains(id), "{id} should be omitted");
        }
        // Status is always set on create.
        assert!(payload.contains("status"));
    }

    #[test]
    fn text_status_column_gets_plain_string() {
        let roles = ColumnRoleMap::default().with(Role::Status, "status", ColumnKind::Text);
        let payload = build_create_payload(&roles, &CreateFields::default());
        assert_eq!(payload.get("status"), Some(&json!("Created")));
    }

    #[test]
    fn update_clears_missing_candles_by_kind() {
        let fields = UpdateFields {
            first_name: "Ada".into(),
            options: [None, Some(String::new()), Some("Fig".into())],
            ..Default::default()
        };
        let payload = build_update_payload(&text_roles(), &fields);
        assert_eq!(payload.get("c1"), Some(&json!("")));
        assert_eq!(payload.get("c2"), Some(&json!({ "labels": [] })));
        assert_eq!(payload.get("c3"), Some(&json!({ "labels": ["Fig"] })));
    }

    #[test]
    fn update_writes_empty_names_but_not_empty_customer() {
        let payload = build_update_payload(&text_roles(), &UpdateFields::default());
        assert_eq!(payload.get("first"), Some(&json!("")));
        assert_eq!(payload.get("last"), Some(&json!("")));
        assert!(!payload.contains("customer"));
        // Update never touches status, order number, or date.
        assert!(!payload.contains("status"));
        assert!(!payload.contains("order_no"));
        assert!(!payload.contains("created"));
    }

    #[test]
    fn payload_serialises_as_json_object() {
        let mut payload = ColumnValuePayload::default();
        payload.insert("text0", json!("Ada"));
        payload.insert("status", json!({ "labels": ["Created"] }));
        let parsed: Value = serde_json::from_str(&payload.to_json_string()).unwrap();
        assert_eq!(parsed, json!({ "text0": "Ada", "status": { "labels": ["Created"] } }));
    }
}
