//! Plain-text rendering for orders, columns, and customers.

use chandler_core::{ColumnRoleMap, Customer, Order, OrderRecord, Role};

const NAME_WIDTH: usize = 24;
const CANDLE_WIDTH: usize = 16;

/// Role-to-column table; unresolved roles are shown as missing.
pub fn print_roles(roles: &ColumnRoleMap) {
    println!("{:<18} {:<20} kind", "field", "column");
    for role in Role::ALL {
        match roles.get(role) {
            Some(col) => println!("{:<18} {:<20} {:?}", format!("{role:?}"), col.id, col.kind),
            None => println!("{:<18} {:<20} -", format!("{role:?}"), "(missing)"),
        }
    }
}

pub fn print_orders(orders: &[OrderRecord]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    println!(
        "{:<12} {:<24} {:<16} {:<16} {:<16} {:<20} {:<19} inscription",
        "id", "customer", "candle 1", "candle 2", "candle 3", "order", "updated"
    );
    for order in orders {
        let [c1, c2, c3] = order.candles();
        println!(
            "{:<12} {:<24} {:<16} {:<16} {:<16} {:<20} {:<19} {}",
            order.id,
            truncate(&order.customer_name, NAME_WIDTH),
            truncate(c1, CANDLE_WIDTH),
            truncate(c2, CANDLE_WIDTH),
            truncate(c3, CANDLE_WIDTH),
            order.order_number,
            order.last_update_date,
            order.inscription,
        );
    }
    println!("\n{} order(s)", orders.len());
}

pub fn print_customers(customers: &[Customer]) {
    if customers.is_empty() {
        println!("No customers.");
        return;
    }
    for c in customers {
        println!("{:<12} {}", c.id, c.display_name);
    }
}

/// Vertical card for an order kept locally.
pub fn print_local_order(order: &Order) {
    println!("=== {} ===", order.order_number.as_str());
    println!("  {:<14} {}", "customer", order.customer_name());
    println!("  {:<14} {}", "submitted", order.submitted_at.to_rfc3339());
    for (i, line) in order.lines.iter().enumerate() {
        let candles: Vec<&str> = (0..3).map(|slot| line.label(slot).unwrap_or("-")).collect();
        println!("  line {:<9} {}", i + 1, candles.join(", "));
        if !line.inscription.is_empty() {
            println!("  {:<14} {}", "", line.inscription);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
