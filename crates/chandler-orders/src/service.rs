//! Order translation facade: the create, update, delete, and list operations
//! the UI performs against an orders board.

use chandler_api::{BoardApi, ItemRef};
use chandler_core::{
    BoardId, ColumnRoleMap, CreateFields, ItemId, Order, OrderRecord, UpdateFields,
    build_create_payload, build_update_payload, id_to_title, project_item, resolve,
};
use tracing::{debug, info, warn};

use crate::OrderError;
use crate::error::MISSING_MAPPING;

/// Items fetched per list call. No pagination beyond this.
pub const ORDER_PAGE_SIZE: u32 = 100;

/// Order operations over an explicitly supplied board client.
pub struct OrderService<'a, A: BoardApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: BoardApi + ?Sized> OrderService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Fetch a board's columns and resolve the order roles against them.
    pub async fn role_map(&self, board: &BoardId) -> Result<ColumnRoleMap, OrderError> {
        let columns = self.api.columns(board).await?;
        let roles = resolve(&columns);
        info!(
            board = %board,
            columns = columns.len(),
            roles = roles.len(),
            "resolved order columns"
        );
        Ok(roles)
    }

    /// Create one item per order line, sequentially.
    ///
    /// Every line shares the order's number and submission instant. A
    /// failing line stops the loop: later lines are never attempted and
    /// earlier items stay on the board.
    pub async fn create_order(
        &self,
        board: &BoardId,
        roles: &ColumnRoleMap,
        order: &Order,
    ) -> Result<Vec<ItemRef>, OrderError> {
        if !roles.has_mapping() || order.lines.is_empty() {
            return Err(OrderError::configuration(MISSING_MAPPING));
        }

        let total = order.lines.len();
        info!(
            board = %board,
            order_number = order.order_number.as_str(),
            lines = total,
            "creating order"
        );

        let mut created = Vec::with_capacity(total);
        for (index, line) in order.lines.iter().enumerate() {
            let fields = CreateFields {
                first_name: order.first_name.clone(),
                last_name: order.last_name.clone(),
                order_number: order.order_number.as_str().to_string(),
                last_update: Some(order.submitted_at),
                options: [0, 1, 2].map(|slot| line.label(slot).map(str::to_string)),
                inscription: line.inscription.clone(),
            };
            let payload = build_create_payload(roles, &fields);
            let name = order.item_name(index);
            debug!(line = index + 1, columns = payload.len(), "creating order line");

            match self.api.create_item(board, &name, &payload).await {
                Ok(Some(item)) if !item.id.is_empty() => created.push(item),
                Ok(_) => warn!(line = index + 1, "create returned no item id"),
                Err(source) if index == 0 => return Err(OrderError::Api(source)),
                Err(source) => {
                    warn!(line = index + 1, created = created.len(), "order line failed");
                    return Err(OrderError::PartialCreate {
                        failed_line: index + 1,
                        total,
                        created: created.len(),
                        source,
                    });
                }
            }
        }

        info!(board = %board, created = created.len(), "order created");
        Ok(created)
    }

    /// Write the full editable field set onto one existing item.
    pub async fn update_order(
        &self,
        board: &BoardId,
        item: &ItemId,
        roles: &ColumnRoleMap,
        fields: &UpdateFields,
    ) -> Result<Option<ItemRef>, OrderError> {
        if !roles.has_mapping() {
            return Err(OrderError::configuration(MISSING_MAPPING));
        }
        let payload = build_update_payload(roles, fields);
        info!(
            board = %board,
            item = %item,
            columns = payload.len(),
            "updating order"
        );
        Ok(self.api.change_column_values(board, item, &payload).await?)
    }

    /// Delete one order item. Repeat deletes are left to the platform.
    pub async fn delete_order(&self, item: &ItemId) -> Result<Option<ItemRef>, OrderError> {
        info!(item = %item, "deleting order");
        Ok(self.api.delete_item(item).await?)
    }

    /// Every item on the board whose status reads "created" (any case),
    /// projected into order records in board order.
    pub async fn list_created_orders(
        &self,
        board: &BoardId,
    ) -> Result<Vec<OrderRecord>, OrderError> {
        let page = self.api.items(board, ORDER_PAGE_SIZE).await?;
        let titles = id_to_title(&page.columns);
        let fetched = page.items.len();
        let orders: Vec<OrderRecord> = page
            .items
            .iter()
            .map(|item| project_item(item, &titles))
            .filter(OrderRecord::is_created)
            .collect();
        info!(board = %board, fetched, created = orders.len(), "listed orders");
        Ok(orders)
    }
}
