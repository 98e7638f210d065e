//! Order submission: board create, CRM follow-up, or local fallback.

use chandler_api::{BoardApi, ItemRef};
use chandler_core::{ColumnRoleMap, Order};
use tracing::info;

use crate::catalog::add_customer;
use crate::context::HostContext;
use crate::error::{INCOMPLETE_LINES, NO_ORDER_LINES, REQUIRED_COLUMNS};
use crate::local::LocalStore;
use crate::{BoardConfig, OrderError, OrderService};

/// Whether the customer on the order should also be added to the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerMode {
    New,
    Returning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// Items created on the orders board, one per line.
    Created(Vec<ItemRef>),
    /// No board in context; the order was kept locally.
    SavedLocally,
}

pub struct Submitter<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    config: &'a BoardConfig,
    local: &'a LocalStore,
}

impl<'a, A: BoardApi + ?Sized> Submitter<'a, A> {
    pub fn new(api: &'a A, config: &'a BoardConfig, local: &'a LocalStore) -> Self {
        Self { api, config, local }
    }

    /// Submit `order` against the board in `ctx`.
    ///
    /// A CRM failure after the order items were created is returned as an
    /// error; the created items stay on the board.
    pub async fn submit(
        &self,
        ctx: &HostContext,
        roles: &ColumnRoleMap,
        order: &Order,
        mode: CustomerMode,
    ) -> Result<Submitted, OrderError> {
        if order.lines.is_empty() {
            return Err(OrderError::configuration(NO_ORDER_LINES));
        }
        if !order.all_lines_complete() {
            return Err(OrderError::configuration(INCOMPLETE_LINES));
        }

        let Some(board) = &ctx.board_id else {
            self.local.save_last_order(order)?;
            return Ok(Submitted::SavedLocally);
        };

        if !roles.has_mapping() {
            return Err(OrderError::configuration(REQUIRED_COLUMNS));
        }

        let created = OrderService::new(self.api)
            .create_order(board, roles, order)
            .await?;

        if mode == CustomerMode::New {
            match &self.config.crm_board {
                Some(crm) => {
                    add_customer(self.api, crm, &order.first_name, &order.last_name).await?;
                }
                None => info!("no CRM board configured; new customer not recorded"),
            }
        }

        Ok(Submitted::Created(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeBoardApi, board, order_columns};
    use chandler_core::{Column, ColumnKind, OptionValue, OrderLine, Role, resolve};
    use chrono::{TimeZone, Utc};

    fn order(lines: usize) -> Order {
        let lines = (1..=lines as u32)
            .map(|id| OrderLine {
                id,
                values: [
                    Some(OptionValue::new("Vanilla")),
                    Some(OptionValue::new("Cedar")),
                    Some(OptionValue::new("Fig")),
                ],
                inscription: String::new(),
            })
            .collect();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Order::submitted_at("Ada", "Byron", lines, at)
    }

    fn on_board() -> HostContext {
        HostContext::new(Some(board("10")), None)
    }

    fn crm_api() -> FakeBoardApi {
        FakeBoardApi::new().with_columns(
            "crm",
            vec![Column::new("contact", "Contact", "text")],
        )
    }

    #[tokio::test]
    async fn empty_order_is_rejected_before_anything_else() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = FakeBoardApi::new();
        let config = BoardConfig::default();

        let err = Submitter::new(&api, &config, &local)
            .submit(
                &HostContext::default(),
                &ColumnRoleMap::default(),
                &order(0),
                CustomerMode::New,
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), NO_ORDER_LINES);
        assert!(local.last_order().unwrap().is_none());
    }

    #[tokio::test]
    async fn line_with_unselected_candle_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = FakeBoardApi::new();
        let config = BoardConfig::default();
        let submitter = Submitter::new(&api, &config, &local);
        let roles = resolve(&order_columns());

        let mut partial = order(1);
        partial.lines[0].values[1] = None;
        partial.lines[0].values[2] = None;

        let err = submitter
            .submit(&on_board(), &roles, &partial, CustomerMode::New)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Configuration(_)));
        assert_eq!(err.to_string(), INCOMPLETE_LINES);
        assert!(api.calls().is_empty());

        let err = submitter
            .submit(&HostContext::default(), &roles, &partial, CustomerMode::New)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), INCOMPLETE_LINES);
        assert!(local.last_order().unwrap().is_none());
    }

    #[tokio::test]
    async fn boardless_context_saves_locally() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = FakeBoardApi::new();
        let config = BoardConfig::default();
        let order = order(2);

        let outcome = Submitter::new(&api, &config, &local)
            .submit(
                &HostContext::default(),
                &ColumnRoleMap::default(),
                &order,
                CustomerMode::New,
            )
            .await
            .unwrap();

        assert_eq!(outcome, Submitted::SavedLocally);
        assert_eq!(local.last_order().unwrap(), Some(order));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn board_without_mapping_names_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = FakeBoardApi::new();
        let config = BoardConfig::default();

        let err = Submitter::new(&api, &config, &local)
            .submit(
                &on_board(),
                &ColumnRoleMap::default(),
                &order(1),
                CustomerMode::Returning,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Configuration(_)));
        assert!(err.to_string().contains("\"Candle 3\""));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn new_customer_is_added_to_crm_after_create() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = crm_api();
        let config = BoardConfig::new(None, Some("crm"));

        let outcome = Submitter::new(&api, &config, &local)
            .submit(&on_board(), &resolve(&order_columns()), &order(2), CustomerMode::New)
            .await
            .unwrap();

        let Submitted::Created(items) = outcome else {
            panic!("expected created items");
        };
        assert_eq!(items.len(), 2);
        let creates = api.creates();
        assert_eq!(creates.len(), 3);
        assert_eq!(creates[2].0, "crm");
        assert_eq!(creates[2].1, "Ada Byron");
        assert_eq!(api.calls()[2], Call::Columns("crm".into()));
    }

    #[tokio::test]
    async fn returning_customer_skips_crm() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = crm_api();
        let config = BoardConfig::new(None, Some("crm"));
        let roles = ColumnRoleMap::default().with(Role::Candle1, "c1", ColumnKind::Text);

        Submitter::new(&api, &config, &local)
            .submit(&on_board(), &roles, &order(1), CustomerMode::Returning)
            .await
            .unwrap();

        assert!(api.creates().iter().all(|(board, _, _)| board == "10"));
        assert!(!api.calls().contains(&Call::Columns("crm".into())));
    }

    #[tokio::test]
    async fn new_customer_without_crm_board_only_creates_orders() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = FakeBoardApi::new();
        let config = BoardConfig::default();

        Submitter::new(&api, &config, &local)
            .submit(&on_board(), &resolve(&order_columns()), &order(1), CustomerMode::New)
            .await
            .unwrap();
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_create_skips_crm() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        let api = crm_api().failing_create_at(0);
        let config = BoardConfig::new(None, Some("crm"));

        let err = Submitter::new(&api, &config, &local)
            .submit(&on_board(), &resolve(&order_columns()), &order(1), CustomerMode::New)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Api(_)));
        assert_eq!(api.creates().len(), 1);
    }
}
