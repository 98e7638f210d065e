pub mod board;
pub mod date_key;
pub mod order;
pub mod payload;
pub mod project;
pub mod resolve;

pub use board::{BoardId, Column, ColumnKind, ColumnValue, Item, ItemId};
pub use date_key::{date_key, sort_by_last_update_desc};
pub use order::{Customer, OptionValue, Order, OrderLine, OrderNumber, OrderRecord};
pub use payload::{
    ColumnValuePayload, CreateFields, UpdateFields, build_create_payload, build_update_payload,
};
pub use project::{id_to_title, project_customer, project_item};
pub use resolve::{ColumnRoleMap, ResolvedColumn, Role, TitleIndex, resolve};
