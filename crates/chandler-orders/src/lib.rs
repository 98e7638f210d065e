//! Candle order workflows over a board platform.
//!
//! Everything here talks to the platform through [`chandler_api::BoardApi`],
//! so the same code drives the HTTP client and the in-memory fake used in
//! tests.

mod error;

pub mod catalog;
pub mod config;
pub mod context;
pub mod local;
pub mod service;
pub mod stale;
pub mod submit;

#[cfg(test)]
mod testing;

pub use catalog::{CustomerList, OptionsSource, add_customer, candle_options, list_customers};
pub use config::BoardConfig;
pub use context::{ContextListener, ContextPublisher, HostContext, context_channel};
pub use error::{INCOMPLETE_LINES, MISSING_MAPPING, NO_ORDER_LINES, OrderError, REQUIRED_COLUMNS};
pub use local::LocalStore;
pub use service::{ORDER_PAGE_SIZE, OrderService};
pub use stale::{FetchSlot, FetchTicket};
pub use submit::{CustomerMode, Submitted, Submitter};
