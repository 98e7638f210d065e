use chandler_api::ApiError;
use thiserror::Error;

/// Shown when a create is attempted without a board mapping or any lines.
pub const MISSING_MAPPING: &str = "Missing board, column mapping, or order lines";

/// Shown when the orders board has none of the columns an order writes.
pub const REQUIRED_COLUMNS: &str = "Board must have columns: \"First name\", \"Last name\", \
\"Candle 1\", \"Candle 2\", \"Candle 3\", \"Inscription\".";

/// Shown when a submission carries no order lines.
pub const NO_ORDER_LINES: &str = "Add at least one order line.";

/// Shown when an order line has an unselected candle slot.
pub const INCOMPLETE_LINES: &str = "Choose all three candles on every order line.";

#[derive(Debug, Error)]
pub enum OrderError {
    /// Missing board, column mapping, or input the user can correct.
    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A line failed after earlier lines were already written.
    #[error(
        "order line {failed_line} of {total} failed after {created} item(s) were created; \
         some orders may have been created: {source}"
    )]
    PartialCreate {
        failed_line: usize,
        total: usize,
        created: usize,
        source: ApiError,
    },

    #[error("local store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("local store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OrderError {
    pub fn configuration(message: &str) -> Self {
        Self::Configuration(message.to_string())
    }
}
