//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chandler - candle orders on a monday.com board.
///
/// The orders board comes from CHANDLER_BOARD_ID, standing in for the board
/// the app is opened on. Without it, `create` saves the order locally.
#[derive(Parser, Debug)]
#[command(name = "chandler")]
#[command(version)]
#[command(about = "Create, list, update, and delete candle orders on a board")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// API token sent as the Authorization header
    #[arg(long, env = "MONDAY_API_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    /// GraphQL endpoint
    #[arg(long, env = "MONDAY_API_URL", default_value = chandler_api::http::DEFAULT_API_URL)]
    pub api_url: String,

    /// Orders board the app is running against
    #[arg(long, env = "CHANDLER_BOARD_ID")]
    pub board: Option<String>,

    /// Current user, as reported by the host
    #[arg(long, env = "CHANDLER_USER_ID")]
    pub user: Option<String>,

    /// Board whose item names are the candle choices
    #[arg(long, env = "CANDLES_BOARD_ID")]
    pub candles_board: Option<String>,

    /// CRM board holding customer contacts
    #[arg(long, env = "CRM_BOARD_ID")]
    pub crm_board: Option<String>,

    /// Directory for orders saved without a board
    #[arg(long, env = "CHANDLER_LOCAL_DIR", default_value = ".chandler")]
    pub local_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which board column each order field maps to
    Columns,

    /// Submit an order, one board item per line
    Create {
        #[arg(long, default_value = "")]
        first: String,
        #[arg(long, default_value = "")]
        last: String,
        /// Order line as "candle1,candle2,candle3[:inscription]" (repeatable)
        #[arg(long = "line", value_name = "LINE")]
        lines: Vec<String>,
        /// Also add the customer to the CRM board
        #[arg(long)]
        new_customer: bool,
    },

    /// List orders whose status is "Created", newest first
    List,

    /// Overwrite the editable fields of one order item
    Update {
        item: String,
        #[arg(long, default_value = "")]
        first: String,
        #[arg(long, default_value = "")]
        last: String,
        #[arg(long)]
        candle1: Option<String>,
        #[arg(long)]
        candle2: Option<String>,
        #[arg(long)]
        candle3: Option<String>,
        #[arg(long, default_value = "")]
        inscription: String,
    },

    /// Delete one order item
    Delete { item: String },

    /// List the selectable candles
    Options,

    /// List CRM customers
    Customers,

    /// Show the last order saved without a board
    LastLocal,
}
