//! Directory-backed key-value store for the no-board fallback.
//!
//! Without a board context, the last submitted order is kept here for demo
//! display only. Nothing in this store is ever written to the platform.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chandler_core::Order;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::OrderError;

/// Key under which the last locally submitted order is kept.
pub const LAST_ORDER_KEY: &str = "candleOrdersDev";

/// One JSON file per key inside a directory.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, OrderError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), OrderError> {
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(self.path_for(key), json)?;
        Ok(())
    }

    /// Read a value back. A missing key is `None`; so is an unreadable
    /// entry, which is logged and otherwise ignored.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, OrderError> {
        let raw = match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable local entry");
                Ok(None)
            }
        }
    }

    pub fn save_last_order(&self, order: &Order) -> Result<(), OrderError> {
        self.put(LAST_ORDER_KEY, order)?;
        info!(lines = order.lines.len(), dir = %self.dir.display(), "saved order locally");
        Ok(())
    }

    pub fn last_order(&self) -> Result<Option<Order>, OrderError> {
        self.get(LAST_ORDER_KEY)
    }
}
