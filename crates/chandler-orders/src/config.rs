//! Externally supplied board identifiers.

use chandler_core::BoardId;

/// Auxiliary boards. Either may be unset; features that need one report
/// "not configured" instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardConfig {
    /// Board whose item names are the selectable candles.
    pub candles_board: Option<BoardId>,
    /// CRM board holding customer contacts.
    pub crm_board: Option<BoardId>,
}

impl BoardConfig {
    /// Build from raw values; blank or whitespace-only ids count as unset.
    pub fn new(candles_board: Option<&str>, crm_board: Option<&str>) -> Self {
        Self {
            candles_board: candles_board.and_then(BoardId::parse),
            crm_board: crm_board.and_then(BoardId::parse),
        }
    }
}
