//! Column role resolution.
//!
//! Boards are configured by users, so the columns an order needs are found
//! by title rather than id. Each role accepts a short list of spellings and
//! takes the first one present on the board. A role with no matching column
//! is simply absent; writes for it are skipped.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::board::{Column, ColumnKind};

/// The semantic fields an order reads from and writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    CustomerName,
    OrderNumber,
    FirstName,
    LastName,
    Candle1,
    Candle2,
    Candle3,
    Inscription,
    LastUpdateDate,
    Status,
}

impl Role {
    pub const ALL: [Role; 10] = [
        Role::CustomerName,
        Role::OrderNumber,
        Role::FirstName,
        Role::LastName,
        Role::Candle1,
        Role::Candle2,
        Role::Candle3,
        Role::Inscription,
        Role::LastUpdateDate,
        Role::Status,
    ];

    pub const CANDLES: [Role; 3] = [Role::Candle1, Role::Candle2, Role::Candle3];

    /// Accepted column titles, in preference order.
    pub fn titles(self) -> &'static [&'static str] {
        match self {
            Role::CustomerName => &["Customer name", "Customer Name"],
            Role::OrderNumber => &["Order Number", "Order number"],
            Role::FirstName => &["First Name", "First name"],
            Role::LastName => &["Last Name", "Last name"],
            Role::Candle1 => &["Candle 1"],
            Role::Candle2 => &["Candle 2"],
            Role::Candle3 => &["Candle 3"],
            Role::Inscription => &["Inscription"],
            Role::LastUpdateDate => &["Created Date", "Created date"],
            Role::Status => &["Status", "status"],
        }
    }
}

/// A column chosen for a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub id: String,
    pub kind: ColumnKind,
}

/// Title → column lookup over a board's schema. Duplicate titles: last one wins.
#[derive(Debug, Default)]
pub struct TitleIndex {
    by_title: HashMap<String, ResolvedColumn>,
}

impl TitleIndex {
    pub fn from_columns(columns: &[Column]) -> Self {
        let mut by_title = HashMap::with_capacity(columns.len());
        for col in columns {
            if col.id.is_empty() {
                continue;
            }
            by_title.insert(
                col.title.clone(),
                ResolvedColumn {
                    id: col.id.clone(),
                    kind: col.kind(),
                },
            );
        }
        Self { by_title }
    }

    /// First column whose title matches one of `titles`, tried in order.
    pub fn find(&self, titles: &[&str]) -> Option<&ResolvedColumn> {
        titles.iter().find_map(|t| self.by_title.get(*t))
    }
}

/// Roles resolved against one board's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoleMap {
    roles: BTreeMap<Role, ResolvedColumn>,
}

impl ColumnRoleMap {
    pub fn get(&self, role: Role) -> Option<&ResolvedColumn> {
        self.roles.get(&role)
    }

    pub fn id(&self, role: Role) -> Option<&str> {
        self.get(role).map(|c| c.id.as_str())
    }

    pub fn kind(&self, role: Role) -> Option<ColumnKind> {
        self.get(role).map(|c| c.kind)
    }

    /// True when at least one role resolved.
    pub fn has_mapping(&self) -> bool {
        !self.roles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Assign a role directly, replacing any earlier assignment.
    pub fn with(mut self, role: Role, id: &str, kind: ColumnKind) -> Self {
        self.roles.insert(
            role,
            ResolvedColumn {
                id: id.to_string(),
                kind,
            },
        );
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &ResolvedColumn)> {
        self.roles.iter().map(|(role, col)| (*role, col))
    }
}

/// Resolve every order role against a board's columns.
pub fn resolve(columns: &[Column]) -> ColumnRoleMap {
    let index = TitleIndex::from_columns(columns);
    let mut roles = BTreeMap::new();
    for role in Role::ALL {
        match index.find(role.titles()) {
            Some(col) => {
                roles.insert(role, col.clone());
            }
            None => debug!(?role, "no column matches role"),
        }
    }
    ColumnRoleMap { roles }
}
