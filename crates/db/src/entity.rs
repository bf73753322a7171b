//! Entity descriptors.
//!
//! An [`Entity`] fixes everything the generic repository needs to know about
//! a table: its name, its closed set of columns, which of them callers may
//! write, which are stripped from reads, and whether `created_at` /
//! `updated_at` are maintained automatically.
//!
//! Column identifiers only ever come from a [`Column`] enum, so no
//! caller-provided string reaches identifier position in generated SQL.

use std::fmt;
use std::hash::Hash;

/// A column of one table.
pub trait Column: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every column of the table, in schema order.
    const ALL: &'static [Self];

    /// Column name as it appears in SQL and in records.
    fn name(self) -> &'static str;

    /// PostgreSQL type used to cast bound values (`$1::boolean`).
    fn sql_type(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// Which columns a write may set from caller data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fillable<C: 'static> {
    /// Only these columns, in this order.
    Only(&'static [C]),
    /// Every known column. Must be opted into explicitly.
    All,
}

impl<C: Column> Fillable<C> {
    pub fn columns(self) -> &'static [C] {
        match self {
            Fillable::Only(columns) => columns,
            Fillable::All => C::ALL,
        }
    }

    pub fn allows(self, column: C) -> bool {
        self.columns().contains(&column)
    }
}

/// Automatically maintained timestamp columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps<C> {
    pub created_at: C,
    pub updated_at: C,
}

/// Per-table configuration consumed by [`crate::repository::Repository`].
pub trait Entity: Send + Sync + 'static {
    type Column: Column;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    const TABLE: &'static str;

    const PRIMARY_KEY: Self::Column;

    const FILLABLE: Fillable<Self::Column>;

    const HIDDEN: &'static [Self::Column] = &[];

    /// `None` disables automatic `created_at` / `updated_at` stamping.
    const TIMESTAMPS: Option<Timestamps<Self::Column>>;
}

/// Declare a column enum together with its [`Column`] implementation.
///
/// ```ignore
/// columns! {
///     pub enum CategoryColumn {
///         Id => ("id", "bigint"),
///         Name => ("name", "text"),
///     }
/// }
/// ```
macro_rules! columns {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($column:literal, $sql_type:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::entity::Column for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $column),+
                }
            }

            fn sql_type(self) -> &'static str {
                match self {
                    $(Self::$variant => $sql_type),+
                }
            }
        }
    };
}
