//! sort keys

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use strum::VariantArray;

pub const DESCENDING_PREFIX: char = '-';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// A sortable column of one resource.
///
/// Implemented by a fieldless enum deriving `EnumString`, `IntoStaticStr` and
/// `VariantArray`, so the set of sortable columns is closed at compile time and
/// every variant sorts in both directions.
pub trait SortField:
    Copy + Debug + Eq + FromStr + Into<&'static str> + VariantArray + Send + Sync + 'static
{
    fn column(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F: SortField> {
    field: F,
    direction: Direction,
}

impl<F: SortField> SortKey<F> {
    /// Resolves a client sort key such as `name` or `-name`.
    /// Anything that is not a known field yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, direction) = match raw.strip_prefix(DESCENDING_PREFIX) {
            Some(rest) => (rest, Direction::Desc),
            None => (raw, Direction::Asc),
        };
        // strum matches exact names only, so "Name" or " name" stay rejected
        let field = F::from_str(name).ok()?;
        Some(Self { field, direction })
    }

    pub fn field(&self) -> F {
        self.field
    }

    pub fn column(&self) -> &'static str {
        self.field.column()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<F: SortField> Display for SortKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "{}", self.column()),
            Direction::Desc => write!(f, "{}{}", DESCENDING_PREFIX, self.column()),
        }
    }
}
