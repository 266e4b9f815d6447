#[cfg(test)]
#[path = "column_test.rs"]
mod column_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// One of the fixed lanes an order can occupy, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Taken at the table, not yet started.
    Ordered,
    /// In the kitchen.
    Preparing,
    /// Delivered to the table.
    Served,
}

impl Column {
    /// Every column, left to right.
    pub const ALL: [Self; 3] = [Self::Ordered, Self::Preparing, Self::Served];

    /// The column name as used in markup and forms.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Preparing => "preparing",
            Self::Served => "served",
        }
    }

    /// Zero-based position of the column on the board.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Ordered => 0,
            Self::Preparing => 1,
            Self::Served => 2,
        }
    }
}

impl FromStr for Column {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BoardError::InvalidColumn(s.to_owned()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
