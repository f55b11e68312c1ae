use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed expense buckets. The set is closed; every ledger carries all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Single,
    Weekly,
    Monthly,
    Yearly,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Single,
        Category::Weekly,
        Category::Monthly,
        Category::Yearly,
    ];

    /// Name used for display and as the key in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Single => "Single",
            Category::Weekly => "Weekly",
            Category::Monthly => "Monthly",
            Category::Yearly => "Yearly",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(Category::Single),
            "weekly" => Some(Category::Weekly),
            "monthly" => Some(Category::Monthly),
            "yearly" => Some(Category::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected one of: single, weekly, monthly, yearly)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
