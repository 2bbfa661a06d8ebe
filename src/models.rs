use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Status values offered by the add form. Seeded records may carry anything.
pub const STATUS_OPTIONS: &[&str] = &["Open", "Paid", "Unpaid", "Due", "Inactive"];

/// One customer/billing row.
///
/// Amounts stay as the text the user typed; only the leading sign is ever
/// inspected. Legacy seed files use capitalised keys, hence the aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "Status")]
    pub status: String,
    #[serde(default, alias = "Rate")]
    pub rate: String,
    #[serde(default, alias = "Balance")]
    pub balance: String,
    #[serde(default, alias = "Deposit")]
    pub deposit: String,
}

/// The editable fields of a record, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub description: String,
    pub status: String,
    pub rate: String,
    pub balance: String,
    pub deposit: String,
}

impl NewRecord {
    /// Check the required fields. Description and status may be blank.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("Name", &self.name),
            ("Rate", &self.rate),
            ("Balance", &self.balance),
            ("Deposit", &self.deposit),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::MissingField(label));
            }
        }
        Ok(())
    }

    pub fn into_record(self, id: u64) -> Record {
        Record {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            rate: self.rate,
            balance: self.balance,
            deposit: self.deposit,
        }
    }
}

/// Rows per page. Only 5, 10, 15 and 20 are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const ALL: [usize; 4] = [5, 10, 15, 20];

    pub fn get(self) -> usize {
        self.0
    }

    /// Cycle to the next allowed size, wrapping 20 back to 5.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&n| n == self.0).unwrap_or(0);
        PageSize(Self::ALL[(idx + 1) % Self::ALL.len()])
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = AppError;

    fn try_from(n: usize) -> Result<Self> {
        if Self::ALL.contains(&n) {
            Ok(PageSize(n))
        } else {
            Err(AppError::InvalidPageSize(n))
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.0
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
