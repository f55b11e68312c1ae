use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Category, ExpenseEntry, Ledger, cents_from_units, cents_to_units};

/// On-disk entry shape: `[name, amount]`.
pub type EntryRecord = (String, f64);

/// Persisted record as read from disk.
///
/// Keys of `expenses` are kept as plain strings so that unknown categories can
/// be skipped instead of rejecting the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerRecord {
    #[serde(default)]
    pub money: f64,
    #[serde(default)]
    pub expenses: BTreeMap<String, Vec<EntryRecord>>,
}

/// Persisted record as written to disk. All four categories are always
/// present, in declaration order.
#[derive(Debug, Serialize)]
pub struct LedgerRecordView<'a> {
    pub money: f64,
    pub expenses: BTreeMap<Category, Vec<(&'a str, f64)>>,
}

impl<'a> From<&'a Ledger> for LedgerRecordView<'a> {
    fn from(ledger: &'a Ledger) -> Self {
        let expenses = ledger
            .iter()
            .map(|(category, entries)| {
                let rows = entries
                    .iter()
                    .map(|e| (e.name(), cents_to_units(e.amount_cents())))
                    .collect();
                (category, rows)
            })
            .collect();
        Self {
            money: cents_to_units(ledger.balance()),
            expenses,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("money is not a representable amount: {0}")]
    InvalidMoney(f64),

    #[error("total of recorded expenses is out of range")]
    AmountOutOfRange,

    #[error("category {0} appears more than once")]
    DuplicateCategory(Category),

    #[error("{category} expense '{name}' has invalid amount {amount}")]
    InvalidAmount {
        category: Category,
        name: String,
        amount: f64,
    },
}

impl LedgerRecord {
    /// Convert into a ledger, returning the unknown category keys that were
    /// skipped alongside it.
    pub fn into_ledger(self) -> Result<(Ledger, Vec<String>), RecordError> {
        let balance = cents_from_units(self.money).ok_or(RecordError::InvalidMoney(self.money))?;

        let mut expenses = BTreeMap::new();
        let mut skipped = Vec::new();
        for (key, rows) in self.expenses {
            let Some(category) = Category::parse(&key) else {
                skipped.push(key);
                continue;
            };
            // Keys differing only in case would leave the entry order ambiguous
            if expenses.contains_key(&category) {
                return Err(RecordError::DuplicateCategory(category));
            }
            let mut entries = Vec::with_capacity(rows.len());
            for (name, amount) in rows {
                match cents_from_units(amount) {
                    Some(cents) if cents >= 0 => entries.push(ExpenseEntry::new(name, cents)),
                    _ => {
                        return Err(RecordError::InvalidAmount {
                            category,
                            name,
                            amount,
                        });
                    }
                }
            }
            expenses.insert(category, entries);
        }

        let ledger = Ledger::from_parts(balance, expenses).ok_or(RecordError::AmountOutOfRange)?;
        Ok((ledger, skipped))
    }
}
