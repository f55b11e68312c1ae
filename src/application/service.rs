use std::path::PathBuf;

use tracing::debug;

use crate::domain::{
    Category, Cents, ExpenseEntry, IntegrityReport, Ledger, ValidationError, format_cents,
    parse_amount,
};
use crate::storage::JsonStore;

use super::AppError;

/// Owns the ledger and its backing store. Every successful mutation is
/// followed by a full save. This is the primary interface for any client
/// (CLI, tests, a future GUI).
pub struct LedgerService {
    store: JsonStore,
    ledger: Ledger,
}

/// The values a front end shows after each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub balance: Cents,
    pub total_expenses: Cents,
    pub category: Category,
    pub category_total: Cents,
}

/// Result of recording an expense
#[derive(Debug)]
pub struct ExpenseResult {
    pub entry: ExpenseEntry,
    pub summary: Summary,
}

impl LedgerService {
    /// Create a service over an already loaded ledger.
    pub fn new(store: JsonStore, ledger: Ledger) -> Self {
        Self { store, ledger }
    }

    /// Load the ledger stored at `path`, or start fresh if it is missing or
    /// unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = JsonStore::new(path);
        let ledger = store.load_or_default();
        Self::new(store, ledger)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self) -> Cents {
        self.ledger.balance()
    }

    pub fn total_expenses(&self) -> Cents {
        self.ledger.total_expenses()
    }

    pub fn category_total(&self, category: Category) -> Cents {
        self.ledger.category_total(category)
    }

    pub fn list_expenses(&self, category: Category) -> &[ExpenseEntry] {
        self.ledger.entries(category)
    }

    pub fn summary(&self, category: Category) -> Summary {
        Summary {
            balance: self.ledger.balance(),
            total_expenses: self.ledger.total_expenses(),
            category,
            category_total: self.ledger.category_total(category),
        }
    }

    pub fn check_integrity(&self) -> IntegrityReport {
        self.ledger.check()
    }

    // ========================
    // Mutations
    // ========================

    /// Credit the balance with a user-entered amount.
    pub fn add_money(&mut self, amount: &str) -> Result<Cents, AppError> {
        let amount_cents = parse_amount(amount)?;
        self.ledger.add_money(amount_cents)?;
        debug!(
            amount = %format_cents(amount_cents),
            balance = self.ledger.balance(),
            "added money"
        );

        self.persist()?;
        Ok(self.ledger.balance())
    }

    /// Record an expense from user-entered text.
    pub fn add_expense(
        &mut self,
        category: Category,
        name: &str,
        amount: &str,
    ) -> Result<ExpenseResult, AppError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let amount_cents = parse_amount(amount)?;

        let entry = self
            .ledger
            .add_expense(category, name, amount_cents)?
            .clone();
        debug!(
            %category,
            name = entry.name(),
            amount = %format_cents(amount_cents),
            "added expense"
        );

        self.persist()?;
        Ok(ExpenseResult {
            entry,
            summary: self.summary(category),
        })
    }

    /// Undo the most recent expense of `category`. Returns `None` without
    /// touching storage when there is nothing to remove.
    pub fn remove_last_expense(
        &mut self,
        category: Category,
    ) -> Result<Option<ExpenseEntry>, AppError> {
        let Some(entry) = self.ledger.remove_last_expense(category)? else {
            debug!(%category, "no expense to remove");
            return Ok(None);
        };
        debug!(
            %category,
            name = entry.name(),
            amount = %format_cents(entry.amount_cents()),
            "removed expense"
        );

        self.persist()?;
        Ok(Some(entry))
    }

    /// Write the current ledger. On failure the in-memory state is kept so the
    /// caller can retry.
    pub fn persist(&self) -> Result<(), AppError> {
        self.store.save(&self.ledger)?;
        Ok(())
    }
}
