use super::Cents;

/// A named debit recorded under a category. Amount is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseEntry {
    name: String,
    amount_cents: Cents,
}

impl ExpenseEntry {
    /// Callers must have validated the name and amount already; see
    /// [`crate::domain::Ledger::add_expense`].
    pub(crate) fn new(name: String, amount_cents: Cents) -> Self {
        debug_assert!(amount_cents >= 0);
        Self { name, amount_cents }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount_cents(&self) -> Cents {
        self.amount_cents
    }
}
