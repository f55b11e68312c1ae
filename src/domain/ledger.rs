use std::collections::BTreeMap;

use super::{Category, Cents, ExpenseEntry, ValidationError, format_cents};

/// Cash balance plus the expense history of every category.
///
/// Every [`Category`] always has a (possibly empty) sequence. Entries are kept
/// in insertion order and removal always targets the most recent one.
/// `total_expenses` is maintained incrementally by every mutation and always
/// equals the sum of all category totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    balance: Cents,
    expenses: BTreeMap<Category, Vec<ExpenseEntry>>,
    total_expenses: Cents,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// A fresh ledger: zero balance and four empty categories.
    pub fn new() -> Self {
        let expenses = Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        Self {
            balance: 0,
            expenses,
            total_expenses: 0,
        }
    }

    /// Rebuild a ledger from stored parts. Categories missing from `expenses`
    /// are filled with empty sequences. Returns `None` when the expense total
    /// does not fit in [`Cents`].
    pub(crate) fn from_parts(
        balance: Cents,
        mut expenses: BTreeMap<Category, Vec<ExpenseEntry>>,
    ) -> Option<Self> {
        for category in Category::ALL {
            expenses.entry(category).or_default();
        }
        let total_expenses = expenses
            .values()
            .flatten()
            .try_fold(0 as Cents, |total, e| total.checked_add(e.amount_cents()))?;
        Some(Self {
            balance,
            expenses,
            total_expenses,
        })
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn total_expenses(&self) -> Cents {
        self.total_expenses
    }

    /// Entries of a category, oldest first.
    pub fn entries(&self, category: Category) -> &[ExpenseEntry] {
        self.expenses
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of the amounts currently recorded under `category`.
    pub fn category_total(&self, category: Category) -> Cents {
        sum_entries(self.entries(category))
    }

    /// Iterate categories in declaration order with their entries.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ExpenseEntry])> {
        self.expenses
            .iter()
            .map(|(category, entries)| (*category, entries.as_slice()))
    }

    pub fn add_money(&mut self, amount_cents: Cents) -> Result<(), ValidationError> {
        if amount_cents < 0 {
            return Err(ValidationError::NegativeAmount(format_cents(amount_cents)));
        }
        self.balance = self
            .balance
            .checked_add(amount_cents)
            .ok_or_else(|| ValidationError::AmountTooLarge(format_cents(amount_cents)))?;
        Ok(())
    }

    /// Record an expense and debit the balance. The balance may go negative.
    /// Fails without touching the ledger if either running sum would overflow.
    pub fn add_expense(
        &mut self,
        category: Category,
        name: impl Into<String>,
        amount_cents: Cents,
    ) -> Result<&ExpenseEntry, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if amount_cents < 0 {
            return Err(ValidationError::NegativeAmount(format_cents(amount_cents)));
        }

        let too_large = || ValidationError::AmountTooLarge(format_cents(amount_cents));
        let balance = self.balance.checked_sub(amount_cents).ok_or_else(too_large)?;
        let total_expenses = self
            .total_expenses
            .checked_add(amount_cents)
            .ok_or_else(too_large)?;

        self.balance = balance;
        self.total_expenses = total_expenses;
        let entries = self.expenses.entry(category).or_default();
        let index = entries.len();
        entries.push(ExpenseEntry::new(name, amount_cents));
        Ok(&entries[index])
    }

    /// Pop the most recent expense of `category` and credit its amount back.
    /// Returns `None` and leaves the ledger untouched when the category is empty.
    /// Fails, keeping the entry, if the refund would overflow the balance.
    pub fn remove_last_expense(
        &mut self,
        category: Category,
    ) -> Result<Option<ExpenseEntry>, ValidationError> {
        let Some(entries) = self.expenses.get_mut(&category) else {
            return Ok(None);
        };
        let Some(amount_cents) = entries.last().map(ExpenseEntry::amount_cents) else {
            return Ok(None);
        };
        let balance = self
            .balance
            .checked_add(amount_cents)
            .ok_or_else(|| ValidationError::AmountTooLarge(format_cents(amount_cents)))?;

        let entry = entries.pop();
        self.balance = balance;
        // Never underflows: the tracked total includes this entry.
        self.total_expenses -= amount_cents;
        Ok(entry)
    }

    /// Recompute totals from scratch and compare them with the tracked state.
    pub fn check(&self) -> IntegrityReport {
        let category_totals: Vec<(Category, Cents)> = Category::ALL
            .iter()
            .map(|c| (*c, self.category_total(*c)))
            .collect();
        let recomputed_total = category_totals.iter().map(|(_, total)| total).sum();

        let mut issues = Vec::new();
        if recomputed_total != self.total_expenses {
            issues.push(format!(
                "tracked total {} differs from recomputed total {}",
                format_cents(self.total_expenses),
                format_cents(recomputed_total)
            ));
        }
        for category in Category::ALL {
            if !self.expenses.contains_key(&category) {
                issues.push(format!("category {} is missing", category));
            }
        }
        for (category, entries) in self.iter() {
            for entry in entries.iter().filter(|e| e.amount_cents() < 0) {
                issues.push(format!(
                    "{} expense '{}' has negative amount {}",
                    category,
                    entry.name(),
                    format_cents(entry.amount_cents())
                ));
            }
        }

        IntegrityReport {
            category_totals,
            tracked_total: self.total_expenses,
            recomputed_total,
            issues,
        }
    }
}

/// Outcome of [`Ledger::check`].
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub category_totals: Vec<(Category, Cents)>,
    pub tracked_total: Cents,
    pub recomputed_total: Cents,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

fn sum_entries<'a>(entries: impl IntoIterator<Item = &'a ExpenseEntry>) -> Cents {
    entries.into_iter().map(ExpenseEntry::amount_cents).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_has_all_categories() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance(), 0);
        assert_eq!(ledger.total_expenses(), 0);
        assert_eq!(ledger.iter().count(), 4);
        for category in Category::ALL {
            assert!(ledger.entries(category).is_empty());
            assert_eq!(ledger.category_total(category), 0);
        }
    }

    #[test]
    fn test_add_money() {
        let mut ledger = Ledger::new();
        ledger.add_money(10000).unwrap();
        ledger.add_money(250).unwrap();
        assert_eq!(ledger.balance(), 10250);
    }

    #[test]
    fn test_add_money_rejects_negative() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.add_money(-1),
            Err(ValidationError::NegativeAmount(_))
        ));
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_add_expense_debits_balance() {
        let mut ledger = Ledger::new();
        ledger.add_money(10000).unwrap();

        let entry = ledger
            .add_expense(Category::Weekly, "Groceries", 4000)
            .unwrap();
        assert_eq!(entry.name(), "Groceries");
        assert_eq!(entry.amount_cents(), 4000);

        assert_eq!(ledger.balance(), 6000);
        assert_eq!(ledger.category_total(Category::Weekly), 4000);
        assert_eq!(ledger.total_expenses(), 4000);
    }

    #[test]
    fn test_balance_may_go_negative() {
        let mut ledger = Ledger::new();
        ledger.add_expense(Category::Single, "Laptop", 120000).unwrap();
        assert_eq!(ledger.balance(), -120000);
    }

    #[test]
    fn test_add_expense_empty_name_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        ledger.add_money(500).unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.add_expense(Category::Monthly, "", 100).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            ledger.add_expense(Category::Monthly, "   ", 100).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_remove_last_expense_is_lifo() {
        let mut ledger = Ledger::new();
        ledger.add_expense(Category::Monthly, "Rent", 80000).unwrap();
        ledger.add_expense(Category::Monthly, "Internet", 3000).unwrap();

        let removed = ledger.remove_last_expense(Category::Monthly).unwrap().unwrap();
        assert_eq!(removed.name(), "Internet");
        assert_eq!(ledger.entries(Category::Monthly).len(), 1);
        assert_eq!(ledger.entries(Category::Monthly)[0].name(), "Rent");
        assert_eq!(ledger.balance(), -80000);
        assert_eq!(ledger.total_expenses(), 80000);
    }

    #[test]
    fn test_remove_last_expense_on_empty_category_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add_money(1000).unwrap();
        ledger.add_expense(Category::Single, "Coffee", 350).unwrap();
        let before = ledger.clone();

        assert!(ledger.remove_last_expense(Category::Yearly).unwrap().is_none());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_from_parts_fills_missing_categories() {
        let mut expenses = BTreeMap::new();
        expenses.insert(
            Category::Yearly,
            vec![ExpenseEntry::new("Insurance".into(), 60000)],
        );
        let ledger = Ledger::from_parts(1500, expenses).unwrap();

        assert_eq!(ledger.iter().count(), 4);
        assert_eq!(ledger.total_expenses(), 60000);
        assert!(ledger.entries(Category::Single).is_empty());
        assert!(ledger.check().is_healthy());
    }

    #[test]
    fn test_totals_stay_consistent() {
        let mut ledger = Ledger::new();
        let ops: [(Category, &str, Cents); 5] = [
            (Category::Single, "Shoes", 5999),
            (Category::Weekly, "Groceries", 4000),
            (Category::Weekly, "Fuel", 3550),
            (Category::Monthly, "Gym", 2500),
            (Category::Yearly, "Domain", 1200),
        ];
        for (category, name, amount) in ops {
            ledger.add_expense(category, name, amount).unwrap();
            let report = ledger.check();
            assert!(report.is_healthy(), "{:?}", report.issues);
        }
        ledger.remove_last_expense(Category::Weekly).unwrap();
        ledger.remove_last_expense(Category::Single).unwrap();

        let report = ledger.check();
        assert!(report.is_healthy());
        assert_eq!(report.tracked_total, 4000 + 2500 + 1200);
        let sum: Cents = report.category_totals.iter().map(|(_, t)| t).sum();
        assert_eq!(sum, ledger.total_expenses());
    }

    #[test]
    fn test_from_parts_rejects_overflowing_total() {
        let mut expenses = BTreeMap::new();
        expenses.insert(
            Category::Single,
            vec![
                ExpenseEntry::new("a".into(), Cents::MAX),
                ExpenseEntry::new("b".into(), 1),
            ],
        );
        assert!(Ledger::from_parts(0, expenses).is_none());
    }

    #[test]
    fn test_add_money_overflow_leaves_balance() {
        let mut ledger = Ledger::new();
        ledger.add_money(Cents::MAX).unwrap();

        assert!(matches!(
            ledger.add_money(1),
            Err(ValidationError::AmountTooLarge(_))
        ));
        assert_eq!(ledger.balance(), Cents::MAX);
    }

    #[test]
    fn test_add_expense_overflow_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        ledger.add_expense(Category::Yearly, "House", Cents::MAX).unwrap();
        let before = ledger.clone();

        assert!(matches!(
            ledger.add_expense(Category::Yearly, "Garden", 1),
            Err(ValidationError::AmountTooLarge(_))
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_remove_overflow_keeps_entry() {
        let mut ledger = Ledger::new();
        ledger.add_expense(Category::Single, "Yacht", Cents::MAX).unwrap();
        ledger.add_money(Cents::MAX).unwrap();
        ledger.add_money(Cents::MAX).unwrap();
        let before = ledger.clone();

        assert!(matches!(
            ledger.remove_last_expense(Category::Single),
            Err(ValidationError::AmountTooLarge(_))
        ));
        assert_eq!(ledger, before);
    }
}
