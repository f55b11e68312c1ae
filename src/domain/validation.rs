use thiserror::Error;

/// User-input level failures. An operation that returns one of these has not
/// touched the ledger or storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an expense name.")]
    EmptyName,

    #[error("Please enter an amount.")]
    EmptyAmount,

    #[error("Invalid amount '{0}'. Use '50.00' or '50'")]
    InvalidAmount(String),

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(String),

    #[error("Amount {0} exceeds the maximum accepted value")]
    AmountTooLarge(String),
}
