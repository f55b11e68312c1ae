// Application layer - use cases and orchestration.
// Parses user input, applies it to the ledger and persists the result.

pub mod error;
mod service;

pub use error::*;
pub use service::*;
