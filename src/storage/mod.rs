mod json_store;
mod record;

pub use json_store::*;
pub use record::*;

/// Default location of the persisted record, relative to the working directory.
pub const DEFAULT_RECORD_PATH: &str = "data.json";
