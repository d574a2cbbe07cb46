pub mod catalog;
pub mod error;
pub mod fields;
pub mod gateway;
pub mod history;
pub mod snapshot;
pub mod state;

// Re-export common error type
pub use error::{Result, TwinError};
pub use snapshot::StateSnapshot;
