//! Dataset splitting and loading.
//!
//! The flow is existence-check, then a conditional split-and-persist, then
//! load-on-demand: [`splitter::ensure_split`] guarantees both split
//! artifacts exist, [`loader::load_split`] and [`loader::load_full`] read
//! portions back as feature/label pairs.

pub mod error;
pub mod loader;
pub mod splitter;
mod table;
pub mod types;

pub use error::{DataError, DataResult};
pub use loader::{load_full, load_split};
pub use splitter::{ensure_split, SplitOutcome};
pub use types::Dataset;

/// Name of the binary label column
pub const TARGET_COLUMN: &str = "target";

/// Name of the identifier column, excluded from features
pub const ID_COLUMN: &str = "user_id";
