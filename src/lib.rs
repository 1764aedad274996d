//! # ML Datasplit - Stable Hold-Out Splits for Tabular Experiments
//!
//! This library manages the train/validation vs. test separation for
//! experiments that compare several model variants over one dataset:
//!
//! - One-time stratified split of a tab-separated source table
//! - Persisted visible and hold-out portions, so repeated runs reuse the
//!   identical split and the hold-out rows stay unseen by every model
//! - Loading either portion (or the raw table) into feature/label pairs

pub mod config;
pub mod data;

pub use config::{DbConfig, SplitConfig};
pub use data::error::{DataError, DataResult};
pub use data::loader::{load_full, load_split};
pub use data::splitter::{ensure_split, SplitOutcome};
pub use data::types::Dataset;
