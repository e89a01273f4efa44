//! Deterministic beam search for combo lines.
//!
//! The search layer is rules-agnostic: it enumerates through
//! [`crate::rules`] and [`crate::effects`], ranks endboards through a
//! [`BoardEvaluator`], and promises bit-identical results for identical
//! inputs. See [`beam`] for the algorithm and its closure passes.

pub mod beam;
pub mod config;
pub mod evaluator;
pub mod snapshot;
pub mod stats;

pub use beam::{ComboSearch, SearchOutcome};
pub use config::SearchConfig;
pub use evaluator::{BoardEvaluator, BoardScore, EquipCountEvaluator};
pub use snapshot::{BoardSnapshot, EquipSummary};
pub use stats::SearchStats;
