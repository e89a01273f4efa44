//! Core building blocks: arena handles, the apply-result type, seeded RNG.
//!
//! Everything above this module moves cards by `CardHandle` and reports
//! failures through `ApplyError`; nothing here knows any game rules.

pub mod error;
pub mod handle;
pub mod rng;

pub use error::{ApplyError, SetupError};
pub use handle::CardHandle;
pub use rng::DealRng;
