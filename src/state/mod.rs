//! Game positions: zones, the card arena, trigger tokens, and hashing.

pub mod events;
pub mod field;
pub mod game;
pub mod hash;

pub use events::{EventKind, Restriction, TriggerEvent};
pub use field::{
    decode_field_pos, field_pos_code, FieldZones, Zone, EMZ_SLOTS, FZ_SLOTS, MZ_SLOTS, STZ_SLOTS,
};
pub use game::{phase, GameState};
pub use hash::state_hash;
