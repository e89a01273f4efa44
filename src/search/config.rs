//! Beam search configuration parameters.

use serde::{Deserialize, Serialize};

/// Beam search configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// States surviving each round.
    /// Wider beams trade time for fewer pruned lines.
    pub beam_width: usize,

    /// Rounds searched, which bounds the length of a line.
    pub max_depth: usize,

    /// Fraction of the beam reserved for setup states: states whose score
    /// says they have not reached the target outcome yet. Keeps staging
    /// lines alive when finished boards outscore them.
    pub setup_fraction: f64,

    /// Floor on reserved setup slots when the fraction rounds away.
    pub setup_min: usize,

    /// Among equally scored results, keep the longest line instead of
    /// tie-breaking on hash alone.
    pub prefer_longest: bool,

    /// Beam width inside the closure passes.
    pub closure_width: usize,

    /// Depth of the equip-only closure pass.
    pub closure_equip_depth: usize,

    /// Depth of the extended closure pass (equips plus targeted summons).
    pub closure_extend_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: 48,
            max_depth: 14,
            setup_fraction: 0.25,
            setup_min: 2,
            prefer_longest: false,
            closure_width: 16,
            closure_equip_depth: 2,
            closure_extend_depth: 3,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom beam width.
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width;
        self
    }

    /// Create a new config with custom depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Create a new config with custom setup reservation.
    pub fn with_setup_fraction(mut self, fraction: f64) -> Self {
        self.setup_fraction = fraction;
        self
    }

    /// Create a new config preferring the longest of tied lines.
    pub fn with_prefer_longest(mut self, prefer: bool) -> Self {
        self.prefer_longest = prefer;
        self
    }
}
