//! Scripted behavior for the demo pool.
//!
//! One module per package: extenders put bodies down, searchers thin the
//! deck, the graveyard module recycles, equips dress the board, and the
//! extra-deck bodies pay the climb off. `standard_effects` is the full
//! roster the standard registry installs.

pub mod equips;
pub mod extenders;
pub mod extra_bodies;
pub mod graveyard;
pub mod searchers;

use crate::cards::{CardInstance, CardKind};

use super::effect::CardEffect;

/// Shared target predicate: a FIRE monster of any kind.
pub(crate) fn fire_monster(card: &CardInstance) -> bool {
    card.meta.kind().is_monster() && card.meta.attribute() == Some("FIRE")
}

/// Graveyard and banished revival rule: extra-deck bodies that never hit
/// the field through their own mechanic stay down.
pub(crate) fn revivable(card: &CardInstance) -> bool {
    !card.meta.from_extra() || card.properly_summoned
}

/// The common revival filter: FIRE, Level 4 or lower, revivable.
pub(crate) fn revivable_small_fire(card: &CardInstance) -> bool {
    fire_monster(card) && revivable(card) && card.effective_level().is_some_and(|l| l <= 4)
}

/// An equip spell card.
pub(crate) fn equip_spell(card: &CardInstance) -> bool {
    card.meta.kind() == CardKind::EquipSpell
}

/// Every scripted card in the demo pool, ready for registration.
#[must_use]
pub fn standard_effects() -> Vec<Box<dyn CardEffect>> {
    vec![
        Box::new(extenders::BlazingVanguard),
        Box::new(extenders::EmberCourier),
        Box::new(extenders::CinderSprite),
        Box::new(extenders::MagmaLeaper),
        Box::new(extenders::AshenPhoenix),
        Box::new(searchers::FlameHerald),
        Box::new(searchers::TorchCarrier),
        Box::new(searchers::BlazingCall),
        Box::new(searchers::StokeTheFlames),
        Box::new(searchers::EverburningCity),
        Box::new(graveyard::AshRecruiter),
        Box::new(graveyard::KindlingLoader),
        Box::new(graveyard::AshSalvager),
        Box::new(graveyard::FurnaceGolem),
        Box::new(graveyard::Rekindle),
        Box::new(graveyard::EmberSalvage),
        Box::new(graveyard::CinderTrader),
        Box::new(graveyard::PyreAdjuster),
        Box::new(equips::EmberBlade),
        Box::new(equips::PhoenixPlume),
        Box::new(extra_bodies::SparkRelay),
        Box::new(extra_bodies::TwinFurnace),
        Box::new(extra_bodies::PyreMarshal),
        Box::new(extra_bodies::InfernoSovereign),
        Box::new(extra_bodies::BulwarkColossus),
        Box::new(extra_bodies::ObsidianWarlord),
        Box::new(extra_bodies::VolcanicSeraph),
        Box::new(extra_bodies::ChimericPyrelord),
    ]
}
