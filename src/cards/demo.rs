//! The bundled demo card pool.
//!
//! A self-contained FIRE pile built to exercise every mechanic the engine
//! models: hand extenders, on-summon searchers, graveyard recursion, level
//! modulation, link climbing, xyz/synchro/fusion bodies, and an equip
//! payoff. The ability implementations live in `effects::cards`; this module
//! only supplies the stat table and deck lists.

use super::meta::{keys, CardKind, CardMeta};
use super::provider::{CardData, StaticMetaProvider};

/// Cids of the demo pool.
pub mod ids {
    pub const DEMO_EXTENDER_001: &str = "DEMO_EXTENDER_001";
    pub const DEMO_EXTENDER_002: &str = "DEMO_EXTENDER_002";
    pub const DEMO_EXTENDER_003: &str = "DEMO_EXTENDER_003";
    pub const DEMO_EXTENDER_004: &str = "DEMO_EXTENDER_004";
    pub const DEMO_SEARCHER_001: &str = "DEMO_SEARCHER_001";
    pub const DEMO_SEARCHER_002: &str = "DEMO_SEARCHER_002";
    pub const DEMO_RECRUITER_001: &str = "DEMO_RECRUITER_001";
    pub const DEMO_LOADER_001: &str = "DEMO_LOADER_001";
    pub const DEMO_RETRIEVER_001: &str = "DEMO_RETRIEVER_001";
    pub const DEMO_GOLEM_001: &str = "DEMO_GOLEM_001";
    pub const DEMO_LEVELER_001: &str = "DEMO_LEVELER_001";
    pub const DEMO_TRADER_001: &str = "DEMO_TRADER_001";
    pub const DEMO_PHOENIX_001: &str = "DEMO_PHOENIX_001";
    pub const DEMO_BLOCKER_001: &str = "DEMO_BLOCKER_001";
    pub const DEMO_TITAN_001: &str = "DEMO_TITAN_001";
    pub const DEMO_LINK1_001: &str = "DEMO_LINK1_001";
    pub const DEMO_LINK2_001: &str = "DEMO_LINK2_001";
    pub const DEMO_LINK3_001: &str = "DEMO_LINK3_001";
    pub const DEMO_LINK4_001: &str = "DEMO_LINK4_001";
    pub const DEMO_XYZ_001: &str = "DEMO_XYZ_001";
    pub const DEMO_XYZ_002: &str = "DEMO_XYZ_002";
    pub const DEMO_SYNCHRO_001: &str = "DEMO_SYNCHRO_001";
    pub const DEMO_FUSION_001: &str = "DEMO_FUSION_001";
    pub const DEMO_TUTOR_001: &str = "DEMO_TUTOR_001";
    pub const DEMO_REVIVAL_001: &str = "DEMO_REVIVAL_001";
    pub const DEMO_EQUIP_001: &str = "DEMO_EQUIP_001";
    pub const DEMO_EQUIP_002: &str = "DEMO_EQUIP_002";
    pub const DEMO_SALVAGE_001: &str = "DEMO_SALVAGE_001";
    pub const DEMO_DRAW_001: &str = "DEMO_DRAW_001";
    pub const DEMO_FIELD_001: &str = "DEMO_FIELD_001";
}

fn monster(name: &str, kind: CardKind, level: i64, attribute: &str, race: &str) -> CardData {
    CardData::new(
        name,
        CardMeta::new()
            .with(keys::KIND, kind.tag())
            .with(keys::LEVEL, level)
            .with(keys::ATTRIBUTE, attribute)
            .with(keys::RACE, race),
    )
}

fn extra(name: &str, kind: CardKind, attribute: &str, race: &str, materials_min: i64) -> CardData {
    CardData::new(
        name,
        CardMeta::new()
            .with(keys::KIND, kind.tag())
            .with(keys::ATTRIBUTE, attribute)
            .with(keys::RACE, race)
            .with(keys::FROM_EXTRA, true)
            .with(keys::MATERIALS_MIN, materials_min),
    )
}

fn spell(name: &str, kind: CardKind) -> CardData {
    CardData::new(name, CardMeta::new().with(keys::KIND, kind.tag()))
}

/// Build the provider table for the demo pool.
#[must_use]
pub fn demo_pool() -> StaticMetaProvider {
    use ids::*;
    use CardKind::*;

    let mut pool = StaticMetaProvider::new();

    // Main-deck monsters.
    pool.register(DEMO_EXTENDER_001, monster("Blazing Vanguard", Effect, 4, "FIRE", "Warrior"));
    pool.register(DEMO_EXTENDER_002, monster("Ember Courier", Effect, 3, "FIRE", "Pyro"));
    pool.register(DEMO_EXTENDER_003, monster("Cinder Sprite", Effect, 1, "FIRE", "Pyro"));
    pool.register(DEMO_EXTENDER_004, monster("Magma Leaper", Effect, 4, "FIRE", "Dragon"));
    pool.register(DEMO_SEARCHER_001, monster("Flame Herald", Effect, 4, "FIRE", "Spellcaster"));
    pool.register(DEMO_SEARCHER_002, monster("Torch Carrier", Effect, 2, "FIRE", "Pyro"));
    pool.register(DEMO_RECRUITER_001, monster("Ash Recruiter", Effect, 3, "FIRE", "Warrior"));
    pool.register(DEMO_LOADER_001, monster("Kindling Loader", Effect, 4, "FIRE", "Machine"));
    pool.register(DEMO_RETRIEVER_001, monster("Ash Salvager", Effect, 2, "FIRE", "Fiend"));
    pool.register(DEMO_GOLEM_001, monster("Furnace Golem", Effect, 5, "FIRE", "Machine"));
    pool.register(DEMO_LEVELER_001, monster("Pyre Adjuster", Effect, 3, "FIRE", "Spellcaster"));
    pool.register(DEMO_TRADER_001, monster("Cinder Trader", Effect, 4, "FIRE", "Thunder"));
    pool.register(DEMO_PHOENIX_001, monster("Ashen Phoenix", Effect, 7, "FIRE", "Winged Beast"));
    pool.register(DEMO_BLOCKER_001, monster("Cinder Wall", Normal, 4, "FIRE", "Rock"));
    pool.register(
        DEMO_TITAN_001,
        monster("Obsidian Titan", Normal, 6, "FIRE", "Rock")
            .with_meta(keys::GENERIC_SPECIAL, true),
    );

    // Extra deck. Link material counts are bounded above by the rating, so
    // only non-link kinds declare an explicit maximum.
    pool.register(
        DEMO_LINK1_001,
        extra("Spark Relay", Link, "FIRE", "Pyro", 1)
            .with_meta(keys::LINK_RATING, 1)
            .with_meta(keys::MATERIAL_ATTRIBUTE, "FIRE"),
    );
    pool.register(
        DEMO_LINK2_001,
        extra("Twin Furnace", Link, "FIRE", "Machine", 2)
            .with_meta(keys::LINK_RATING, 2)
            .with_meta(keys::MATERIAL_ATTRIBUTE, "FIRE"),
    );
    pool.register(
        DEMO_LINK3_001,
        extra("Pyre Marshal", Link, "FIRE", "Warrior", 2).with_meta(keys::LINK_RATING, 3),
    );
    pool.register(
        DEMO_LINK4_001,
        extra("Inferno Sovereign", Link, "FIRE", "Dragon", 3).with_meta(keys::LINK_RATING, 4),
    );
    pool.register(
        DEMO_XYZ_001,
        extra("Bulwark Colossus", Xyz, "FIRE", "Rock", 2)
            .with_meta(keys::RANK, 4)
            .with_meta(keys::MATERIALS_MAX, 3),
    );
    pool.register(
        DEMO_XYZ_002,
        extra("Obsidian Warlord", Xyz, "FIRE", "Rock", 2)
            .with_meta(keys::RANK, 6)
            .with_meta(keys::MATERIALS_MAX, 2),
    );
    pool.register(
        DEMO_SYNCHRO_001,
        extra("Volcanic Seraph", Synchro, "FIRE", "Fairy", 2).with_meta(keys::LEVEL, 8),
    );
    pool.register(
        DEMO_FUSION_001,
        extra("Chimeric Pyrelord", Fusion, "FIRE", "Dragon", 2)
            .with_meta(keys::LEVEL, 8)
            .with_meta(keys::MATERIAL_ATTRIBUTE, "FIRE"),
    );

    // Spells.
    pool.register(DEMO_TUTOR_001, spell("Blazing Call", Spell));
    pool.register(DEMO_REVIVAL_001, spell("Rekindle", Spell));
    pool.register(DEMO_EQUIP_001, spell("Ember Blade", EquipSpell));
    pool.register(DEMO_EQUIP_002, spell("Phoenix Plume", EquipSpell));
    pool.register(DEMO_SALVAGE_001, spell("Ember Salvage", Spell));
    pool.register(DEMO_DRAW_001, spell("Stoke the Flames", Spell));
    pool.register(DEMO_FIELD_001, spell("Everburning City", FieldSpell));

    pool
}

/// A 40-card main deck over the pool, for dealt-hand exploration and benches.
#[must_use]
pub fn demo_deck() -> Vec<&'static str> {
    use ids::*;
    let counts: &[(&str, usize)] = &[
        (DEMO_EXTENDER_001, 3),
        (DEMO_EXTENDER_002, 3),
        (DEMO_EXTENDER_003, 2),
        (DEMO_EXTENDER_004, 2),
        (DEMO_SEARCHER_001, 3),
        (DEMO_SEARCHER_002, 2),
        (DEMO_RECRUITER_001, 2),
        (DEMO_LOADER_001, 2),
        (DEMO_RETRIEVER_001, 2),
        (DEMO_GOLEM_001, 1),
        (DEMO_LEVELER_001, 2),
        (DEMO_TRADER_001, 1),
        (DEMO_PHOENIX_001, 1),
        (DEMO_BLOCKER_001, 1),
        (DEMO_TITAN_001, 1),
        (DEMO_TUTOR_001, 3),
        (DEMO_REVIVAL_001, 2),
        (DEMO_EQUIP_001, 2),
        (DEMO_EQUIP_002, 2),
        (DEMO_SALVAGE_001, 1),
        (DEMO_DRAW_001, 1),
        (DEMO_FIELD_001, 1),
    ];
    let mut deck = Vec::with_capacity(40);
    for &(cid, n) in counts {
        for _ in 0..n {
            deck.push(cid);
        }
    }
    deck
}

/// The matching extra deck.
#[must_use]
pub fn demo_extra_deck() -> Vec<&'static str> {
    use ids::*;
    vec![
        DEMO_LINK1_001,
        DEMO_LINK2_001,
        DEMO_LINK3_001,
        DEMO_LINK4_001,
        DEMO_XYZ_001,
        DEMO_XYZ_002,
        DEMO_SYNCHRO_001,
        DEMO_FUSION_001,
    ]
}
