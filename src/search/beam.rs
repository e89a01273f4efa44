//! Bounded beam search over combo lines.
//!
//! One searching player, one turn, no hidden information: the frontier
//! of states IS the search, there is no phase machine around it. Each
//! round every beam state generates all legal children (core mechanics
//! and card abilities), children are deduplicated by canonical state
//! hash, scored through the evaluator, and the next beam is selected
//! with reserved slots for setup states so staging lines survive being
//! outscored by finished boards.
//!
//! Determinism contract: identical input state and config produce a
//! bit-identical outcome. Every branching point is ordered (action
//! lists by canonical text, children by `(score, hash)` descending,
//! ties on the best result by hash), and nothing ever iterates a hash
//! map to decide anything.
//!
//! Two closure passes run after the main loop: narrow beams that chase
//! only the equip objective (attach actions first, then targeted
//! summons of equip-capable bodies, then a bare placement fallback)
//! and fold any improvement into the best result.

use std::cmp::Ordering;
use std::time::Instant;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::ApplyError;
use crate::effects::combinators::params;
use crate::effects::{EffectAction, EffectRegistry};
use crate::rules;
use crate::state::{decode_field_pos, state_hash, GameState};

use super::config::SearchConfig;
use super::evaluator::{BoardEvaluator, BoardScore, EquipCountEvaluator};
use super::snapshot::BoardSnapshot;
use super::stats::SearchStats;

/// The best line a search found.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The endboard state.
    pub state: GameState,

    /// Its evaluation.
    pub score: BoardScore,

    /// The actions that reach it from the start state, in order.
    pub line: Vec<EffectAction>,

    /// Canonical hash of the endboard.
    pub hash: u64,

    /// Diagnostics from the run that produced it.
    pub stats: SearchStats,
}

/// One frontier entry: a state plus the line that reached it.
#[derive(Clone)]
struct Candidate {
    state: GameState,
    line: Vector<EffectAction>,
    score: BoardScore,
    hash: u64,
}

/// What the closure passes are allowed to try.
#[derive(Clone, Copy)]
enum ClosureMode {
    /// Attach actions only.
    EquipsOnly,
    /// Attach actions, targeted summons of equip-capable bodies, and a
    /// placement fallback when neither exists.
    Extended,
}

/// Beam search context.
///
/// Owns the configuration and evaluator; borrows the registry, which is
/// immutable and shared across searches.
pub struct ComboSearch<'a> {
    registry: &'a EffectRegistry,
    evaluator: Box<dyn BoardEvaluator + 'a>,
    config: SearchConfig,
    stats: SearchStats,
}

impl<'a> ComboSearch<'a> {
    /// Create a search over `registry` with the default equip-chasing
    /// evaluator.
    pub fn new(registry: &'a EffectRegistry, config: SearchConfig) -> Self {
        Self {
            registry,
            evaluator: Box::new(EquipCountEvaluator),
            config,
            stats: SearchStats::default(),
        }
    }

    /// Swap in a custom evaluator.
    pub fn with_evaluator<E: BoardEvaluator + 'a>(mut self, evaluator: E) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Statistics from the most recent run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search from `start` and return the best line found.
    ///
    /// An action that turns out illegal at application is dropped and
    /// counted; a model defect aborts the run.
    pub fn run(&mut self, start: &GameState) -> Result<SearchOutcome, ApplyError> {
        let begin = Instant::now();
        self.stats.reset();

        let mut seed = start.clone_step();
        seed.derive_events();
        let hash = state_hash(&seed);
        let score = self.score(&seed);
        let root = Candidate { state: seed, line: Vector::new(), score, hash };

        let mut seen: FxHashSet<u64> = FxHashSet::default();
        seen.insert(root.hash);
        let mut best = root.clone();
        let mut beam = vec![root];

        for _ in 0..self.config.max_depth {
            let mut children = Vec::new();
            for parent in &beam {
                self.expand(parent, &mut seen, &mut children)?;
            }
            if children.is_empty() {
                break;
            }
            self.stats.rounds += 1;

            sort_descending(&mut children);
            for child in &children {
                self.fold_best(&mut best, child);
            }
            beam = self.select_beam(children);
        }

        let before = best.hash;
        self.closure_pass(&mut best, ClosureMode::EquipsOnly, self.config.closure_equip_depth)?;
        if best.hash != before {
            self.stats.closure_improvements += 1;
        }
        let before = best.hash;
        self.closure_pass(&mut best, ClosureMode::Extended, self.config.closure_extend_depth)?;
        if best.hash != before {
            self.stats.closure_improvements += 1;
        }

        self.stats.time_us = begin.elapsed().as_micros() as u64;
        Ok(SearchOutcome {
            state: best.state,
            score: best.score,
            line: best.line.iter().cloned().collect(),
            hash: best.hash,
            stats: self.stats.clone(),
        })
    }

    /// All legal actions from a state: core mechanics first, then card
    /// abilities, each block already canonically ordered.
    fn all_actions(&self, state: &GameState) -> Vec<EffectAction> {
        let mut actions = rules::enumerate_core_actions(state);
        actions.extend(self.registry.enumerate_effect_actions(state));
        actions
    }

    fn apply(&self, state: &GameState, action: &EffectAction) -> Result<GameState, ApplyError> {
        if rules::is_core_action(&action.effect_id) {
            rules::apply_core_action(state, action)
        } else {
            self.registry.apply_effect_action(state, action)
        }
    }

    fn score(&mut self, state: &GameState) -> BoardScore {
        self.stats.scored += 1;
        self.evaluator.evaluate(&BoardSnapshot::project(state))
    }

    /// Generate, apply, dedup and score every child of `parent`.
    fn expand(
        &mut self,
        parent: &Candidate,
        seen: &mut FxHashSet<u64>,
        out: &mut Vec<Candidate>,
    ) -> Result<(), ApplyError> {
        for action in self.all_actions(&parent.state) {
            self.push_child(parent, action, seen, out)?;
        }
        Ok(())
    }

    /// Apply one action; a dead end is dropped, a defect propagates.
    fn push_child(
        &mut self,
        parent: &Candidate,
        action: EffectAction,
        seen: &mut FxHashSet<u64>,
        out: &mut Vec<Candidate>,
    ) -> Result<(), ApplyError> {
        match self.apply(&parent.state, &action) {
            Ok(mut state) => {
                state.derive_events();
                self.stats.generated += 1;
                let hash = state_hash(&state);
                if !seen.insert(hash) {
                    self.stats.deduped += 1;
                    return Ok(());
                }
                let score = self.score(&state);
                let mut line = parent.line.clone();
                line.push_back(action);
                out.push(Candidate { state, line, score, hash });
                Ok(())
            }
            Err(err) if err.is_illegal() => {
                self.stats.illegal += 1;
                Ok(())
            }
            Err(defect) => Err(defect),
        }
    }

    /// Replace the best result if `child` beats it under the tie rules.
    fn fold_best(&self, best: &mut Candidate, child: &Candidate) {
        let better = match child.score.cmp(&best.score) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                if self.config.prefer_longest && child.line.len() != best.line.len() {
                    child.line.len() > best.line.len()
                } else {
                    child.hash > best.hash
                }
            }
        };
        if better {
            *best = child.clone();
        }
    }

    /// Beam slots reserved for setup states.
    fn setup_slots(&self, width: usize) -> usize {
        let reserved = (width as f64 * self.config.setup_fraction).round() as usize;
        reserved.max(self.config.setup_min).min(width.saturating_sub(1))
    }

    /// Diversified selection over score-descending `children`: the best
    /// states overall, plus reserved slots for the best setup states.
    fn select_beam(&self, children: Vec<Candidate>) -> Vec<Candidate> {
        let width = self.config.beam_width.max(1);
        if children.len() <= width {
            return children;
        }
        let setup = self.setup_slots(width);
        let general = width - setup;

        let mut keep = vec![false; children.len()];
        let mut kept = 0;
        for flag in keep.iter_mut().take(general) {
            *flag = true;
            kept += 1;
        }
        let mut reserved = 0;
        for (i, child) in children.iter().enumerate().skip(general) {
            if reserved == setup {
                break;
            }
            if !child.score.reached_target {
                keep[i] = true;
                kept += 1;
                reserved += 1;
            }
        }
        // Fewer setup states than slots: hand the rest to the best remainder.
        for flag in keep.iter_mut() {
            if kept == width {
                break;
            }
            if !*flag {
                *flag = true;
                kept += 1;
            }
        }

        children
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep[*i])
            .map(|(_, child)| child)
            .collect()
    }

    /// A narrow beam from the best result that only chases the equip
    /// objective, folding improvements back in.
    fn closure_pass(
        &mut self,
        best: &mut Candidate,
        mode: ClosureMode,
        depth: usize,
    ) -> Result<(), ApplyError> {
        let mut seen: FxHashSet<u64> = FxHashSet::default();
        seen.insert(best.hash);
        let mut beam = vec![best.clone()];

        for _ in 0..depth {
            let mut children = Vec::new();
            for parent in &beam {
                for action in self.closure_actions(&parent.state, mode) {
                    self.push_child(parent, action, &mut seen, &mut children)?;
                }
            }
            if children.is_empty() {
                break;
            }
            sort_descending(&mut children);
            for child in &children {
                self.fold_best(best, child);
            }
            children.truncate(self.config.closure_width.max(1));
            beam = children;
        }
        Ok(())
    }

    /// The restricted action menu of a closure pass.
    fn closure_actions(&self, state: &GameState, mode: ClosureMode) -> Vec<EffectAction> {
        let mut actions: Vec<EffectAction> = self
            .registry
            .enumerate_effect_actions(state)
            .into_iter()
            .filter(|a| a.effect_id.starts_with("equip"))
            .collect();

        if matches!(mode, ClosureMode::Extended) {
            actions.extend(self.equip_body_summons(state));
            if actions.is_empty() {
                actions.extend(self.placement_fallback(state));
            }
        }
        actions.sort_by_cached_key(EffectAction::canon);
        actions
    }

    /// Extra-deck summons that put an equip-capable body on board without
    /// spending a monster that already wears an equip.
    fn equip_body_summons(&self, state: &GameState) -> Vec<EffectAction> {
        rules::enumerate_extra_summons(state)
            .into_iter()
            .filter(|action| {
                if !self.registry.has_equip_effect(&action.cid) {
                    return false;
                }
                !self.spends_equipped_body(state, action)
            })
            .collect()
    }

    /// Does this summon consume a material that carries equips?
    fn spends_equipped_body(&self, state: &GameState, action: &EffectAction) -> bool {
        let Ok(codes) = action.params.int_list(params::MATERIALS) else {
            return false;
        };
        codes.iter().any(|&code| {
            decode_field_pos(code)
                .and_then(|(zone, index)| state.field.monster_slot(zone, index))
                .is_some_and(|h| state.card(h).carries_equips())
        })
    }

    /// Last resort: just add a body, so a held equip has a host next pass.
    fn placement_fallback(&self, state: &GameState) -> Vec<EffectAction> {
        let mut out = rules::enumerate_special_summons(state);
        out.extend(
            self.registry
                .enumerate_effect_actions(state)
                .into_iter()
                .filter(|a| a.effect_id.starts_with("special_summon_self")),
        );
        out
    }
}

/// Descending by score, hash as the deterministic tie-break.
fn sort_descending(children: &mut [Candidate]) {
    children.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.hash.cmp(&a.hash)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::demo::{demo_pool, ids};
    use crate::cards::MetaProvider;
    use crate::state::Zone;

    fn registry() -> EffectRegistry {
        EffectRegistry::standard()
    }

    fn state_with(hand: &[&str], extra: &[&str], deck: &[&str]) -> GameState {
        let pool = demo_pool();
        let mut state = GameState::new();
        for cid in deck {
            let h = state.add_card(*cid, pool.resolve(cid, None));
            state.push_to(Zone::Deck, h);
        }
        for cid in hand {
            let h = state.add_card(*cid, pool.resolve(cid, None));
            state.push_to(Zone::Hand, h);
        }
        for cid in extra {
            let h = state.add_card(*cid, pool.resolve(cid, None));
            state.push_to(Zone::Extra, h);
        }
        state
    }

    #[test]
    fn test_empty_state_returns_start() {
        let registry = registry();
        let state = GameState::new();
        let mut search = ComboSearch::new(&registry, SearchConfig::default());
        let outcome = search.run(&state).unwrap();

        assert!(outcome.line.is_empty());
        assert_eq!(outcome.hash, state_hash(&state));
    }

    #[test]
    fn test_finds_summon_then_equip_line() {
        // One extender, one equip in hand: best board wears the blade.
        let registry = registry();
        let state = state_with(&[ids::DEMO_EXTENDER_001, ids::DEMO_EQUIP_001], &[], &[]);
        let config = SearchConfig::default().with_beam_width(8).with_max_depth(4);
        let outcome = ComboSearch::new(&registry, config).run(&state).unwrap();

        assert!(outcome.score.reached_target);
        assert_eq!(outcome.score.rank_key[0], 1);
        // Some summon route, then the attach. Both summon routes tie on
        // score, so only the shape is pinned down.
        assert_eq!(outcome.line.len(), 2);
        assert_eq!(outcome.line[0].cid, ids::DEMO_EXTENDER_001);
        assert_eq!(outcome.line[1].effect_id, "equip_from_hand");
    }

    #[test]
    fn test_deterministic_across_runs() {
        let registry = registry();
        let state = state_with(
            &[ids::DEMO_EXTENDER_001, ids::DEMO_EXTENDER_002, ids::DEMO_EQUIP_001],
            &[ids::DEMO_LINK1_001, ids::DEMO_LINK2_001],
            &[ids::DEMO_SEARCHER_001, ids::DEMO_EXTENDER_003],
        );
        let config = SearchConfig::default().with_beam_width(6).with_max_depth(5);

        let a = ComboSearch::new(&registry, config.clone()).run(&state).unwrap();
        let b = ComboSearch::new(&registry, config).run(&state).unwrap();

        assert_eq!(a.hash, b.hash);
        assert_eq!(a.line, b.line);
        assert_eq!(a.score, b.score);
        assert_eq!(a.state, b.state);
    }

    #[test]
    fn test_input_state_never_mutated() {
        let registry = registry();
        let state = state_with(&[ids::DEMO_EXTENDER_001, ids::DEMO_EQUIP_001], &[], &[]);
        let fingerprint = state_hash(&state);

        let config = SearchConfig::default().with_beam_width(4).with_max_depth(3);
        ComboSearch::new(&registry, config).run(&state).unwrap();

        assert_eq!(state_hash(&state), fingerprint);
        assert_eq!(state.hand.len(), 2);
    }

    #[test]
    fn test_line_replays_to_reported_state() {
        let registry = registry();
        let state = state_with(
            &[ids::DEMO_EXTENDER_001, ids::DEMO_EXTENDER_002, ids::DEMO_EQUIP_001],
            &[ids::DEMO_LINK2_001],
            &[],
        );
        let config = SearchConfig::default().with_beam_width(8).with_max_depth(6);
        let mut search = ComboSearch::new(&registry, config);
        let outcome = search.run(&state).unwrap();

        let mut replay = state.clone_step();
        replay.derive_events();
        for action in &outcome.line {
            replay = if rules::is_core_action(&action.effect_id) {
                rules::apply_core_action(&replay, action).unwrap()
            } else {
                registry.apply_effect_action(&replay, action).unwrap()
            };
            replay.derive_events();
        }
        assert_eq!(state_hash(&replay), outcome.hash);
    }

    #[test]
    fn test_closure_pass_attaches_leftover_equip() {
        // Depth 0 main loop: only the closure passes may act. The blade
        // cannot attach without a body, so the extended pass must place
        // one first, then attach.
        let registry = registry();
        let state = state_with(&[ids::DEMO_EXTENDER_001, ids::DEMO_EQUIP_001], &[], &[]);
        let config = SearchConfig::default().with_beam_width(4).with_max_depth(0);
        let mut search = ComboSearch::new(&registry, config);
        let outcome = search.run(&state).unwrap();

        assert!(outcome.score.reached_target);
        assert_eq!(outcome.line.len(), 2);
        assert!(outcome.stats.closure_improvements > 0);
    }

    #[test]
    fn test_normal_summon_emits_trigger_for_herald() {
        // Herald's search trigger only fires off its own normal summon;
        // the search must route through the core action to reach it.
        let registry = registry();
        let state = state_with(
            &[ids::DEMO_SEARCHER_001],
            &[],
            &[ids::DEMO_EXTENDER_002, ids::DEMO_EQUIP_001],
        );
        let config = SearchConfig::default().with_beam_width(8).with_max_depth(3);
        let outcome = ComboSearch::new(&registry, config).run(&state).unwrap();

        assert!(outcome
            .line
            .iter()
            .any(|a| a.effect_id == rules::NORMAL_SUMMON));
        assert!(outcome.line.iter().any(|a| a.effect_id == "search_on_summon"));
    }
}
