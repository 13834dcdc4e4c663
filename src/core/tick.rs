//! Tick dispatch and the live scheduler.
//!
//! Production and combat ticks are pure: each returns a [`TickOutcome`] whose
//! patch the caller merges. [`Ticker`] owns the only loop that merges them, so
//! a live session and an offline catch-up advance a snapshot identically.

use crate::combat::logic::combat_tick;
use crate::core::balance::Balance;
use crate::core::game_state::{ActiveAction, StatePatch, StateSnapshot};
use crate::items::{Catalog, ItemId};
use crate::skills::logic::production_tick;
use crate::skills::Skill;
use rand::Rng;

/// Read-only inputs shared by every tick.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    pub catalog: Catalog,
    pub balance: Balance,
}

impl Ruleset {
    pub fn new(catalog: Catalog, balance: Balance) -> Self {
        Self { catalog, balance }
    }

    /// Built-in content with default balance.
    pub fn standard() -> Self {
        Self::new(Catalog::standard(), Balance::default())
    }
}

/// Something that happened during a tick.
///
/// Events are informational only. Refusals and terminal transitions are
/// reported here; the state change itself is always in the patch.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Production ──────────────────────────────────────────────
    ItemProduced {
        item: ItemId,
        skill: Skill,
        xp_gained: u64,
    },
    /// Inputs ran out; the action was cancelled without consuming anything.
    ProductionStalled {
        resource_id: String,
        missing: ItemId,
    },

    // ── Progression ─────────────────────────────────────────────
    LeveledUp {
        skill: Skill,
        level: u32,
    },

    // ── Combat ──────────────────────────────────────────────────
    EnemySpawned {
        map_id: u32,
        enemy_name: String,
    },
    PlayerAttack {
        damage: u32,
        was_crit: bool,
        message: String,
    },
    EnemyAttack {
        damage: u32,
        was_crit: bool,
        message: String,
    },
    EnemyDefeated {
        map_id: u32,
        enemy_name: String,
        xp_gained: u64,
    },
    LootDropped {
        item: ItemId,
        amount: u64,
    },
    MapAdvanced {
        map_id: u32,
    },
    /// Auto-progress stopped in front of a boss the player has no key for.
    AdvanceBlocked {
        map_id: u32,
        key: String,
    },
    /// A boss respawn found no key; combat stopped.
    OutOfKeys {
        map_id: u32,
        key: String,
    },
    PlayerDefeated {
        map_id: u32,
        message: String,
    },
    ConsumableEaten {
        item: ItemId,
        healed: u32,
    },
}

/// Result of one tick: a partial successor state plus what happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub patch: StatePatch,
    pub events: Vec<TickEvent>,
}

impl TickOutcome {
    pub fn new(patch: StatePatch) -> Self {
        Self {
            patch,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    pub fn is_noop(&self) -> bool {
        self.patch.is_empty() && self.events.is_empty()
    }
}

/// Drives whichever action is active on a snapshot.
///
/// Combat receives the elapsed time directly. Production banks elapsed time
/// in the action's `progress_ms` and fires one tick per full `tick_ms`, so a
/// 1s step over a 3s action produces every third step. The bank lives on the
/// snapshot, so splitting a duration across calls lands in the same place.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ticker;

impl Ticker {
    pub fn new() -> Self {
        Self
    }

    /// Advances `state` by `elapsed_ms`, merging every patch in order.
    pub fn advance(
        &self,
        state: &mut StateSnapshot,
        rules: &Ruleset,
        elapsed_ms: u64,
        rng: &mut impl Rng,
    ) -> Vec<TickEvent> {
        let mut events = Vec::new();

        match &state.active_action {
            None => {}
            Some(ActiveAction::Combat) => {
                let elapsed = i64::try_from(elapsed_ms).unwrap_or(i64::MAX);
                let outcome = combat_tick(state, rules, elapsed, rng);
                events.extend(outcome.events);
                state.apply(outcome.patch);
            }
            Some(ActiveAction::Production {
                tick_ms,
                progress_ms,
                ..
            }) => {
                let interval = (*tick_ms).max(rules.balance.min_tick_ms).max(1);
                let mut banked = progress_ms.saturating_add(elapsed_ms);
                while banked >= interval {
                    banked -= interval;
                    let outcome = production_tick(state, rules);
                    events.extend(outcome.events);
                    state.apply(outcome.patch);
                    if !matches!(state.active_action, Some(ActiveAction::Production { .. })) {
                        return events;
                    }
                }
                if let Some(ActiveAction::Production { progress_ms, .. }) = &mut state.active_action
                {
                    *progress_ms = banked;
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::logic::start_production;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn gathering_state(rules: &Ruleset) -> StateSnapshot {
        let mut state = StateSnapshot::new(rules.balance.hp_per_hitpoints_level);
        let patch = start_production(&state, rules, Skill::Woodcutting, "logs").unwrap();
        state.apply(patch);
        state
    }

    #[test]
    fn test_idle_state_is_untouched() {
        let rules = Ruleset::standard();
        let mut state = StateSnapshot::new(10);
        let before = state.clone();
        let ticker = Ticker::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let events = ticker.advance(&mut state, &rules, 5_000, &mut rng);
        assert!(events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_production_fires_per_full_interval() {
        let rules = Ruleset::standard();
        let mut state = gathering_state(&rules);
        let ticker = Ticker::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // logs take 3000ms
        for _ in 0..2 {
            ticker.advance(&mut state, &rules, 1_000, &mut rng);
        }
        assert_eq!(state.item_count(&ItemId::new("logs")), 0);
        assert_eq!(state.production_progress_ms(), 2_000);

        ticker.advance(&mut state, &rules, 1_000, &mut rng);
        assert_eq!(state.item_count(&ItemId::new("logs")), 1);
        assert_eq!(state.production_progress_ms(), 0);
    }

    #[test]
    fn test_large_step_runs_several_ticks() {
        let rules = Ruleset::standard();
        let mut state = gathering_state(&rules);
        let ticker = Ticker::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let events = ticker.advance(&mut state, &rules, 10_000, &mut rng);
        assert_eq!(state.item_count(&ItemId::new("logs")), 3);
        assert_eq!(state.production_progress_ms(), 1_000);
        let produced = events
            .iter()
            .filter(|e| matches!(e, TickEvent::ItemProduced { .. }))
            .count();
        assert_eq!(produced, 3);
    }

    #[test]
    fn test_split_steps_match_one_step() {
        let rules = Ruleset::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut whole = gathering_state(&rules);
        let mut split = whole.clone();

        Ticker::new().advance(&mut whole, &rules, 7_500, &mut rng);
        for _ in 0..15 {
            Ticker::new().advance(&mut split, &rules, 500, &mut rng);
        }

        assert_eq!(split, whole);
        assert_eq!(whole.item_count(&ItemId::new("logs")), 2);
        assert_eq!(whole.production_progress_ms(), 1_500);
    }

    #[test]
    fn test_restarting_production_clears_the_bank() {
        let rules = Ruleset::standard();
        let mut state = gathering_state(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        Ticker::new().advance(&mut state, &rules, 2_000, &mut rng);
        assert_eq!(state.production_progress_ms(), 2_000);

        state.apply(start_production(&state, &rules, Skill::Mining, "copper_ore").unwrap());
        assert_eq!(state.production_progress_ms(), 0);
    }

    #[test]
    fn test_stalled_production_drops_pending_time() {
        let rules = Ruleset::standard();
        let mut state = StateSnapshot::new(10);
        state.inventory.insert(ItemId::new("raw_shrimp"), 1);
        state.apply(start_production(&state, &rules, Skill::Cooking, "shrimp").unwrap());

        let ticker = Ticker::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let events = ticker.advance(&mut state, &rules, 10_000, &mut rng);

        assert_eq!(state.item_count(&ItemId::new("shrimp")), 1);
        assert!(state.is_idle());
        assert_eq!(state.production_progress_ms(), 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, TickEvent::ProductionStalled { .. })));
    }
}
