//! Offline catch-up.
//!
//! Replays the elapsed time one simulated second at a time through the same
//! [`Ticker`] a live session uses, then diffs the start and end snapshots
//! into a report for the catch-up screen.

use super::constants::OFFLINE_STEP_MS;
use super::game_state::StateSnapshot;
use super::progression::cumulative_xp;
use super::tick::{Ruleset, TickEvent, Ticker};
use crate::items::ItemId;
use crate::skills::Skill;
use chrono::Utc;
use rand::Rng;
use std::collections::BTreeMap;

/// Net effect of an offline replay.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    /// Seconds asked for, before the cap.
    pub seconds_requested: u64,
    pub seconds_simulated: u64,
    /// Per-skill XP earned, positive deltas only.
    pub xp_gained: BTreeMap<Skill, u64>,
    pub levels_gained: BTreeMap<Skill, u32>,
    /// Per-item count increase, positive deltas only.
    pub items_gained: BTreeMap<ItemId, u64>,
    pub coins_gained: u64,
    pub kills: u32,
    pub deaths: u32,
    /// The active action ended before the time ran out.
    pub went_idle: bool,
}

impl OfflineReport {
    pub fn has_gains(&self) -> bool {
        !self.xp_gained.is_empty() || !self.items_gained.is_empty() || self.coins_gained > 0
    }

    /// Human-readable lines for the catch-up report.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Simulated {}s of {}s away",
            self.seconds_simulated, self.seconds_requested
        )];
        for (skill, xp) in &self.xp_gained {
            match self.levels_gained.get(skill) {
                Some(levels) => lines.push(format!("{skill}: +{xp} xp (+{levels} levels)")),
                None => lines.push(format!("{skill}: +{xp} xp")),
            }
        }
        for (item, count) in &self.items_gained {
            lines.push(format!("{item}: +{count}"));
        }
        if self.coins_gained > 0 {
            lines.push(format!("Coins: +{}", self.coins_gained));
        }
        if self.kills > 0 || self.deaths > 0 {
            lines.push(format!("Kills: {}, deaths: {}", self.kills, self.deaths));
        }
        lines
    }
}

/// Seconds between a saved unix timestamp and now; 0 if the clock went back.
pub fn seconds_since(last_save_time: i64) -> u64 {
    let elapsed = Utc::now().timestamp() - last_save_time;
    u64::try_from(elapsed).unwrap_or(0)
}

/// Fast-forwards `state` by `elapsed_seconds`, capped at the balance maximum.
///
/// Stops early as soon as no action is active.
pub fn replay(
    state: &StateSnapshot,
    rules: &Ruleset,
    elapsed_seconds: u64,
    rng: &mut impl Rng,
) -> (StateSnapshot, OfflineReport) {
    let capped = elapsed_seconds.min(rules.balance.max_offline_seconds);
    let mut current = state.clone();
    let ticker = Ticker::new();

    let mut simulated = 0;
    let mut kills = 0;
    let mut deaths = 0;
    while simulated < capped {
        if current.is_idle() {
            break;
        }
        for event in ticker.advance(&mut current, rules, OFFLINE_STEP_MS as u64, rng) {
            match event {
                TickEvent::EnemyDefeated { .. } => kills += 1,
                TickEvent::PlayerDefeated { .. } => deaths += 1,
                _ => {}
            }
        }
        simulated += 1;
    }

    let mut report = summarize(state, &current, rules.balance.xp_per_level);
    report.seconds_requested = elapsed_seconds;
    report.seconds_simulated = simulated;
    report.kills = kills;
    report.deaths = deaths;
    report.went_idle = current.is_idle() && simulated < capped;

    tracing::debug!(
        requested = elapsed_seconds,
        simulated,
        kills,
        deaths,
        "offline replay finished"
    );
    (current, report)
}

/// Positive XP, level, item and coin deltas between two snapshots.
///
/// XP is compared as total earned so a level-up does not hide the gain.
pub fn summarize(before: &StateSnapshot, after: &StateSnapshot, xp_per_level: u64) -> OfflineReport {
    let mut report = OfflineReport::default();

    for skill in Skill::all() {
        let old = before.skill(skill);
        let new = after.skill(skill);
        let old_total = cumulative_xp(old.level, old.xp, xp_per_level);
        let new_total = cumulative_xp(new.level, new.xp, xp_per_level);
        if new_total > old_total {
            report.xp_gained.insert(skill, new_total - old_total);
        }
        if new.level > old.level {
            report.levels_gained.insert(skill, new.level - old.level);
        }
    }

    for (item, &count) in &after.inventory {
        let old = before.item_count(item);
        if count > old {
            report.items_gained.insert(item.clone(), count - old);
        }
    }

    report.coins_gained = after.coins.saturating_sub(before.coins);
    report
}
