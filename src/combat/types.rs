use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::balance::Balance;
use crate::core::constants::{
    COMBAT_LOG_CAPACITY, ENEMY_DEFENSE_PER_MAP, ENEMY_GROWTH_EXPONENT_PER_MAP,
};
use crate::core::game_state::StateSnapshot;
use crate::items::{Catalog, ItemStats};
use crate::maps::CombatMap;
use crate::skills::Skill;

/// Mutable combat progress.
///
/// Only `hp`, `current_map_id`, `max_map_completed` and `prepaid_spawn`
/// survive a save; the rest is rebuilt on the next spawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombatRunState {
    /// Player hp.
    pub hp: u32,
    pub current_map_id: Option<u32>,
    /// Highest map id cleared, 0 before the first victory.
    pub max_map_completed: u32,
    /// Live enemy hp, `None` while respawning.
    #[serde(skip)]
    pub enemy_hp: Option<u32>,
    #[serde(skip)]
    pub respawn_ms: i64,
    #[serde(skip)]
    pub attack_cooldown_ms: i64,
    #[serde(skip)]
    pub consumable_cooldown_ms: i64,
    /// A boss key was already spent for the next spawn.
    #[serde(default)]
    pub prepaid_spawn: bool,
    /// Newest entry first.
    #[serde(skip)]
    pub log: VecDeque<String>,
}

/// Coarse phase of a combat run, derived from [`CombatRunState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    Idle,
    Respawning,
    Fighting,
}

impl CombatRunState {
    pub fn phase(&self) -> CombatPhase {
        match (self.current_map_id, self.enemy_hp) {
            (None, _) => CombatPhase::Idle,
            (Some(_), Some(hp)) if hp > 0 => CombatPhase::Fighting,
            (Some(_), _) => CombatPhase::Respawning,
        }
    }

    /// Adds a log line, dropping the oldest past capacity.
    pub fn push_log(&mut self, message: impl Into<String>) {
        self.log.push_front(message.into());
        self.log.truncate(COMBAT_LOG_CAPACITY);
    }

    /// Back to idle, keeping hp, progression and the log.
    pub fn reset_to_idle(&mut self) {
        self.current_map_id = None;
        self.enemy_hp = None;
        self.respawn_ms = 0;
        self.attack_cooldown_ms = 0;
        self.prepaid_spawn = false;
    }
}

/// Stats one side brings into a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Combatant {
    pub accuracy: f64,
    pub strength: f64,
    /// Flat max-hit bonus from gear.
    pub damage_bonus: f64,
    pub defense: f64,
    /// 0.0-1.0
    pub crit_chance: f64,
}

/// Enemy of a map after map-id scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyStats {
    pub name: String,
    pub max_hp: u32,
    pub combatant: Combatant,
}

/// Growth factor `growth^(map_id * 0.5)`.
pub fn map_scaling(map_id: u32, growth: f64) -> f64 {
    growth.powf(map_id as f64 * ENEMY_GROWTH_EXPONENT_PER_MAP)
}

pub fn enemy_stats(map: &CombatMap, balance: &Balance) -> EnemyStats {
    let scale = map_scaling(map.id, balance.enemy_growth);
    let linear = (map.id * ENEMY_DEFENSE_PER_MAP) as f64;
    EnemyStats {
        name: map.enemy_name.clone(),
        max_hp: ((map.enemy_hp as f64 * scale).floor() as u32).max(1),
        combatant: Combatant {
            accuracy: linear,
            strength: map.enemy_attack as f64 * scale,
            damage_bonus: 0.0,
            defense: linear,
            crit_chance: balance.enemy_crit_chance,
        },
    }
}

/// Summed, enchant-scaled bonuses of everything equipped.
pub fn gear_stats(state: &StateSnapshot, catalog: &Catalog) -> ItemStats {
    let mut total = ItemStats::default();
    for (_, item) in state.equipment.iter_equipped() {
        if let Some(resource) = catalog.resource(&item.base) {
            total.add(&resource.stats.scaled(item.tier));
        }
    }
    total
}

/// The player's side of an exchange: attack feeds accuracy, the style skill
/// feeds strength, defense plus armor feeds defense.
pub fn player_combatant(state: &StateSnapshot, catalog: &Catalog, balance: &Balance) -> Combatant {
    let gear = gear_stats(state, catalog);
    Combatant {
        accuracy: state.skill_level(Skill::Attack) as f64 + gear.accuracy,
        strength: state.skill_level(state.combat_style.skill()) as f64,
        damage_bonus: gear.strength,
        defense: state.skill_level(Skill::Defense) as f64 + gear.armor,
        crit_chance: balance.player_crit_chance + gear.crit_chance,
    }
}
