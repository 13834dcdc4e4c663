//! Runtime balance configuration.
//!
//! Every tunable number the simulation uses lives here. Defaults come from
//! `core::constants`; a TOML file can override any subset of them, missing
//! keys fall back to the default.

use super::constants::*;
use super::error::GameError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    // === LEVELING ===
    /// XP to advance from level L is `L * xp_per_level`.
    pub xp_per_level: u64,

    // === COMBAT RESOLUTION ===
    /// Defense needed to halve incoming damage.
    pub armor_constant: f64,
    /// Weight of defender defense in the hit-chance denominator.
    pub accuracy_defense_factor: f64,
    pub crit_multiplier: f64,
    pub player_crit_chance: f64,
    pub enemy_crit_chance: f64,
    pub enemy_growth: f64,

    // === COMBAT TIMING ===
    pub respawn_delay_ms: i64,
    pub attack_cadence_ms: i64,
    pub consumable_cooldown_ms: i64,
    /// Auto-eat triggers at or below this fraction of max hp.
    pub auto_eat_hp_fraction: f64,
    pub hp_per_hitpoints_level: u32,

    // === PRODUCTION ===
    pub min_tick_ms: u64,
    pub speed_bonus_per_upgrade: f64,
    pub max_speed_multiplier: f64,

    // === OFFLINE ===
    pub max_offline_seconds: u64,

    // === ENCHANTING ===
    pub max_enchant_tier: u8,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            xp_per_level: XP_PER_LEVEL_COEFFICIENT,
            armor_constant: ARMOR_CONSTANT,
            accuracy_defense_factor: ACCURACY_DEFENSE_FACTOR,
            crit_multiplier: BASE_CRIT_MULTIPLIER,
            player_crit_chance: PLAYER_BASE_CRIT_CHANCE,
            enemy_crit_chance: ENEMY_CRIT_CHANCE,
            enemy_growth: ENEMY_GROWTH,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            attack_cadence_ms: ATTACK_CADENCE_MS,
            consumable_cooldown_ms: CONSUMABLE_COOLDOWN_MS,
            auto_eat_hp_fraction: AUTO_EAT_HP_FRACTION,
            hp_per_hitpoints_level: HP_PER_HITPOINTS_LEVEL,
            min_tick_ms: MIN_TICK_MS,
            speed_bonus_per_upgrade: SPEED_BONUS_PER_UPGRADE,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
            max_offline_seconds: MAX_OFFLINE_SECONDS,
            max_enchant_tier: MAX_ENCHANT_TIER,
        }
    }
}

impl Balance {
    /// Parses a TOML document, keeping defaults for absent keys.
    pub fn from_toml_str(content: &str) -> Result<Self, GameError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads balance overrides from a TOML file.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let balance = Balance::default();
        assert_eq!(balance.xp_per_level, 150);
        assert_eq!(balance.armor_constant, 300.0);
        assert_eq!(balance.accuracy_defense_factor, 0.5);
        assert_eq!(balance.crit_multiplier, 1.5);
        assert_eq!(balance.respawn_delay_ms, 2000);
        assert_eq!(balance.attack_cadence_ms, 1000);
        assert_eq!(balance.max_offline_seconds, 43_200);
        assert_eq!(balance.max_speed_multiplier, 5.0);
        assert_eq!(balance.min_tick_ms, 200);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let balance = Balance::from_toml_str("xp_per_level = 200\nrespawn_delay_ms = 500\n")
            .expect("valid toml");
        assert_eq!(balance.xp_per_level, 200);
        assert_eq!(balance.respawn_delay_ms, 500);
        assert_eq!(balance.armor_constant, ARMOR_CONSTANT);
        assert_eq!(balance.max_enchant_tier, MAX_ENCHANT_TIER);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Balance::from_toml_str("xp_per_level = \"lots\"").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("balance.toml");
        fs::write(&path, "max_offline_seconds = 60\n").expect("write");
        let balance = Balance::load(&path).expect("load");
        assert_eq!(balance.max_offline_seconds, 60);
    }
}
