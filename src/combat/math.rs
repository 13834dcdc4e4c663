//! Single-hit resolution shared by the player and enemy sides.
//!
//! These pure functions only read the combatants and draw from the injected
//! RNG; the combat tick decides what to do with the result.

use super::types::Combatant;
use crate::core::balance::Balance;
use crate::core::constants::{
    DAMAGE_VARIANCE_MAX, DAMAGE_VARIANCE_MIN, MAX_HIT_BASE, MAX_HIT_PER_STRENGTH,
};
use rand::Rng;

/// Outcome of one attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Whether the accuracy roll succeeded.
    pub landed: bool,
    /// Damage dealt; at least 1 whenever `landed`.
    pub final_damage: u32,
    pub is_crit: bool,
    /// Raw damage removed by the defender's armor.
    pub mitigation: f64,
}

impl HitResult {
    pub fn miss() -> Self {
        Self {
            landed: false,
            final_damage: 0,
            is_crit: false,
            mitigation: 0.0,
        }
    }
}

/// `accuracy / (accuracy + defense * factor)`, clamped to 0.0-1.0.
///
/// Two zero-rated sides always hit.
pub fn hit_chance(attacker: &Combatant, defender: &Combatant, balance: &Balance) -> f64 {
    let accuracy = attacker.accuracy.max(0.0);
    let denominator = accuracy + defender.defense.max(0.0) * balance.accuracy_defense_factor;
    if denominator <= 0.0 {
        return 1.0;
    }
    (accuracy / denominator).clamp(0.0, 1.0)
}

/// `1 + strength * 0.8 + gear bonus`.
pub fn max_hit(attacker: &Combatant) -> f64 {
    MAX_HIT_BASE + attacker.strength * MAX_HIT_PER_STRENGTH + attacker.damage_bonus
}

/// Fraction of damage removed: `defense / (defense + armor_constant)`.
pub fn damage_reduction(defense: f64, armor_constant: f64) -> f64 {
    let defense = defense.max(0.0);
    let denominator = defense + armor_constant;
    if denominator <= 0.0 {
        return 0.0;
    }
    defense / denominator
}

/// Resolves one attack:
/// 1. accuracy roll, a miss ends here
/// 2. crit roll; a crit deals `max_hit * crit_multiplier`, otherwise a
///    uniform integer in `[1, floor(max_hit)]`
/// 3. armor mitigation
/// 4. 0.9-1.1 variance
/// 5. floor with a minimum of 1
pub fn resolve_hit(
    attacker: &Combatant,
    defender: &Combatant,
    balance: &Balance,
    rng: &mut impl Rng,
) -> HitResult {
    let chance = hit_chance(attacker, defender, balance);
    if rng.gen::<f64>() >= chance {
        return HitResult::miss();
    }

    let max_hit = max_hit(attacker);
    let is_crit = rng.gen::<f64>() < attacker.crit_chance;
    let raw = if is_crit {
        max_hit * balance.crit_multiplier
    } else {
        let ceiling = (max_hit.floor() as u32).max(1);
        rng.gen_range(1..=ceiling) as f64
    };

    let reduction = damage_reduction(defender.defense, balance.armor_constant);
    let mitigated = raw * (1.0 - reduction);
    let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..=DAMAGE_VARIANCE_MAX);
    let final_damage = ((mitigated * variance).floor() as u32).max(1);

    HitResult {
        landed: true,
        final_damage,
        is_crit,
        mitigation: raw - mitigated,
    }
}
