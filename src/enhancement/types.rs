use crate::core::constants::{
    ENCHANT_BASE_CHANCE_PERCENT, ENCHANT_CHANCE_PER_SCROLL_TIER, ENCHANT_CURVE_COST_FACTOR,
    ENCHANT_LINEAR_COST_FACTOR, ENCHANT_MAX_CHANCE_PERCENT,
    ENCHANT_MIN_BASE_COST, ENCHANT_MIN_CHANCE_PERCENT, ENCHANT_PENALTY_PER_LEVEL,
    ENCHANT_VALUE_COST_FACTOR,
};
use crate::items::{EquipmentSlot, ItemId};

/// Where the item being enchanted lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnchantTarget {
    Equipped(EquipmentSlot),
    Inventory(ItemId),
}

/// Result of an enchant attempt (for display).
#[derive(Debug, Clone, PartialEq)]
pub struct EnchantResult {
    pub success: bool,
    /// The item as it is after the attempt.
    pub item: ItemId,
    pub old_tier: u8,
    pub new_tier: u8,
    /// Coins spent, whether or not the attempt succeeded.
    pub cost: u64,
    /// Success chance in percent.
    pub chance: f64,
}

/// Coins needed to attempt tier `next_level`:
/// `floor(max(100, value * 10) * (1 + n * 0.75 + n^1.5 * 0.2))`.
pub fn enchant_cost(next_level: u8, base_value: u64) -> u64 {
    let base = (base_value as f64 * ENCHANT_VALUE_COST_FACTOR).max(ENCHANT_MIN_BASE_COST);
    let n = next_level as f64;
    let curve = 1.0
        + n * ENCHANT_LINEAR_COST_FACTOR
        + n * n.sqrt() * ENCHANT_CURVE_COST_FACTOR;
    (base * curve).floor() as u64
}

/// Success chance in percent; 0 for a scroll tier below 1, otherwise
/// `30 + tier * 10 - level * 10` clamped to 5-100.
pub fn success_chance(current_level: u8, scroll_tier: u32) -> f64 {
    if scroll_tier < 1 {
        return 0.0;
    }
    (ENCHANT_BASE_CHANCE_PERCENT + scroll_tier as f64 * ENCHANT_CHANCE_PER_SCROLL_TIER
        - current_level as f64 * ENCHANT_PENALTY_PER_LEVEL)
        .clamp(ENCHANT_MIN_CHANCE_PERCENT, ENCHANT_MAX_CHANCE_PERCENT)
}

/// Display suffix, e.g. "+3" or "" for tier 0.
pub fn tier_suffix(tier: u8) -> String {
    if tier == 0 {
        String::new()
    } else {
        format!(" +{}", tier)
    }
}
