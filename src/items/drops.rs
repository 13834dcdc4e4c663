//! Loot rolling: independent chance drops for kills and weighted tables for
//! world loot. The two models are not interchangeable.

use super::types::ItemId;
use crate::core::error::ActionError;
use crate::core::game_state::{StatePatch, StateSnapshot};
use crate::core::Ruleset;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Kill loot entry, tested on its own against `chance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    pub item: String,
    /// Probability 0.0-1.0.
    pub chance: f64,
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
}

impl Drop {
    pub fn new(item: &str, chance: f64, min: u64, max: u64) -> Self {
        Self {
            item: item.to_string(),
            chance,
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn single(item: &str, chance: f64) -> Self {
        Self {
            item: item.to_string(),
            chance,
            min: None,
            max: None,
        }
    }
}

/// World loot entry, selected in proportion to `weight` within its table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedDrop {
    pub item: String,
    pub weight: f64,
    #[serde(default)]
    pub min: Option<u64>,
    #[serde(default)]
    pub max: Option<u64>,
}

impl WeightedDrop {
    pub fn new(item: &str, weight: f64, min: u64, max: u64) -> Self {
        Self {
            item: item.to_string(),
            weight,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Resolves an optional amount range. `min` defaults to 1, `max` to `min`.
pub fn amount_bounds(min: Option<u64>, max: Option<u64>) -> (u64, u64) {
    let lo = min.unwrap_or(1);
    let hi = max.unwrap_or(lo).max(lo);
    (lo, hi)
}

fn roll_amount(min: Option<u64>, max: Option<u64>, rng: &mut impl Rng) -> u64 {
    let (lo, hi) = amount_bounds(min, max);
    rng.gen_range(lo..=hi)
}

/// Rolls every entry independently; returns what dropped, in table order.
pub fn roll_chance_drops(drops: &[Drop], rng: &mut impl Rng) -> Vec<(ItemId, u64)> {
    let mut loot = Vec::new();
    for drop in drops {
        if rng.gen::<f64>() < drop.chance {
            let amount = roll_amount(drop.min, drop.max, rng);
            loot.push((ItemId::new(drop.item.as_str()), amount));
        }
    }
    loot
}

/// Picks one entry of a weighted table. `None` only for an empty table.
pub fn roll_weighted(drops: &[WeightedDrop], rng: &mut impl Rng) -> Option<(ItemId, u64)> {
    let last = drops.last()?;
    let total: f64 = drops.iter().map(|d| d.weight.max(0.0)).sum();

    let mut roll = rng.gen::<f64>() * total;
    let mut picked = last;
    for drop in drops {
        let weight = drop.weight.max(0.0);
        if roll < weight {
            picked = drop;
            break;
        }
        roll -= weight;
    }

    let amount = roll_amount(picked.min, picked.max, rng);
    Some((ItemId::new(picked.item.as_str()), amount))
}

/// Opens one container from the inventory and adds its weighted roll.
pub fn open_container(
    state: &StateSnapshot,
    rules: &Ruleset,
    item: &ItemId,
    rng: &mut impl Rng,
) -> Result<StatePatch, ActionError> {
    let resource = rules
        .catalog
        .resource(&item.base)
        .ok_or_else(|| ActionError::UnknownResource(item.base.clone()))?;
    if resource.contents.is_empty() {
        return Err(ActionError::NotAContainer(resource.name.clone()));
    }
    if state.item_count(item) == 0 {
        return Err(ActionError::MissingItem(item.clone()));
    }

    let mut patch = StatePatch::default();
    patch.remove_item(state, item, 1);
    if let Some((loot, amount)) = roll_weighted(&resource.contents, rng) {
        tracing::debug!(container = %item, loot = %loot, amount, "opened container");
        patch.add_item(state, &loot, amount);
    }
    Ok(patch)
}
