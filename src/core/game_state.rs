use crate::combat::CombatRunState;
use crate::core::constants::{COINS_ITEM_ID, STARTING_HITPOINTS_LEVEL};
use crate::items::{Equipment, ItemId};
use crate::skills::{CombatStyle, Skill, SkillProgress};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The single activity currently advancing. Absence means idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveAction {
    /// Fighting on `CombatRunState::current_map_id`.
    Combat,
    /// Gathering or crafting `resource_id` with `skill`.
    Production {
        skill: Skill,
        resource_id: String,
        /// Interval between production ticks, fixed when the action starts.
        tick_ms: u64,
        /// Time carried towards the next production tick.
        #[serde(default)]
        progress_ms: u64,
    },
}

/// Food slot used by auto-eat during combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedConsumable {
    pub item: ItemId,
    pub count: u64,
}

/// Everything the simulation reads and writes.
///
/// Tick functions never mutate a snapshot; they return a [`StatePatch`]
/// which the owner merges with [`StateSnapshot::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Item counts. Zero counts are never stored.
    #[serde(default)]
    pub inventory: BTreeMap<ItemId, u64>,
    #[serde(default)]
    pub skills: BTreeMap<Skill, SkillProgress>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub consumable: Option<EquippedConsumable>,
    #[serde(default)]
    pub active_action: Option<ActiveAction>,
    #[serde(default)]
    pub combat: CombatRunState,
    #[serde(default)]
    pub combat_style: CombatStyle,
    /// Owned upgrade and unlock ids.
    #[serde(default)]
    pub upgrades: BTreeSet<String>,
    #[serde(default)]
    pub coins: u64,
    /// Move on to the next map after each victory.
    #[serde(default = "default_auto_progress")]
    pub auto_progress: bool,
}

fn default_auto_progress() -> bool {
    true
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            inventory: BTreeMap::new(),
            skills: BTreeMap::new(),
            equipment: Equipment::new(),
            consumable: None,
            active_action: None,
            combat: CombatRunState::default(),
            combat_style: CombatStyle::default(),
            upgrades: BTreeSet::new(),
            coins: 0,
            auto_progress: default_auto_progress(),
        }
    }
}

impl StateSnapshot {
    /// A fresh character: skills at level 1 (hitpoints 10), full hp, idle.
    pub fn new(hp_per_hitpoints_level: u32) -> Self {
        let mut state = Self::default();
        for skill in Skill::all() {
            state.skills.insert(skill, SkillProgress::default());
        }
        state.skills.insert(
            Skill::Hitpoints,
            SkillProgress {
                level: STARTING_HITPOINTS_LEVEL,
                xp: 0,
            },
        );
        state.combat.hp = state.max_hp(hp_per_hitpoints_level);
        state
    }

    pub fn item_count(&self, item: &ItemId) -> u64 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    /// Progress of a skill; skills missing from old saves read as level 1.
    pub fn skill(&self, skill: Skill) -> SkillProgress {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn skill_level(&self, skill: Skill) -> u32 {
        self.skill(skill).level
    }

    pub fn max_hp(&self, hp_per_hitpoints_level: u32) -> u32 {
        self.skill_level(Skill::Hitpoints) * hp_per_hitpoints_level
    }

    pub fn is_idle(&self) -> bool {
        self.active_action.is_none()
    }

    /// Milliseconds banked towards the next production tick; zero otherwise.
    pub fn production_progress_ms(&self) -> u64 {
        match &self.active_action {
            Some(ActiveAction::Production { progress_ms, .. }) => *progress_ms,
            _ => 0,
        }
    }

    /// Merges a partial update into this snapshot.
    ///
    /// Inventory and skills merge per key (a zero count removes the item);
    /// every other present field replaces the current value. Both the live
    /// scheduler and offline replay go through here.
    pub fn apply(&mut self, patch: StatePatch) {
        for (item, count) in patch.inventory {
            if count == 0 {
                self.inventory.remove(&item);
            } else {
                self.inventory.insert(item, count);
            }
        }
        self.skills.extend(patch.skills);
        if let Some(equipment) = patch.equipment {
            self.equipment = equipment;
        }
        if let Some(consumable) = patch.consumable {
            self.consumable = consumable;
        }
        if let Some(action) = patch.active_action {
            self.active_action = action;
        }
        if let Some(combat) = patch.combat {
            self.combat = combat;
        }
        if let Some(coins) = patch.coins {
            self.coins = coins;
        }
        if let Some(style) = patch.combat_style {
            self.combat_style = style;
        }
        self.upgrades.extend(patch.unlocked);
    }

    /// Copy of this snapshot with `patch` applied.
    pub fn merged(&self, patch: StatePatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

/// Partial successor of a [`StateSnapshot`].
///
/// Inventory entries hold the new absolute count of each touched item.
/// `Some(None)` on an optional field clears it. `unlocked` upgrade ids are
/// added to the owned set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatePatch {
    pub inventory: BTreeMap<ItemId, u64>,
    pub skills: BTreeMap<Skill, SkillProgress>,
    pub equipment: Option<Equipment>,
    pub consumable: Option<Option<EquippedConsumable>>,
    pub active_action: Option<Option<ActiveAction>>,
    pub combat: Option<CombatRunState>,
    pub coins: Option<u64>,
    pub combat_style: Option<CombatStyle>,
    pub unlocked: BTreeSet<String>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        self == &StatePatch::default()
    }

    /// Count of `item` as it would be after this patch.
    pub fn item_count(&self, state: &StateSnapshot, item: &ItemId) -> u64 {
        self.inventory
            .get(item)
            .copied()
            .unwrap_or_else(|| state.item_count(item))
    }

    pub fn coins(&self, state: &StateSnapshot) -> u64 {
        self.coins.unwrap_or(state.coins)
    }

    pub fn skill(&self, state: &StateSnapshot, skill: Skill) -> SkillProgress {
        self.skills
            .get(&skill)
            .copied()
            .unwrap_or_else(|| state.skill(skill))
    }

    /// Adds items; plain `coins` go to the coin balance instead.
    pub fn add_item(&mut self, state: &StateSnapshot, item: &ItemId, amount: u64) {
        if amount == 0 {
            return;
        }
        if is_coins(item) {
            self.coins = Some(self.coins(state).saturating_add(amount));
            return;
        }
        let count = self.item_count(state, item).saturating_add(amount);
        self.inventory.insert(item.clone(), count);
    }

    /// Removes up to `amount` of `item`, never going below zero.
    pub fn remove_item(&mut self, state: &StateSnapshot, item: &ItemId, amount: u64) {
        if amount == 0 {
            return;
        }
        let count = self.item_count(state, item).saturating_sub(amount);
        self.inventory.insert(item.clone(), count);
    }

    pub fn spend_coins(&mut self, state: &StateSnapshot, amount: u64) {
        self.coins = Some(self.coins(state).saturating_sub(amount));
    }

    pub fn set_skill(&mut self, skill: Skill, progress: SkillProgress) {
        self.skills.insert(skill, progress);
    }

    pub fn set_action(&mut self, action: ActiveAction) {
        self.active_action = Some(Some(action));
    }

    pub fn clear_action(&mut self) {
        self.active_action = Some(None);
    }
}

fn is_coins(item: &ItemId) -> bool {
    item.tier == 0 && item.base == COINS_ITEM_ID
}
