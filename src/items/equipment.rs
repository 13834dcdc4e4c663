use super::types::{EquipmentSlot, ItemId};
use crate::core::error::ActionError;
use crate::core::game_state::{EquippedConsumable, StatePatch, StateSnapshot};
use crate::core::Ruleset;
use serde::{Deserialize, Serialize};

/// Player equipment slots.
///
/// New slots need `#[serde(default)]` so older saves still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<ItemId>,
    #[serde(default)]
    pub shield: Option<ItemId>,
    #[serde(default)]
    pub helmet: Option<ItemId>,
    #[serde(default)]
    pub body: Option<ItemId>,
    #[serde(default)]
    pub legs: Option<ItemId>,
    #[serde(default)]
    pub gloves: Option<ItemId>,
    #[serde(default)]
    pub boots: Option<ItemId>,
    #[serde(default)]
    pub amulet: Option<ItemId>,
    #[serde(default)]
    pub ring: Option<ItemId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemId> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Shield => self.shield.as_ref(),
            EquipmentSlot::Helmet => self.helmet.as_ref(),
            EquipmentSlot::Body => self.body.as_ref(),
            EquipmentSlot::Legs => self.legs.as_ref(),
            EquipmentSlot::Gloves => self.gloves.as_ref(),
            EquipmentSlot::Boots => self.boots.as_ref(),
            EquipmentSlot::Amulet => self.amulet.as_ref(),
            EquipmentSlot::Ring => self.ring.as_ref(),
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<ItemId>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Shield => self.shield = item,
            EquipmentSlot::Helmet => self.helmet = item,
            EquipmentSlot::Body => self.body = item,
            EquipmentSlot::Legs => self.legs = item,
            EquipmentSlot::Gloves => self.gloves = item,
            EquipmentSlot::Boots => self.boots = item,
            EquipmentSlot::Amulet => self.amulet = item,
            EquipmentSlot::Ring => self.ring = item,
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &ItemId)> {
        EquipmentSlot::all()
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }
}

/// Moves one `item` from the inventory into its slot, returning whatever
/// was there to the inventory.
pub fn equip_item(
    state: &StateSnapshot,
    rules: &Ruleset,
    item: &ItemId,
) -> Result<StatePatch, ActionError> {
    let slot = rules
        .catalog
        .resource(&item.base)
        .and_then(|r| r.slot)
        .ok_or_else(|| ActionError::NotEquippable(item.to_string()))?;
    if state.item_count(item) == 0 {
        return Err(ActionError::MissingItem(item.clone()));
    }

    let mut patch = StatePatch::default();
    let mut equipment = state.equipment.clone();
    patch.remove_item(state, item, 1);
    if let Some(previous) = equipment.get(slot).cloned() {
        patch.add_item(state, &previous, 1);
    }
    equipment.set(slot, Some(item.clone()));
    patch.equipment = Some(equipment);
    tracing::debug!(item = %item, slot = slot.name(), "equipped");
    Ok(patch)
}

/// Empties `slot` into the inventory.
pub fn unequip_item(state: &StateSnapshot, slot: EquipmentSlot) -> Result<StatePatch, ActionError> {
    let item = state
        .equipment
        .get(slot)
        .cloned()
        .ok_or(ActionError::EmptySlot(slot))?;

    let mut patch = StatePatch::default();
    let mut equipment = state.equipment.clone();
    patch.add_item(state, &item, 1);
    equipment.set(slot, None);
    patch.equipment = Some(equipment);
    Ok(patch)
}

/// Puts the whole inventory stack of a healing item in the food slot.
///
/// A different food already there goes back to the inventory; the same food
/// stacks onto it.
pub fn equip_consumable(
    state: &StateSnapshot,
    rules: &Ruleset,
    item: &ItemId,
) -> Result<StatePatch, ActionError> {
    let heals = rules.catalog.resource(&item.base).and_then(|r| r.heals);
    if heals.is_none() {
        return Err(ActionError::NotFood(item.to_string()));
    }
    let count = state.item_count(item);
    if count == 0 {
        return Err(ActionError::MissingItem(item.clone()));
    }

    let mut patch = StatePatch::default();
    patch.remove_item(state, item, count);
    let mut total = count;
    match &state.consumable {
        Some(current) if &current.item == item => total = total.saturating_add(current.count),
        Some(current) => patch.add_item(state, &current.item, current.count),
        None => {}
    }
    patch.consumable = Some(Some(EquippedConsumable {
        item: item.clone(),
        count: total,
    }));
    Ok(patch)
}
