use super::types::*;
use crate::core::error::ActionError;
use crate::core::game_state::{StatePatch, StateSnapshot};
use crate::core::tick::Ruleset;
use crate::items::ItemId;
use rand::Rng;

/// Attempts to raise an item one enchant tier using `scroll`.
///
/// Refuses without touching state if the item is at the maximum tier, the
/// scroll is missing, or coins are short. Otherwise the scroll and cost are
/// always spent; on success the item is replaced in place by its next tier.
pub fn attempt_enchant<R: Rng>(
    state: &StateSnapshot,
    rules: &Ruleset,
    target: &EnchantTarget,
    scroll: &ItemId,
    rng: &mut R,
) -> Result<(StatePatch, EnchantResult), ActionError> {
    let item = match target {
        EnchantTarget::Equipped(slot) => state
            .equipment
            .get(*slot)
            .cloned()
            .ok_or(ActionError::EmptySlot(*slot))?,
        EnchantTarget::Inventory(id) => {
            if state.item_count(id) == 0 {
                return Err(ActionError::MissingItem(id.clone()));
            }
            id.clone()
        }
    };

    let resource = rules
        .catalog
        .resource(&item.base)
        .ok_or_else(|| ActionError::UnknownResource(item.base.clone()))?;
    if resource.slot.is_none() {
        return Err(ActionError::NotEnchantable(resource.name.clone()));
    }
    if item.tier >= rules.balance.max_enchant_tier {
        return Err(ActionError::MaxTierReached(item.tier));
    }

    let scroll_tier = rules
        .catalog
        .resource(&scroll.base)
        .and_then(|r| r.scroll_tier)
        .ok_or_else(|| ActionError::NotAScroll(scroll.base.clone()))?;
    if state.item_count(scroll) == 0 {
        return Err(ActionError::MissingItem(scroll.clone()));
    }

    let cost = enchant_cost(item.tier + 1, resource.value);
    if state.coins < cost {
        return Err(ActionError::InsufficientCoins {
            needed: cost,
            available: state.coins,
        });
    }

    let mut patch = StatePatch::default();
    patch.remove_item(state, scroll, 1);
    patch.spend_coins(state, cost);

    let chance = success_chance(item.tier, scroll_tier);
    let success = rng.gen::<f64>() * 100.0 < chance;

    let result_item = if success {
        let upgraded = item.next_tier();
        match target {
            EnchantTarget::Equipped(slot) => {
                let mut equipment = state.equipment.clone();
                equipment.set(*slot, Some(upgraded.clone()));
                patch.equipment = Some(equipment);
            }
            EnchantTarget::Inventory(_) => {
                patch.remove_item(state, &item, 1);
                patch.add_item(state, &upgraded, 1);
            }
        }
        upgraded
    } else {
        item.clone()
    };

    tracing::debug!(
        item = %item,
        success,
        chance,
        cost,
        "enchant attempt"
    );

    let result = EnchantResult {
        success,
        old_tier: item.tier,
        new_tier: result_item.tier,
        item: result_item,
        cost,
        chance,
    };
    Ok((patch, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::EquipmentSlot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn armed_state() -> StateSnapshot {
        let mut state = StateSnapshot::new(10);
        state
            .equipment
            .set(EquipmentSlot::Weapon, Some(ItemId::new("bronze_sword")));
        state.inventory.insert(ItemId::new("enchant_scroll_1"), 3);
        state.coins = 10_000;
        state
    }

    #[test]
    fn test_refusals_leave_state_untouched() {
        let rules = Ruleset::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = armed_state();
        let scroll = ItemId::new("enchant_scroll_1");

        let poor = StateSnapshot {
            coins: 5,
            ..state.clone()
        };
        // max(100, 20 * 10) * 1.95
        assert_eq!(
            attempt_enchant(
                &poor,
                &rules,
                &EnchantTarget::Equipped(EquipmentSlot::Weapon),
                &scroll,
                &mut rng
            )
            .unwrap_err(),
            ActionError::InsufficientCoins {
                needed: 390,
                available: 5
            }
        );

        assert_eq!(
            attempt_enchant(
                &state,
                &rules,
                &EnchantTarget::Equipped(EquipmentSlot::Weapon),
                &ItemId::new("enchant_scroll_8"),
                &mut rng
            )
            .unwrap_err(),
            ActionError::MissingItem(ItemId::new("enchant_scroll_8"))
        );

        assert_eq!(
            attempt_enchant(
                &state,
                &rules,
                &EnchantTarget::Equipped(EquipmentSlot::Helmet),
                &scroll,
                &mut rng
            )
            .unwrap_err(),
            ActionError::EmptySlot(EquipmentSlot::Helmet)
        );

        assert!(matches!(
            attempt_enchant(
                &state,
                &rules,
                &EnchantTarget::Equipped(EquipmentSlot::Weapon),
                &ItemId::new("logs"),
                &mut rng
            ),
            Err(ActionError::NotAScroll(_))
        ));
    }

    #[test]
    fn test_max_tier_is_refused() {
        let rules = Ruleset::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = armed_state();
        state.equipment.set(
            EquipmentSlot::Weapon,
            Some(ItemId::with_tier("bronze_sword", 10)),
        );
        assert_eq!(
            attempt_enchant(
                &state,
                &rules,
                &EnchantTarget::Equipped(EquipmentSlot::Weapon),
                &ItemId::new("enchant_scroll_1"),
                &mut rng
            )
            .unwrap_err(),
            ActionError::MaxTierReached(10)
        );
    }

    #[test]
    fn test_materials_are_spent_on_every_attempt() {
        let rules = Ruleset::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut state = armed_state();
        let scroll = ItemId::new("enchant_scroll_1");
        let target = EnchantTarget::Equipped(EquipmentSlot::Weapon);

        let (patch, result) = attempt_enchant(&state, &rules, &target, &scroll, &mut rng).unwrap();
        state.apply(patch);
        assert_eq!(state.item_count(&scroll), 2);
        assert_eq!(state.coins, 10_000 - result.cost);
        assert_eq!(result.chance, 40.0);
        let equipped = state.equipment.get(EquipmentSlot::Weapon).cloned();
        if result.success {
            assert_eq!(equipped, Some(ItemId::with_tier("bronze_sword", 1)));
        } else {
            assert_eq!(equipped, Some(ItemId::new("bronze_sword")));
        }
    }

    #[test]
    fn test_inventory_target_swaps_item_id() {
        let rules = Ruleset::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut state = armed_state();
        state.inventory.insert(ItemId::new("bronze_helm"), 2);
        state.inventory.insert(ItemId::new("enchant_scroll_8"), 1);

        let (patch, result) = attempt_enchant(
            &state,
            &rules,
            &EnchantTarget::Inventory(ItemId::new("bronze_helm")),
            &ItemId::new("enchant_scroll_8"),
            &mut rng,
        )
        .unwrap();
        state.apply(patch);

        assert!(result.success);
        assert_eq!(state.item_count(&ItemId::new("bronze_helm")), 1);
        assert_eq!(state.item_count(&ItemId::with_tier("bronze_helm", 1)), 1);
        assert!(!state.inventory.contains_key(&ItemId::new("enchant_scroll_8")));
    }

    #[test]
    fn test_top_scroll_on_fresh_item_never_fails() {
        let rules = Ruleset::standard();
        let mut state = armed_state();
        state.inventory.insert(ItemId::new("bronze_helm"), 1);
        state.inventory.insert(ItemId::new("enchant_scroll_8"), 1);
        let target = EnchantTarget::Inventory(ItemId::new("bronze_helm"));
        let scroll = ItemId::new("enchant_scroll_8");

        for seed in 0..500 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (patch, result) = attempt_enchant(&state, &rules, &target, &scroll, &mut rng).unwrap();
            assert!(result.success, "seed {seed}");
            assert_eq!(result.chance, 100.0);
            let after = state.merged(patch);
            assert_eq!(after.item_count(&ItemId::with_tier("bronze_helm", 1)), 1);
        }

        // One long stream of draws as well
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..2_000 {
            let (_, result) = attempt_enchant(&state, &rules, &target, &scroll, &mut rng).unwrap();
            assert!(result.success);
        }
    }
}
