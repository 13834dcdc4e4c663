//! Enchanting tests: tier climbs, material costs, and effects on combat and saves.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skillquest::combat::player_combatant;
use skillquest::core::{ActionError, Ruleset, StateSnapshot};
use skillquest::enhancement::{attempt_enchant, enchant_cost, EnchantTarget};
use skillquest::items::{EquipmentSlot, ItemId};
use skillquest::utils::{SaveFile, SaveManager};
use tempfile::tempdir;

const WEAPON: EnchantTarget = EnchantTarget::Equipped(EquipmentSlot::Weapon);

fn smith_with(scroll: &str, count: u64, coins: u64) -> StateSnapshot {
    let mut state = StateSnapshot::new(10);
    state
        .equipment
        .set(EquipmentSlot::Weapon, Some(ItemId::new("bronze_sword")));
    state.inventory.insert(ItemId::new(scroll), count);
    state.coins = coins;
    state
}

fn weapon_tier(state: &StateSnapshot) -> u8 {
    state
        .equipment
        .get(EquipmentSlot::Weapon)
        .map(|item| item.tier)
        .unwrap_or(0)
}

// =========================================================================
// Tier climbs
// =========================================================================

#[test]
fn test_high_scroll_guarantees_first_two_tiers() {
    let rules = Ruleset::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let scroll = ItemId::new("enchant_scroll_8");
    let mut state = smith_with("enchant_scroll_8", 2, 5_000);

    for expected in 1..=2u8 {
        let (patch, result) = attempt_enchant(&state, &rules, &WEAPON, &scroll, &mut rng).unwrap();
        assert!(result.success);
        assert_eq!(result.chance, 100.0);
        assert_eq!(result.new_tier, expected);
        state.apply(patch);
    }

    assert_eq!(weapon_tier(&state), 2);
    assert_eq!(
        state.coins,
        5_000 - enchant_cost(1, 20) - enchant_cost(2, 20)
    );
    assert!(!state.inventory.contains_key(&scroll));
}

#[test]
fn test_failures_never_lower_the_tier() {
    let rules = Ruleset::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let scroll = ItemId::new("enchant_scroll_1");
    let mut state = smith_with("enchant_scroll_1", 60, 10_000_000);

    let mut previous = 0;
    let mut failures = 0;
    while state.item_count(&scroll) > 0 {
        match attempt_enchant(&state, &rules, &WEAPON, &scroll, &mut rng) {
            Ok((patch, result)) => {
                assert_eq!(result.old_tier, previous);
                if !result.success {
                    failures += 1;
                    assert_eq!(result.new_tier, previous);
                }
                state.apply(patch);
                let tier = weapon_tier(&state);
                assert!(tier >= previous);
                previous = tier;
            }
            Err(ActionError::MaxTierReached(10)) => break,
            Err(other) => panic!("unexpected refusal: {other}"),
        }
    }
    assert!(failures > 0);
    assert!(previous <= 10);
}

#[test]
fn test_success_rate_tracks_the_chance() {
    let rules = Ruleset::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let scroll = ItemId::new("enchant_scroll_1");
    let state = smith_with("enchant_scroll_1", 1, 1_000);

    let trials = 1_000;
    let successes = (0..trials)
        .filter(|_| {
            attempt_enchant(&state, &rules, &WEAPON, &scroll, &mut rng)
                .unwrap()
                .1
                .success
        })
        .count();
    // 40% at tier 0 with a tier-1 scroll
    assert!((300..=500).contains(&successes), "{successes} successes");
}

#[test]
fn test_refusal_spends_nothing() {
    let rules = Ruleset::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let state = smith_with("enchant_scroll_1", 1, 10);

    let err = attempt_enchant(&state, &rules, &WEAPON, &ItemId::new("enchant_scroll_1"), &mut rng)
        .unwrap_err();
    assert!(matches!(err, ActionError::InsufficientCoins { available: 10, .. }));
    assert_eq!(state.coins, 10);
    assert_eq!(state.item_count(&ItemId::new("enchant_scroll_1")), 1);
}

// =========================================================================
// Effects downstream
// =========================================================================

#[test]
fn test_enchanted_weapon_hits_harder() {
    let rules = Ruleset::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let scroll = ItemId::new("enchant_scroll_8");
    let mut state = smith_with("enchant_scroll_8", 1, 5_000);
    let before = player_combatant(&state, &rules.catalog, &rules.balance);

    let (patch, _) = attempt_enchant(&state, &rules, &WEAPON, &scroll, &mut rng).unwrap();
    state.apply(patch);
    let after = player_combatant(&state, &rules.catalog, &rules.balance);

    assert!(after.accuracy > before.accuracy);
    assert!(after.damage_bonus > before.damage_bonus);
}

#[test]
fn test_enchanted_items_survive_a_save() {
    let rules = Ruleset::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut state = smith_with("enchant_scroll_8", 1, 5_000);
    state.inventory.insert(ItemId::new("bronze_helm"), 1);
    let (patch, _) = attempt_enchant(
        &state,
        &rules,
        &EnchantTarget::Inventory(ItemId::new("bronze_helm")),
        &ItemId::new("enchant_scroll_8"),
        &mut rng,
    )
    .unwrap();
    state.apply(patch);

    let dir = tempdir().unwrap();
    let manager = SaveManager::with_path(dir.path().join("save.dat"));
    manager.save(&SaveFile::new(state.clone())).unwrap();
    let loaded = manager.load().unwrap().snapshot;

    assert_eq!(loaded.item_count(&ItemId::with_tier("bronze_helm", 1)), 1);
    assert!(!loaded.inventory.contains_key(&ItemId::new("bronze_helm")));
    assert_eq!(loaded, state);
}
