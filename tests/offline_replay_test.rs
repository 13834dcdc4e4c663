//! Offline catch-up must land exactly where a live session would.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skillquest::combat::start_combat;
use skillquest::core::offline::summarize;
use skillquest::core::{replay, Balance, Ruleset, StateSnapshot, Ticker};
use skillquest::items::{Catalog, ItemId};
use skillquest::skills::{start_production, Skill, SkillProgress};

fn live_for(state: &StateSnapshot, rules: &Ruleset, seconds: u64, seed: u64) -> StateSnapshot {
    let mut live = state.clone();
    let ticker = Ticker::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..seconds {
        if live.is_idle() {
            break;
        }
        ticker.advance(&mut live, rules, 1000, &mut rng);
    }
    live
}

#[test]
fn test_replay_matches_live_production() {
    let rules = Ruleset::standard();
    let mut state = StateSnapshot::new(10);
    state.inventory.insert(ItemId::new("logs"), 23);
    state.apply(start_production(&state, &rules, Skill::Crafting, "enchant_scroll_1").unwrap());

    let live = live_for(&state, &rules, 900, 1);
    let (offline, report) = replay(&state, &rules, 900, &mut ChaCha8Rng::seed_from_u64(1));

    assert_eq!(offline, live);
    assert_eq!(offline.item_count(&ItemId::new("enchant_scroll_1")), 4);
    assert_eq!(offline.item_count(&ItemId::new("logs")), 3);
    assert!(report.went_idle);
    assert_eq!(report.items_gained.get(&ItemId::new("enchant_scroll_1")), Some(&4));
    assert!(!report.items_gained.contains_key(&ItemId::new("logs")));
}

#[test]
fn test_replay_matches_live_combat() {
    let rules = Ruleset::standard();
    let mut state = StateSnapshot::new(10);
    state
        .skills
        .insert(Skill::Attack, SkillProgress { level: 30, xp: 0 });
    state
        .skills
        .insert(Skill::Strength, SkillProgress { level: 30, xp: 0 });
    state.apply(start_combat(&state, &rules, 1).unwrap());

    let live = live_for(&state, &rules, 1_800, 99);
    let (offline, report) = replay(&state, &rules, 1_800, &mut ChaCha8Rng::seed_from_u64(99));

    assert_eq!(offline, live);
    assert!(report.kills > 0);
    assert!(report.coins_gained > 0);
    assert!(report.xp_gained.contains_key(&Skill::Hitpoints));
    let diff = summarize(&state, &offline, rules.balance.xp_per_level);
    assert_eq!(report.xp_gained, diff.xp_gained);
    assert_eq!(report.items_gained, diff.items_gained);
    assert_eq!(report.coins_gained, diff.coins_gained);
}

#[test]
fn test_twelve_hour_cap() {
    let rules = Ruleset::standard();
    let mut state = StateSnapshot::new(10);
    state.apply(start_production(&state, &rules, Skill::Woodcutting, "logs").unwrap());

    let (after, report) = replay(&state, &rules, 7 * 24 * 3_600, &mut ChaCha8Rng::seed_from_u64(3));
    assert_eq!(report.seconds_simulated, 43_200);
    // 43_200s at 3s per log
    assert_eq!(after.item_count(&ItemId::new("logs")), 14_400);
    assert!(!report.went_idle);
}

#[test]
fn test_balance_override_changes_the_cap() {
    let balance = Balance::from_toml_str("max_offline_seconds = 30\n").unwrap();
    let rules = Ruleset::new(Catalog::standard(), balance);
    let mut state = StateSnapshot::new(10);
    state.apply(start_production(&state, &rules, Skill::Fishing, "raw_shrimp").unwrap());

    let (after, report) = replay(&state, &rules, 3_600, &mut ChaCha8Rng::seed_from_u64(3));
    assert_eq!(report.seconds_simulated, 30);
    assert_eq!(after.item_count(&ItemId::new("raw_shrimp")), 10);
}

#[test]
fn test_summary_lines_mention_gains() {
    let rules = Ruleset::standard();
    let mut state = StateSnapshot::new(10);
    state.apply(start_production(&state, &rules, Skill::Mining, "copper_ore").unwrap());

    let (_, report) = replay(&state, &rules, 300, &mut ChaCha8Rng::seed_from_u64(3));
    let lines = report.summary_lines();
    assert_eq!(lines[0], "Simulated 300s of 300s away");
    assert!(lines.iter().any(|l| l.starts_with("copper_ore: +100")));
}

#[test]
fn test_frequent_check_ins_match_one_long_absence() {
    let rules = Ruleset::standard();
    let mut state = StateSnapshot::new(10);
    state.apply(start_production(&state, &rules, Skill::Woodcutting, "logs").unwrap());

    let (whole, whole_report) = replay(&state, &rules, 60, &mut ChaCha8Rng::seed_from_u64(5));
    let mut split = state.clone();
    let mut logs = 0;
    for _ in 0..30 {
        let (next, report) = replay(&split, &rules, 2, &mut ChaCha8Rng::seed_from_u64(5));
        logs += report.items_gained.get(&ItemId::new("logs")).copied().unwrap_or(0);
        split = next;
    }

    assert_eq!(split, whole);
    assert_eq!(whole.item_count(&ItemId::new("logs")), 20);
    assert_eq!(whole_report.items_gained.get(&ItemId::new("logs")), Some(&logs));
}

#[test]
fn test_boss_entry_key_survives_a_save_between_sessions() {
    use skillquest::utils::{SaveFile, SaveManager};

    let rules = Ruleset::standard();
    let mut state = StateSnapshot::new(10);
    state.combat.max_map_completed = 9;
    state.inventory.insert(ItemId::new("frozen_key"), 1);
    state.apply(start_combat(&state, &rules, 10).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_path(dir.path().join("save.dat"));
    manager.save(&SaveFile::new(state)).unwrap();
    let loaded = manager.load().unwrap().snapshot;

    // The paid spawn happens on the first second after loading
    let (after, _) = replay(&loaded, &rules, 1, &mut ChaCha8Rng::seed_from_u64(1));
    assert_eq!(after.combat.current_map_id, Some(10));
    assert!(after.combat.enemy_hp.is_some());
    assert!(!after.is_idle());
    assert_eq!(after.item_count(&ItemId::new("frozen_key")), 0);
}
