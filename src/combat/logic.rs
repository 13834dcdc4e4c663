//! Combat state machine: respawn, exchange, victory, defeat.
//!
//! One call handles one elapsed interval. The run moves between three
//! phases:
//!
//! - **Respawning**: no live enemy; the countdown runs and, at zero, a new
//!   enemy spawns. Boss maps spend one key per spawn.
//! - **Fighting**: the attack cooldown runs; at zero the player and the enemy
//!   trade one blow each.
//! - **Idle**: entered on defeat or when a boss runs out of keys.

use super::math::resolve_hit;
use super::types::{enemy_stats, player_combatant, CombatRunState, EnemyStats};
use crate::core::constants::COMBAT_XP_SKILL_SHARES;
use crate::core::error::ActionError;
use crate::core::game_state::{ActiveAction, StatePatch, StateSnapshot};
use crate::core::tick::{Ruleset, TickEvent, TickOutcome};
use crate::items::{roll_chance_drops, ItemId, XpScope};
use crate::maps::{is_map_unlocked, next_map, CombatMap};
use crate::skills::logic::{award_xp, xp_multiplier};
use crate::skills::Skill;
use rand::Rng;

/// Advances combat by `elapsed_ms`.
///
/// Returns an empty outcome unless combat is the active action. A current
/// map missing from the catalog is a no-op; combat without any map is
/// cleared.
pub fn combat_tick(
    state: &StateSnapshot,
    rules: &Ruleset,
    elapsed_ms: i64,
    rng: &mut impl Rng,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.active_action != Some(ActiveAction::Combat) {
        return outcome;
    }
    let Some(map_id) = state.combat.current_map_id else {
        outcome.patch.clear_action();
        return outcome;
    };
    let Some(map) = rules.catalog.map(map_id) else {
        tracing::debug!(map_id, "combat map not in catalog");
        return outcome;
    };

    let mut run = state.combat.clone();
    let enemy = enemy_stats(map, &rules.balance);

    match run.enemy_hp {
        Some(enemy_hp) if enemy_hp > 0 => {
            auto_eat(state, rules, &mut run, elapsed_ms, &mut outcome);
            if run.attack_cooldown_ms > 0 {
                run.attack_cooldown_ms -= elapsed_ms;
            } else {
                exchange(state, rules, map, &enemy, enemy_hp, &mut run, &mut outcome, rng);
            }
        }
        _ => respawn(state, rules, map, &enemy, &mut run, elapsed_ms, &mut outcome),
    }

    outcome.patch.combat = Some(run);
    outcome
}

fn respawn(
    state: &StateSnapshot,
    rules: &Ruleset,
    map: &CombatMap,
    enemy: &EnemyStats,
    run: &mut CombatRunState,
    elapsed_ms: i64,
    outcome: &mut TickOutcome,
) {
    run.respawn_ms -= elapsed_ms;
    if run.respawn_ms > 0 {
        return;
    }
    run.respawn_ms = 0;

    if let Some(key) = map.boss_key() {
        if run.prepaid_spawn {
            run.prepaid_spawn = false;
        } else {
            let key_id = ItemId::new(key);
            if outcome.patch.item_count(state, &key_id) == 0 {
                tracing::debug!(map_id = map.id, key, "out of keys, leaving boss map");
                run.push_log(format!("Out of keys for {}, retreating", map.name));
                run.reset_to_idle();
                outcome.patch.clear_action();
                outcome.push(TickEvent::OutOfKeys {
                    map_id: map.id,
                    key: key.to_string(),
                });
                return;
            }
            outcome.patch.remove_item(state, &key_id, 1);
        }
    }

    run.enemy_hp = Some(enemy.max_hp);
    run.attack_cooldown_ms = rules.balance.attack_cadence_ms;
    run.push_log(format!("A {} appears", enemy.name));
    outcome.push(TickEvent::EnemySpawned {
        map_id: map.id,
        enemy_name: enemy.name.clone(),
    });
}

#[allow(clippy::too_many_arguments)]
fn exchange(
    state: &StateSnapshot,
    rules: &Ruleset,
    map: &CombatMap,
    enemy: &EnemyStats,
    enemy_hp: u32,
    run: &mut CombatRunState,
    outcome: &mut TickOutcome,
    rng: &mut impl Rng,
) {
    let balance = &rules.balance;
    let player = player_combatant(state, &rules.catalog, balance);

    let hit = resolve_hit(&player, &enemy.combatant, balance, rng);
    let message = if !hit.landed {
        format!("You miss the {}", enemy.name)
    } else if hit.is_crit {
        format!("You critically hit the {} for {}!", enemy.name, hit.final_damage)
    } else {
        format!("You hit the {} for {}", enemy.name, hit.final_damage)
    };
    tracing::trace!(damage = hit.final_damage, crit = hit.is_crit, "player attack");
    run.push_log(message.clone());
    outcome.push(TickEvent::PlayerAttack {
        damage: hit.final_damage,
        was_crit: hit.is_crit,
        message,
    });

    let remaining = enemy_hp.saturating_sub(hit.final_damage);
    run.enemy_hp = Some(remaining);
    if remaining == 0 {
        victory(state, rules, map, enemy, run, outcome, rng);
        return;
    }

    let counter = resolve_hit(&enemy.combatant, &player, balance, rng);
    run.hp = run.hp.saturating_sub(counter.final_damage);
    let message = if !counter.landed {
        format!("The {} misses you", enemy.name)
    } else if counter.is_crit {
        format!("The {} critically hits you for {}!", enemy.name, counter.final_damage)
    } else {
        format!("The {} hits you for {}", enemy.name, counter.final_damage)
    };
    tracing::trace!(damage = counter.final_damage, crit = counter.is_crit, "enemy attack");
    run.push_log(message.clone());
    outcome.push(TickEvent::EnemyAttack {
        damage: counter.final_damage,
        was_crit: counter.is_crit,
        message,
    });

    if run.hp == 0 {
        let message = format!("Defeated by the {}, retreating", enemy.name);
        tracing::debug!(map_id = map.id, "player defeated");
        run.push_log(message.clone());
        run.reset_to_idle();
        outcome.patch.clear_action();
        outcome.push(TickEvent::PlayerDefeated {
            map_id: map.id,
            message,
        });
        return;
    }

    run.attack_cooldown_ms = balance.attack_cadence_ms;
}

fn victory(
    state: &StateSnapshot,
    rules: &Ruleset,
    map: &CombatMap,
    enemy: &EnemyStats,
    run: &mut CombatRunState,
    outcome: &mut TickOutcome,
    rng: &mut impl Rng,
) {
    run.push_log(format!("Victory over the {}", enemy.name));

    let multiplier = xp_multiplier(state, &rules.catalog, XpScope::Combat);
    let share = map.xp_reward.div_ceil(COMBAT_XP_SKILL_SHARES);
    let xp_each = (share as f64 * multiplier).floor() as u64;
    for skill in [
        Skill::Hitpoints,
        Skill::Attack,
        Skill::Defense,
        state.combat_style.skill(),
    ] {
        award_xp(
            state,
            &mut outcome.patch,
            &rules.balance,
            skill,
            xp_each,
            &mut outcome.events,
        );
    }
    outcome.push(TickEvent::EnemyDefeated {
        map_id: map.id,
        enemy_name: enemy.name.clone(),
        xp_gained: xp_each,
    });

    for (item, amount) in roll_chance_drops(&map.drops, rng) {
        outcome.patch.add_item(state, &item, amount);
        run.push_log(format!("Loot: {} x{}", item, amount));
        outcome.push(TickEvent::LootDropped { item, amount });
    }

    run.max_map_completed = run.max_map_completed.max(map.id);

    if state.auto_progress {
        advance(state, rules, map, run, outcome);
    }

    run.enemy_hp = None;
    run.respawn_ms = rules.balance.respawn_delay_ms;
}

/// Moves to the next map, paying its key up front when it has one.
fn advance(
    state: &StateSnapshot,
    rules: &Ruleset,
    map: &CombatMap,
    run: &mut CombatRunState,
    outcome: &mut TickOutcome,
) {
    let Some(next) = next_map(&rules.catalog, map.id) else {
        return;
    };

    if let Some(key) = next.required_key.as_deref() {
        let key_id = ItemId::new(key);
        if outcome.patch.item_count(state, &key_id) == 0 {
            run.push_log(format!("{} requires a {}", next.name, key));
            outcome.push(TickEvent::AdvanceBlocked {
                map_id: next.id,
                key: key.to_string(),
            });
            return;
        }
        if next.is_boss {
            outcome.patch.remove_item(state, &key_id, 1);
            run.prepaid_spawn = true;
        }
    }

    run.current_map_id = Some(next.id);
    run.push_log(format!("Advancing to {}", next.name));
    outcome.push(TickEvent::MapAdvanced { map_id: next.id });
}

/// Eats one consumable when hp is low and the cooldown is up.
fn auto_eat(
    state: &StateSnapshot,
    rules: &Ruleset,
    run: &mut CombatRunState,
    elapsed_ms: i64,
    outcome: &mut TickOutcome,
) {
    let balance = &rules.balance;
    run.consumable_cooldown_ms -= elapsed_ms;

    let max_hp = state.max_hp(balance.hp_per_hitpoints_level);
    if run.consumable_cooldown_ms > 0 || run.hp as f64 > max_hp as f64 * balance.auto_eat_hp_fraction
    {
        return;
    }
    let Some(consumable) = state.consumable.as_ref().filter(|c| c.count > 0) else {
        return;
    };
    let Some(heals) = rules
        .catalog
        .resource(&consumable.item.base)
        .and_then(|r| r.heals)
    else {
        return;
    };

    let healed = heals.min(max_hp.saturating_sub(run.hp));
    run.hp += healed;
    run.consumable_cooldown_ms = balance.consumable_cooldown_ms;
    run.push_log(format!("You eat a {} and heal {}", consumable.item, healed));

    let mut left = consumable.clone();
    left.count -= 1;
    outcome.patch.consumable = Some((left.count > 0).then_some(left));
    outcome.push(TickEvent::ConsumableEaten {
        item: consumable.item.clone(),
        healed,
    });
}

/// Returns the key already paid for a boss spawn that has not happened yet.
///
/// Call before leaving the run's current map.
pub fn refund_prepaid_key(
    state: &StateSnapshot,
    rules: &Ruleset,
    run: &mut CombatRunState,
    patch: &mut StatePatch,
) {
    if !run.prepaid_spawn {
        return;
    }
    run.prepaid_spawn = false;
    let key = run
        .current_map_id
        .and_then(|id| rules.catalog.map(id))
        .and_then(CombatMap::boss_key);
    if let Some(key) = key {
        tracing::debug!(key, "refunding unused boss key");
        patch.add_item(state, &ItemId::new(key), 1);
    }
}

/// Starts fighting on `map_id`.
///
/// Boss maps spend one key now, which pays for the first spawn. Restarting
/// on a boss map whose spawn is already paid charges nothing, and leaving
/// one returns the unused key. Starting from idle restores full hp.
pub fn start_combat(
    state: &StateSnapshot,
    rules: &Ruleset,
    map_id: u32,
) -> Result<StatePatch, ActionError> {
    let map = rules
        .catalog
        .map(map_id)
        .ok_or(ActionError::UnknownMap(map_id))?;
    if !is_map_unlocked(map_id, state.combat.max_map_completed) {
        return Err(ActionError::MapLocked {
            map_id,
            max_completed: state.combat.max_map_completed,
        });
    }

    let mut patch = StatePatch::default();
    let mut run = state.combat.clone();

    let already_paid = run.prepaid_spawn && run.current_map_id == Some(map_id);
    if !already_paid {
        refund_prepaid_key(state, rules, &mut run, &mut patch);
        if let Some(key) = map.required_key.as_deref() {
            let key_id = ItemId::new(key);
            if patch.item_count(state, &key_id) == 0 {
                return Err(ActionError::MissingKey(key.to_string()));
            }
            if map.is_boss {
                patch.remove_item(state, &key_id, 1);
                run.prepaid_spawn = true;
            }
        }
    }

    if run.current_map_id.is_none() {
        run.hp = state.max_hp(rules.balance.hp_per_hitpoints_level);
        run.consumable_cooldown_ms = 0;
    }
    run.current_map_id = Some(map_id);
    run.enemy_hp = None;
    run.respawn_ms = rules.balance.respawn_delay_ms;
    run.attack_cooldown_ms = 0;
    run.push_log(format!("Travelling to {}", map.name));

    tracing::debug!(map_id, "combat started");
    patch.combat = Some(run);
    patch.set_action(ActiveAction::Combat);
    Ok(patch)
}
