//! Non-combat production: gathering and crafting ticks.

use crate::combat::logic::refund_prepaid_key;
use crate::core::balance::Balance;
use crate::core::error::ActionError;
use crate::core::game_state::{ActiveAction, StatePatch, StateSnapshot};
use crate::core::progression::grant_xp;
use crate::core::tick::{Ruleset, TickEvent, TickOutcome};
use crate::items::{Catalog, ItemId, Resource, UpgradeEffect, XpScope};
use crate::skills::{CombatStyle, Skill};

/// Product of every owned XP tome matching `scope`; 1.0 without any.
pub fn xp_multiplier(state: &StateSnapshot, catalog: &Catalog, scope: XpScope) -> f64 {
    catalog
        .owned_effects(&state.upgrades)
        .filter_map(|effect| match effect {
            UpgradeEffect::XpTome {
                scope: tome_scope,
                multiplier,
            } if *tome_scope == scope => Some(*multiplier),
            _ => None,
        })
        .product()
}

/// `1 + bonus` per owned speed upgrade for `skill`, capped.
pub fn speed_multiplier(
    state: &StateSnapshot,
    catalog: &Catalog,
    balance: &Balance,
    skill: Skill,
) -> f64 {
    let owned = catalog
        .owned_effects(&state.upgrades)
        .filter(|effect| matches!(effect, UpgradeEffect::Speed { skill: s } if *s == skill))
        .count();
    (1.0 + owned as f64 * balance.speed_bonus_per_upgrade).min(balance.max_speed_multiplier)
}

/// Interval between production ticks, floored at `min_tick_ms`.
pub fn production_tick_ms(resource: &Resource, speed: f64, balance: &Balance) -> u64 {
    let speed = if speed > 0.0 { speed } else { 1.0 };
    let scaled = (resource.base_tick_ms as f64 / speed).floor() as u64;
    scaled.max(balance.min_tick_ms)
}

/// Grants `gained` XP to `skill` on top of whatever `patch` already holds,
/// recording a level-up event.
pub fn award_xp(
    state: &StateSnapshot,
    patch: &mut StatePatch,
    balance: &Balance,
    skill: Skill,
    gained: u64,
    events: &mut Vec<TickEvent>,
) {
    if gained == 0 {
        return;
    }
    let before = patch.skill(state, skill);
    let after = grant_xp(before, gained, balance.xp_per_level);
    if after.level > before.level {
        tracing::debug!(skill = %skill, level = after.level, "level up");
        events.push(TickEvent::LeveledUp {
            skill,
            level: after.level,
        });
    }
    patch.set_skill(skill, after);
}

/// One production step: consume inputs, add one unit, grant XP.
///
/// Missing inputs cancel the action without consuming anything. A resource
/// absent from the catalog makes the tick a no-op.
pub fn production_tick(state: &StateSnapshot, rules: &Ruleset) -> TickOutcome {
    let Some(ActiveAction::Production {
        skill, resource_id, ..
    }) = &state.active_action
    else {
        return TickOutcome::default();
    };
    let Some(resource) = rules.catalog.resource(resource_id) else {
        tracing::debug!(resource = %resource_id, "production target not in catalog");
        return TickOutcome::default();
    };

    let mut outcome = TickOutcome::default();

    if let Some(missing) = resource
        .inputs
        .iter()
        .find(|input| state.item_count(&input.item) < input.count)
    {
        tracing::debug!(
            resource = %resource_id,
            missing = %missing.item,
            "out of materials, cancelling production"
        );
        outcome.patch.clear_action();
        outcome.push(TickEvent::ProductionStalled {
            resource_id: resource_id.clone(),
            missing: missing.item.clone(),
        });
        return outcome;
    }

    for input in &resource.inputs {
        outcome.patch.remove_item(state, &input.item, input.count);
    }
    let produced = ItemId::new(resource.id.as_str());
    outcome.patch.add_item(state, &produced, 1);

    let multiplier = xp_multiplier(state, &rules.catalog, XpScope::Skill(*skill));
    let xp_gained = (resource.xp_reward as f64 * multiplier).floor() as u64;
    award_xp(
        state,
        &mut outcome.patch,
        &rules.balance,
        *skill,
        xp_gained,
        &mut outcome.events,
    );
    outcome.push(TickEvent::ItemProduced {
        item: produced,
        skill: *skill,
        xp_gained,
    });
    outcome
}

/// Switches the active action to producing `resource_id` with `skill`.
pub fn start_production(
    state: &StateSnapshot,
    rules: &Ruleset,
    skill: Skill,
    resource_id: &str,
) -> Result<StatePatch, ActionError> {
    let resource = rules
        .catalog
        .resource(resource_id)
        .ok_or_else(|| ActionError::UnknownResource(resource_id.to_string()))?;
    if resource.skill != Some(skill) {
        return Err(ActionError::WrongSkill {
            resource: resource.name.clone(),
            skill,
        });
    }
    let current = state.skill_level(skill);
    if current < resource.required_level {
        return Err(ActionError::LevelTooLow {
            required: resource.required_level,
            current,
        });
    }

    let speed = speed_multiplier(state, &rules.catalog, &rules.balance, skill);
    let tick_ms = production_tick_ms(resource, speed, &rules.balance);

    let mut patch = leave_combat(state, rules);
    patch.set_action(ActiveAction::Production {
        skill,
        resource_id: resource.id.clone(),
        tick_ms,
        progress_ms: 0,
    });
    tracing::debug!(skill = %skill, resource = %resource.id, tick_ms, "production started");
    Ok(patch)
}

/// Picks which skill supplies strength in combat and earns its XP share.
pub fn set_combat_style(style: CombatStyle) -> StatePatch {
    StatePatch {
        combat_style: Some(style),
        ..StatePatch::default()
    }
}

/// Buys an upgrade with coins. Speed upgrades apply to actions started
/// afterwards; tomes apply from the next XP grant.
pub fn buy_upgrade(
    state: &StateSnapshot,
    rules: &Ruleset,
    upgrade_id: &str,
) -> Result<StatePatch, ActionError> {
    let upgrade = rules
        .catalog
        .upgrade(upgrade_id)
        .ok_or_else(|| ActionError::UnknownUpgrade(upgrade_id.to_string()))?;
    if state.upgrades.contains(&upgrade.id) {
        return Err(ActionError::AlreadyOwned(upgrade.name.clone()));
    }
    if state.coins < upgrade.cost {
        return Err(ActionError::InsufficientCoins {
            needed: upgrade.cost,
            available: state.coins,
        });
    }

    let mut patch = StatePatch::default();
    patch.spend_coins(state, upgrade.cost);
    patch.unlocked.insert(upgrade.id.clone());
    tracing::debug!(upgrade = %upgrade.id, cost = upgrade.cost, "upgrade bought");
    Ok(patch)
}

/// Clears the active action. Leaving combat also clears the current map
/// and returns a boss key paid for a spawn that never happened.
pub fn stop_action(state: &StateSnapshot, rules: &Ruleset) -> StatePatch {
    let mut patch = leave_combat(state, rules);
    patch.clear_action();
    patch
}

fn leave_combat(state: &StateSnapshot, rules: &Ruleset) -> StatePatch {
    let mut patch = StatePatch::default();
    if state.combat.current_map_id.is_some() {
        let mut run = state.combat.clone();
        refund_prepaid_key(state, rules, &mut run, &mut patch);
        run.reset_to_idle();
        patch.combat = Some(run);
    }
    patch
}
