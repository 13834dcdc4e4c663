//! SkillQuest command-line host.
//!
//! Each invocation loads the save, catches up on the time since it was
//! written, runs one command, and saves again.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skillquest::combat::start_combat;
use skillquest::core::offline::{replay, seconds_since};
use skillquest::core::{ActionError, ActiveAction, Balance, GameError, Ruleset, StateSnapshot};
use skillquest::enhancement::{attempt_enchant, tier_suffix, EnchantTarget};
use skillquest::items::{
    equip_consumable, equip_item, open_container, unequip_item, Catalog, EquipmentSlot, ItemId,
};
use skillquest::maps::{is_map_unlocked, maps_by_world};
use skillquest::skills::{
    buy_upgrade, set_combat_style, start_production, stop_action, CombatStyle,
};
use skillquest::utils::{SaveFile, SaveManager};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "skillquest")]
#[command(about = "Idle skilling and combat in your terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Save file path (defaults to the platform config directory)
    #[arg(long, global = true)]
    save: Option<PathBuf>,

    /// TOML file overriding balance constants
    #[arg(long, global = true)]
    balance: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a fresh character, overwriting any save
    New,

    /// Show skills, inventory and the current action
    Status,

    /// Gather or craft a resource
    Gather {
        /// Resource id, e.g. `logs` or `bronze_bar`
        resource: String,
    },

    /// List combat maps and which are open
    Maps,

    /// Fight on a combat map
    Fight {
        map: u32,
    },

    /// Stop the current action
    Stop,

    /// Enchant an equipped or stored item
    Enchant {
        /// Scroll id, e.g. `enchant_scroll_1`
        scroll: String,
        /// Equipment slot to enchant
        #[arg(long, conflicts_with = "item")]
        slot: Option<String>,
        /// Inventory item to enchant
        #[arg(long)]
        item: Option<String>,
    },

    /// Open a container from the inventory
    Open {
        item: String,
    },

    /// Equip gear from the inventory
    Equip {
        /// Item id, e.g. `bronze_sword` or `iron_sword_e2`
        item: String,
    },

    /// Return an equipped item to the inventory
    Unequip {
        /// Weapon, Shield, Helmet, Body, Legs, Gloves, Boots, Amulet or Ring
        slot: String,
    },

    /// Put a food stack in the auto-eat slot
    Eat {
        item: String,
    },

    /// Choose melee, ranged or magic
    Style {
        style: String,
    },

    /// List upgrades and their prices
    Shop,

    /// Buy an upgrade
    Buy {
        upgrade: String,
    },

    /// Simulate time passing
    CatchUp {
        /// Seconds to simulate (defaults to time since the last save)
        #[arg(long)]
        seconds: Option<u64>,
    },

    /// Toggle moving on to the next map after each victory
    AutoProgress {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GameError> {
    let balance = match &cli.balance {
        Some(path) => Balance::load(path)?,
        None => Balance::default(),
    };
    let rules = Ruleset::new(Catalog::standard(), balance);
    let manager = match &cli.save {
        Some(path) => SaveManager::with_path(path),
        None => SaveManager::new()?,
    };
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    if let Command::New = cli.command {
        let save = SaveFile::new(StateSnapshot::new(rules.balance.hp_per_hitpoints_level));
        manager.save(&save)?;
        println!("New character saved to {}", manager.path().display());
        return Ok(());
    }

    let mut save = if manager.save_exists() {
        manager.load()?
    } else {
        tracing::info!("no save found, starting fresh");
        SaveFile::new(StateSnapshot::new(rules.balance.hp_per_hitpoints_level))
    };

    let (elapsed, from_clock) = match &cli.command {
        Command::CatchUp {
            seconds: Some(seconds),
        } => (*seconds, false),
        _ => (seconds_since(save.last_save_time), true),
    };
    let (caught_up, report) = replay(&save.snapshot, &rules, elapsed, &mut rng);
    save.snapshot = caught_up;
    if from_clock {
        // Time past the offline cap is forfeited.
        if elapsed > rules.balance.max_offline_seconds {
            save.touch();
        } else {
            save.advance_clock(elapsed);
        }
    }
    if report.has_gains() || matches!(cli.command, Command::CatchUp { .. }) {
        for line in report.summary_lines() {
            println!("{line}");
        }
    }

    let state = &save.snapshot;
    let patch = match &cli.command {
        Command::New | Command::CatchUp { .. } => None,
        Command::Status => {
            print_status(state, &rules);
            None
        }
        Command::Gather { resource } => {
            let skill = rules
                .catalog
                .resource(resource)
                .and_then(|r| r.skill)
                .ok_or_else(|| ActionError::UnknownResource(resource.clone()))?;
            let patch = start_production(state, &rules, skill, resource)?;
            println!("Started {skill}: {resource}");
            Some(patch)
        }
        Command::Maps => {
            print_maps(state, &rules);
            None
        }
        Command::Fight { map } => {
            let patch = start_combat(state, &rules, *map)?;
            println!("Heading to map {map}");
            Some(patch)
        }
        Command::Stop => {
            println!("Stopped");
            Some(stop_action(state, &rules))
        }
        Command::Enchant { scroll, slot, item } => {
            let target = match (slot, item) {
                (Some(name), _) => EnchantTarget::Equipped(parse_slot(name)?),
                (None, Some(item)) => EnchantTarget::Inventory(ItemId::from(item.as_str())),
                (None, None) => EnchantTarget::Equipped(EquipmentSlot::Weapon),
            };
            let (patch, result) =
                attempt_enchant(state, &rules, &target, &ItemId::from(scroll.as_str()), &mut rng)?;
            if result.success {
                println!(
                    "Success! {}{} ({} coins, {:.0}% chance)",
                    result.item.base,
                    tier_suffix(result.new_tier),
                    result.cost,
                    result.chance
                );
            } else {
                println!(
                    "The enchantment fizzles ({} coins, {:.0}% chance)",
                    result.cost, result.chance
                );
            }
            Some(patch)
        }
        Command::Open { item } => {
            let patch = open_container(state, &rules, &ItemId::from(item.as_str()), &mut rng)?;
            let after = state.merged(patch.clone());
            for (id, count) in &after.inventory {
                let gained = count.saturating_sub(state.item_count(id));
                if gained > 0 {
                    println!("Found {id} x{gained}");
                }
            }
            if after.coins > state.coins {
                println!("Found {} coins", after.coins - state.coins);
            }
            Some(patch)
        }
        Command::Equip { item } => {
            let patch = equip_item(state, &rules, &ItemId::from(item.as_str()))?;
            println!("Equipped {item}");
            Some(patch)
        }
        Command::Unequip { slot } => {
            let slot = parse_slot(slot)?;
            let patch = unequip_item(state, slot)?;
            println!("Unequipped {}", slot.name());
            Some(patch)
        }
        Command::Eat { item } => {
            let patch = equip_consumable(state, &rules, &ItemId::from(item.as_str()))?;
            println!("Packed {item} for the fight");
            Some(patch)
        }
        Command::Style { style } => {
            let style = CombatStyle::from_name(style)
                .ok_or_else(|| ActionError::UnknownStyle(style.clone()))?;
            println!("Fighting with {} (trains {})", style.name(), style.skill());
            Some(set_combat_style(style))
        }
        Command::Shop => {
            print_shop(state, &rules);
            None
        }
        Command::Buy { upgrade } => {
            let patch = buy_upgrade(state, &rules, upgrade)?;
            println!("Bought {upgrade}");
            Some(patch)
        }
        Command::AutoProgress { enabled } => {
            println!("Auto-progress {}", if *enabled { "on" } else { "off" });
            None
        }
    };

    if let Some(patch) = patch {
        save.snapshot.apply(patch);
    }
    if let Command::AutoProgress { enabled } = cli.command {
        save.snapshot.auto_progress = enabled;
    }
    manager.save(&save)?;
    Ok(())
}

fn parse_slot(name: &str) -> Result<EquipmentSlot, ActionError> {
    EquipmentSlot::from_name(name).ok_or_else(|| ActionError::UnknownSlot(name.to_string()))
}

fn print_shop(state: &StateSnapshot, rules: &Ruleset) {
    println!("Coins {}", state.coins);
    for upgrade in rules.catalog.upgrades() {
        let owned = if state.upgrades.contains(&upgrade.id) {
            "owned"
        } else {
            ""
        };
        println!(
            "  {:<20} {:<22} {:>6}  {owned}",
            upgrade.id, upgrade.name, upgrade.cost
        );
    }
}

fn print_maps(state: &StateSnapshot, rules: &Ruleset) {
    let cleared = state.combat.max_map_completed;
    for (world, maps) in maps_by_world(&rules.catalog) {
        println!("{world}");
        for map in maps {
            let mark = if map.id <= cleared {
                "x"
            } else if is_map_unlocked(map.id, cleared) {
                ">"
            } else {
                " "
            };
            let key = match (map.boss_key(), map.required_key.as_deref()) {
                (Some(k), _) => format!("  [boss, spends {k}]"),
                (None, Some(k)) => format!("  [needs {k}]"),
                (None, None) => String::new(),
            };
            println!("  [{mark}] {:>2} {} ({}){key}", map.id, map.name, map.enemy_name);
        }
    }
}

fn print_status(state: &StateSnapshot, rules: &Ruleset) {
    let max_hp = state.max_hp(rules.balance.hp_per_hitpoints_level);
    println!("HP {}/{}  Coins {}", state.combat.hp, max_hp, state.coins);
    println!("Style: {}", state.combat_style.name());
    if let Some(food) = &state.consumable {
        println!("Food: {} x{}", food.item, food.count);
    }

    match &state.active_action {
        None => println!("Idle"),
        Some(ActiveAction::Combat) => match state.combat.current_map_id {
            Some(id) => {
                let name = rules.catalog.map(id).map(|m| m.name.as_str()).unwrap_or("?");
                println!("Fighting on map {id} ({name})");
            }
            None => println!("Fighting"),
        },
        Some(ActiveAction::Production {
            skill,
            resource_id,
            tick_ms,
            progress_ms,
        }) => println!("{skill}: {resource_id} every {tick_ms}ms ({progress_ms}ms banked)"),
    }
    println!("Highest map cleared: {}", state.combat.max_map_completed);

    println!("\nSkills");
    for (skill, progress) in &state.skills {
        println!("  {:<12} {:>4}  ({} xp)", skill.name(), progress.level, progress.xp);
    }

    if !state.inventory.is_empty() {
        println!("\nInventory");
        for (item, count) in &state.inventory {
            println!("  {item} x{count}");
        }
    }

    let equipped: Vec<_> = state.equipment.iter_equipped().collect();
    if !equipped.is_empty() {
        println!("\nEquipment");
        for (slot, item) in equipped {
            println!("  {:<8} {}{}", slot.name(), item.base, tier_suffix(item.tier));
        }
    }

    for line in state.combat.log.iter().take(5) {
        println!("  > {line}");
    }
}
