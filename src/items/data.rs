//! Built-in item, recipe and upgrade definitions.

use super::catalog::{Upgrade, UpgradeEffect, XpScope};
use super::drops::WeightedDrop;
use super::types::{EquipmentSlot, Ingredient, ItemStats, Resource};
use crate::core::constants::COINS_ITEM_ID;
use crate::skills::Skill;

fn stats(accuracy: f64, strength: f64, armor: f64, crit_chance: f64) -> ItemStats {
    ItemStats {
        accuracy,
        strength,
        armor,
        crit_chance,
    }
}

/// Returns every resource, recipe and loot item in the game.
pub fn standard_resources() -> Vec<Resource> {
    use Skill::*;

    vec![
        Resource::new(COINS_ITEM_ID, "Coins", 1),
        // Woodcutting
        Resource::new("logs", "Logs", 2).trained_by(Woodcutting, 1, 10, 3000),
        Resource::new("oak_logs", "Oak Logs", 8).trained_by(Woodcutting, 15, 25, 4000),
        Resource::new("willow_logs", "Willow Logs", 15).trained_by(Woodcutting, 30, 45, 5000),
        Resource::new("yew_logs", "Yew Logs", 60).trained_by(Woodcutting, 60, 120, 8000),
        // Mining
        Resource::new("copper_ore", "Copper Ore", 3).trained_by(Mining, 1, 10, 3000),
        Resource::new("tin_ore", "Tin Ore", 3).trained_by(Mining, 1, 10, 3000),
        Resource::new("iron_ore", "Iron Ore", 12).trained_by(Mining, 15, 30, 4500),
        Resource::new("coal", "Coal", 20).trained_by(Mining, 30, 40, 5000),
        Resource::new("mithril_ore", "Mithril Ore", 70).trained_by(Mining, 55, 90, 7000),
        // Fishing
        Resource::new("raw_shrimp", "Raw Shrimp", 2).trained_by(Fishing, 1, 10, 3000),
        Resource::new("raw_trout", "Raw Trout", 10).trained_by(Fishing, 20, 30, 4000),
        Resource::new("raw_eel", "Raw Eel", 25).trained_by(Fishing, 40, 60, 5500),
        // Cooking
        Resource::new("shrimp", "Shrimp", 5)
            .trained_by(Cooking, 1, 12, 2000)
            .with_inputs(vec![Ingredient::new("raw_shrimp", 1)])
            .healing(3),
        Resource::new("trout", "Trout", 18)
            .trained_by(Cooking, 15, 35, 2500)
            .with_inputs(vec![Ingredient::new("raw_trout", 1)])
            .healing(8),
        Resource::new("eel", "Eel", 40)
            .trained_by(Cooking, 35, 70, 3000)
            .with_inputs(vec![Ingredient::new("raw_eel", 1)])
            .healing(15),
        // Smithing: bars
        Resource::new("bronze_bar", "Bronze Bar", 8)
            .trained_by(Smithing, 1, 12, 2500)
            .with_inputs(vec![
                Ingredient::new("copper_ore", 1),
                Ingredient::new("tin_ore", 1),
            ]),
        Resource::new("iron_bar", "Iron Bar", 30)
            .trained_by(Smithing, 15, 30, 3000)
            .with_inputs(vec![Ingredient::new("iron_ore", 1), Ingredient::new("coal", 1)]),
        Resource::new("mithril_bar", "Mithril Bar", 110)
            .trained_by(Smithing, 50, 80, 4000)
            .with_inputs(vec![
                Ingredient::new("mithril_ore", 1),
                Ingredient::new("coal", 2),
            ]),
        // Smithing: gear
        Resource::new("bronze_sword", "Bronze Sword", 20)
            .trained_by(Smithing, 3, 25, 3000)
            .with_inputs(vec![Ingredient::new("bronze_bar", 2)])
            .equippable(EquipmentSlot::Weapon, stats(4.0, 3.0, 0.0, 0.0)),
        Resource::new("bronze_helm", "Bronze Helm", 12)
            .trained_by(Smithing, 2, 15, 2500)
            .with_inputs(vec![Ingredient::new("bronze_bar", 1)])
            .equippable(EquipmentSlot::Helmet, stats(0.0, 0.0, 3.0, 0.0)),
        Resource::new("bronze_shield", "Bronze Shield", 20)
            .trained_by(Smithing, 5, 25, 3000)
            .with_inputs(vec![Ingredient::new("bronze_bar", 2)])
            .equippable(EquipmentSlot::Shield, stats(0.0, 0.0, 5.0, 0.0)),
        Resource::new("bronze_platebody", "Bronze Platebody", 45)
            .trained_by(Smithing, 8, 60, 4000)
            .with_inputs(vec![Ingredient::new("bronze_bar", 5)])
            .equippable(EquipmentSlot::Body, stats(0.0, 0.0, 9.0, 0.0)),
        Resource::new("iron_sword", "Iron Sword", 70)
            .trained_by(Smithing, 18, 60, 3500)
            .with_inputs(vec![Ingredient::new("iron_bar", 2)])
            .equippable(EquipmentSlot::Weapon, stats(10.0, 7.0, 0.0, 0.01)),
        Resource::new("iron_platebody", "Iron Platebody", 160)
            .trained_by(Smithing, 25, 140, 5000)
            .with_inputs(vec![Ingredient::new("iron_bar", 5)])
            .equippable(EquipmentSlot::Body, stats(0.0, 0.0, 20.0, 0.0)),
        Resource::new("mithril_sword", "Mithril Sword", 240)
            .trained_by(Smithing, 52, 170, 4500)
            .with_inputs(vec![Ingredient::new("mithril_bar", 2)])
            .equippable(EquipmentSlot::Weapon, stats(22.0, 15.0, 0.0, 0.02)),
        // Crafting: enchanting scrolls
        Resource::new("enchant_scroll_1", "Scroll of Enchanting I", 10)
            .trained_by(Crafting, 1, 15, 3000)
            .with_inputs(vec![Ingredient::new("logs", 5)])
            .scroll(1),
        Resource::new("enchant_scroll_2", "Scroll of Enchanting II", 40)
            .trained_by(Crafting, 12, 40, 4000)
            .with_inputs(vec![Ingredient::new("oak_logs", 5)])
            .scroll(2),
        Resource::new("enchant_scroll_3", "Scroll of Enchanting III", 90)
            .trained_by(Crafting, 28, 80, 5000)
            .with_inputs(vec![Ingredient::new("willow_logs", 5)])
            .scroll(3),
        Resource::new("enchant_scroll_4", "Scroll of Enchanting IV", 200).scroll(4),
        Resource::new("enchant_scroll_6", "Scroll of Enchanting VI", 600).scroll(6),
        Resource::new("enchant_scroll_8", "Scroll of Enchanting VIII", 1500).scroll(8),
        // Combat loot
        Resource::new("bones", "Bones", 1),
        Resource::new("feather", "Feather", 1),
        Resource::new("cowhide", "Cowhide", 6),
        Resource::new("wolf_pelt", "Wolf Pelt", 20),
        Resource::new("troll_tusk", "Troll Tusk", 45),
        Resource::new("goblin_key", "Goblin Key", 50),
        Resource::new("frozen_key", "Frozen Key", 150),
        Resource::new("ember_key", "Ember Key", 300),
        Resource::new("bronze_amulet", "Bronze Amulet", 80)
            .equippable(EquipmentSlot::Amulet, stats(3.0, 1.0, 1.0, 0.02)),
        Resource::new("frost_ring", "Frost Ring", 400)
            .equippable(EquipmentSlot::Ring, stats(6.0, 4.0, 4.0, 0.03)),
        Resource::new("treasure_chest", "Treasure Chest", 100).containing(vec![
            WeightedDrop::new(COINS_ITEM_ID, 10.0, 50, 200),
            WeightedDrop::new("iron_bar", 5.0, 2, 5),
            WeightedDrop::new("enchant_scroll_2", 4.0, 1, 2),
            WeightedDrop::new("enchant_scroll_4", 2.0, 1, 1),
            WeightedDrop::new("enchant_scroll_6", 1.0, 1, 1),
        ]),
    ]
}

/// Returns every purchasable progression upgrade.
pub fn standard_upgrades() -> Vec<Upgrade> {
    fn speed(id: &str, name: &str, skill: Skill, cost: u64) -> Upgrade {
        Upgrade {
            id: id.to_string(),
            name: name.to_string(),
            cost,
            effect: UpgradeEffect::Speed { skill },
        }
    }
    fn tome(id: &str, name: &str, scope: XpScope) -> Upgrade {
        Upgrade {
            id: id.to_string(),
            name: name.to_string(),
            cost: 5_000,
            effect: UpgradeEffect::XpTome {
                scope,
                multiplier: 1.5,
            },
        }
    }

    vec![
        speed("bronze_axe", "Bronze Axe", Skill::Woodcutting, 250),
        speed("iron_axe", "Iron Axe", Skill::Woodcutting, 1_500),
        speed("bronze_pickaxe", "Bronze Pickaxe", Skill::Mining, 250),
        speed("iron_pickaxe", "Iron Pickaxe", Skill::Mining, 1_500),
        speed("fine_rod", "Fine Fishing Rod", Skill::Fishing, 800),
        speed("sturdy_anvil", "Sturdy Anvil", Skill::Smithing, 800),
        speed("iron_skillet", "Iron Skillet", Skill::Cooking, 800),
        speed("carving_knife", "Carving Knife", Skill::Crafting, 800),
        tome("tome_of_forestry", "Tome of Forestry", XpScope::Skill(Skill::Woodcutting)),
        tome("tome_of_prospecting", "Tome of Prospecting", XpScope::Skill(Skill::Mining)),
        tome("tome_of_angling", "Tome of Angling", XpScope::Skill(Skill::Fishing)),
        tome("tome_of_the_forge", "Tome of the Forge", XpScope::Skill(Skill::Smithing)),
        tome("tome_of_war", "Tome of War", XpScope::Combat),
    ]
}
