//! Combat map definitions.

use crate::core::constants::COINS_ITEM_ID;
use crate::items::Drop;
use serde::{Deserialize, Serialize};

/// A single combat encounter location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatMap {
    pub id: u32,
    /// World grouping shown in map menus.
    pub world: String,
    pub name: String,
    pub enemy_name: String,
    /// Unscaled hp; see `combat::types::enemy_stats`.
    pub enemy_hp: u32,
    pub enemy_attack: u32,
    pub xp_reward: u64,
    #[serde(default)]
    pub drops: Vec<Drop>,
    #[serde(default)]
    pub is_boss: bool,
    /// Key needed to enter. Boss maps also consume one per spawn.
    #[serde(default)]
    pub required_key: Option<String>,
}

impl CombatMap {
    /// Key spent on entry and on every respawn; only boss maps charge one.
    pub fn boss_key(&self) -> Option<&str> {
        self.required_key.as_deref().filter(|_| self.is_boss)
    }
}

struct MapDef {
    world: &'static str,
    name: &'static str,
    enemy: &'static str,
    hp: u32,
    attack: u32,
    xp: u64,
    drops: Vec<Drop>,
    boss: bool,
    key: Option<&'static str>,
}

/// Returns all combat maps, ordered by id starting at 1.
pub fn standard_maps() -> Vec<CombatMap> {
    let defs = vec![
        // Green Meadows
        MapDef {
            world: "Green Meadows",
            name: "Rat Burrows",
            enemy: "Meadow Rat",
            hp: 20,
            attack: 2,
            xp: 40,
            drops: vec![Drop::new(COINS_ITEM_ID, 1.0, 2, 5), Drop::single("bones", 0.5)],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Green Meadows",
            name: "Chicken Coop",
            enemy: "Wild Chicken",
            hp: 28,
            attack: 4,
            xp: 55,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 3, 7),
                Drop::new("feather", 0.8, 2, 6),
            ],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Green Meadows",
            name: "Cow Pasture",
            enemy: "Cow",
            hp: 40,
            attack: 5,
            xp: 75,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 4, 9),
                Drop::single("cowhide", 0.5),
                Drop::single("raw_shrimp", 0.1),
            ],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Green Meadows",
            name: "Goblin Camp",
            enemy: "Goblin",
            hp: 55,
            attack: 8,
            xp: 100,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 5, 12),
                Drop::single("goblin_key", 0.08),
                Drop::single("bronze_amulet", 0.01),
            ],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Green Meadows",
            name: "Warlord's Tent",
            enemy: "Goblin Warlord",
            hp: 150,
            attack: 14,
            xp: 360,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 40, 80),
                Drop::single("treasure_chest", 0.5),
                Drop::single("enchant_scroll_4", 0.2),
            ],
            boss: true,
            key: Some("goblin_key"),
        },
        // Whispering Woods
        MapDef {
            world: "Whispering Woods",
            name: "Wolf Den",
            enemy: "Dark Wolf",
            hp: 90,
            attack: 16,
            xp: 180,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 10, 20),
                Drop::single("wolf_pelt", 0.4),
            ],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Whispering Woods",
            name: "Bandit Hideout",
            enemy: "Bandit",
            hp: 120,
            attack: 20,
            xp: 240,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 15, 30),
                Drop::new("iron_bar", 0.1, 1, 2),
                Drop::single("enchant_scroll_2", 0.05),
            ],
            boss: false,
            key: None,
        },
        // Frostpeak
        MapDef {
            world: "Frostpeak",
            name: "Troll Bridge",
            enemy: "Ice Troll",
            hp: 160,
            attack: 26,
            xp: 330,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 20, 40),
                Drop::single("troll_tusk", 0.3),
            ],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Frostpeak",
            name: "Giant's Steps",
            enemy: "Frost Giant",
            hp: 210,
            attack: 32,
            xp: 450,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 30, 60),
                Drop::single("frozen_key", 0.1),
                Drop::new("raw_eel", 0.2, 1, 3),
            ],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Frostpeak",
            name: "Wyrm's Glacier",
            enemy: "Frost Wyrm",
            hp: 500,
            attack: 45,
            xp: 1260,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 150, 300),
                Drop::single("treasure_chest", 1.0),
                Drop::single("enchant_scroll_8", 0.1),
                Drop::single("frost_ring", 0.05),
            ],
            boss: true,
            key: Some("frozen_key"),
        },
        // Ashen Wastes
        MapDef {
            world: "Ashen Wastes",
            name: "Cinder Fields",
            enemy: "Ember Imp",
            hp: 300,
            attack: 50,
            xp: 600,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 40, 80),
                Drop::single("ember_key", 0.08),
            ],
            boss: false,
            key: None,
        },
        MapDef {
            world: "Ashen Wastes",
            name: "Magma Core",
            enemy: "Magma Golem",
            hp: 800,
            attack: 70,
            xp: 1950,
            drops: vec![
                Drop::new(COINS_ITEM_ID, 1.0, 300, 600),
                Drop::new("treasure_chest", 1.0, 1, 2),
                Drop::single("enchant_scroll_8", 0.2),
            ],
            boss: true,
            key: Some("ember_key"),
        },
    ];

    defs.into_iter()
        .enumerate()
        .map(|(idx, def)| CombatMap {
            id: idx as u32 + 1,
            world: def.world.to_string(),
            name: def.name.to_string(),
            enemy_name: def.enemy.to_string(),
            enemy_hp: def.hp,
            enemy_attack: def.attack,
            xp_reward: def.xp,
            drops: def.drops,
            is_boss: def.boss,
            required_key: def.key.map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_boss_map_charges_a_key() {
        let maps = standard_maps();
        let bosses: Vec<u32> = maps.iter().filter(|m| m.is_boss).map(|m| m.id).collect();
        assert_eq!(bosses, vec![5, 10, 12]);
        for map in &maps {
            assert_eq!(map.boss_key().is_some(), map.is_boss, "map {}", map.id);
        }
    }

    #[test]
    fn test_gated_map_without_boss_flag_charges_nothing() {
        let mut map = standard_maps().remove(0);
        map.required_key = Some("goblin_key".to_string());
        assert_eq!(map.boss_key(), None);
        map.is_boss = true;
        assert_eq!(map.boss_key(), Some("goblin_key"));
    }
}
