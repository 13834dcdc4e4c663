//! Read-only reference data: resources, recipes, upgrades and combat maps.

use super::data::{standard_resources, standard_upgrades};
use super::types::Resource;
use crate::maps::{standard_maps, CombatMap};
use crate::skills::Skill;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What a progression upgrade affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpScope {
    Skill(Skill),
    Combat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpgradeEffect {
    /// +speed bonus for actions of this skill.
    Speed { skill: Skill },
    /// Multiplies XP earned within the scope.
    XpTome { scope: XpScope, multiplier: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    /// Coin price.
    #[serde(default)]
    pub cost: u64,
    pub effect: UpgradeEffect,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    resources: BTreeMap<String, Resource>,
    maps: Vec<CombatMap>,
    upgrades: BTreeMap<String, Upgrade>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in game content.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for resource in standard_resources() {
            catalog.add_resource(resource);
        }
        for map in standard_maps() {
            catalog.add_map(map);
        }
        for upgrade in standard_upgrades() {
            catalog.add_upgrade(upgrade);
        }
        catalog
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.insert(resource.id.clone(), resource);
    }

    /// Adds or replaces a map, keeping maps ordered by id.
    pub fn add_map(&mut self, map: CombatMap) {
        match self.maps.binary_search_by_key(&map.id, |m| m.id) {
            Ok(idx) => self.maps[idx] = map,
            Err(idx) => self.maps.insert(idx, map),
        }
    }

    pub fn add_upgrade(&mut self, upgrade: Upgrade) {
        self.upgrades.insert(upgrade.id.clone(), upgrade);
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn map(&self, id: u32) -> Option<&CombatMap> {
        self.maps
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|idx| &self.maps[idx])
    }

    pub fn maps(&self) -> &[CombatMap] {
        &self.maps
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.get(id)
    }

    pub fn upgrades(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.values()
    }

    /// Effects of the owned upgrades that exist in this catalog.
    pub fn owned_effects<'a>(
        &'a self,
        owned: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a UpgradeEffect> + 'a {
        owned
            .iter()
            .filter_map(move |id| self.upgrade(id))
            .map(|u| &u.effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_content() {
        let catalog = Catalog::standard();
        assert!(catalog.resource("logs").is_some());
        assert!(catalog.resource("bronze_bar").is_some());
        assert!(catalog.map(1).is_some());
        assert!(catalog.map(10).is_some());
        assert!(catalog.upgrade("tome_of_war").is_some());
    }

    #[test]
    fn test_maps_are_ordered_and_contiguous() {
        let catalog = Catalog::standard();
        for (idx, map) in catalog.maps().iter().enumerate() {
            assert_eq!(map.id, idx as u32 + 1);
        }
    }

    #[test]
    fn test_every_recipe_input_exists() {
        let catalog = Catalog::standard();
        for resource in catalog.resources() {
            for input in &resource.inputs {
                assert!(
                    catalog.resource(&input.item.base).is_some(),
                    "{} needs unknown input {}",
                    resource.id,
                    input.item
                );
            }
        }
    }

    #[test]
    fn test_every_drop_references_known_item() {
        let catalog = Catalog::standard();
        for map in catalog.maps() {
            for drop in &map.drops {
                assert!(
                    catalog.resource(&drop.item).is_some(),
                    "map {} drops unknown {}",
                    map.id,
                    drop.item
                );
            }
            if let Some(key) = &map.required_key {
                assert!(catalog.resource(key).is_some());
            }
        }
        for resource in catalog.resources() {
            for drop in &resource.contents {
                assert!(catalog.resource(&drop.item).is_some());
            }
        }
    }

    #[test]
    fn test_add_map_replaces_same_id() {
        let mut catalog = Catalog::standard();
        let mut map = catalog.map(3).cloned().unwrap();
        map.enemy_name = "Replaced".to_string();
        catalog.add_map(map);
        assert_eq!(catalog.map(3).unwrap().enemy_name, "Replaced");
        assert_eq!(catalog.maps().len(), standard_maps().len());
    }
}
