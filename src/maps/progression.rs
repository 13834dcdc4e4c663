//! Map unlock rules.

use super::data::CombatMap;
use crate::items::Catalog;

/// Map n+1 opens once map n is cleared; map 1 is always open.
pub fn is_map_unlocked(map_id: u32, max_map_completed: u32) -> bool {
    map_id >= 1 && map_id <= max_map_completed.saturating_add(1)
}

/// The map following `map_id`, if the catalog has one.
pub fn next_map(catalog: &Catalog, map_id: u32) -> Option<&CombatMap> {
    catalog.map(map_id.checked_add(1)?)
}

/// Maps grouped by world, in id order.
pub fn maps_by_world(catalog: &Catalog) -> Vec<(&str, Vec<&CombatMap>)> {
    let mut worlds: Vec<(&str, Vec<&CombatMap>)> = Vec::new();
    for map in catalog.maps() {
        match worlds.last_mut() {
            Some((world, maps)) if *world == map.world.as_str() => maps.push(map),
            _ => worlds.push((map.world.as_str(), vec![map])),
        }
    }
    worlds
}
