use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::drops::WeightedDrop;
use crate::core::constants::ENCHANT_STAT_BONUS_PER_TIER;
use crate::skills::Skill;

const ENCHANT_SUFFIX: &str = "_e";

/// Identity of an item stack: catalog base id plus enchant tier.
///
/// Tier 0 is the plain item. On disk the id is the base string with an
/// `_eN` suffix for tiers above zero, so older string saves load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId {
    pub base: String,
    pub tier: u8,
}

impl ItemId {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            tier: 0,
        }
    }

    pub fn with_tier(base: impl Into<String>, tier: u8) -> Self {
        Self {
            base: base.into(),
            tier,
        }
    }

    /// Same item one enchant tier higher.
    pub fn next_tier(&self) -> Self {
        Self::with_tier(self.base.clone(), self.tier.saturating_add(1))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tier == 0 {
            f.write_str(&self.base)
        } else {
            write!(f, "{}{}{}", self.base, ENCHANT_SUFFIX, self.tier)
        }
    }
}

impl FromStr for ItemId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(idx) = s.rfind(ENCHANT_SUFFIX) {
            let (base, suffix) = s.split_at(idx);
            let digits = &suffix[ENCHANT_SUFFIX.len()..];
            if !base.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            {
                if let Ok(tier) = digits.parse::<u8>() {
                    if tier > 0 {
                        return Ok(Self::with_tier(base, tier));
                    }
                }
            }
        }
        Ok(Self::new(s))
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ItemId::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Shield,
    Helmet,
    Body,
    Legs,
    Gloves,
    Boots,
    Amulet,
    Ring,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 9] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Shield,
            EquipmentSlot::Helmet,
            EquipmentSlot::Body,
            EquipmentSlot::Legs,
            EquipmentSlot::Gloves,
            EquipmentSlot::Boots,
            EquipmentSlot::Amulet,
            EquipmentSlot::Ring,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Shield => "Shield",
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Body => "Body",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Amulet => "Amulet",
            EquipmentSlot::Ring => "Ring",
        }
    }

    /// Case-insensitive lookup by [`EquipmentSlot::name`].
    pub fn from_name(name: &str) -> Option<EquipmentSlot> {
        Self::all()
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(name))
    }
}

/// Combat bonuses granted by an equipped item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStats {
    pub accuracy: f64,
    /// Flat bonus added to max hit.
    pub strength: f64,
    pub armor: f64,
    /// Additive crit chance (0.0-1.0).
    pub crit_chance: f64,
}

impl ItemStats {
    /// Stats after applying an enchant tier.
    pub fn scaled(&self, tier: u8) -> Self {
        let mult = 1.0 + ENCHANT_STAT_BONUS_PER_TIER * tier as f64;
        Self {
            accuracy: self.accuracy * mult,
            strength: self.strength * mult,
            armor: self.armor * mult,
            crit_chance: self.crit_chance * mult,
        }
    }

    pub fn add(&mut self, other: &ItemStats) {
        self.accuracy += other.accuracy;
        self.strength += other.strength;
        self.armor += other.armor;
        self.crit_chance += other.crit_chance;
    }
}

/// One input of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: ItemId,
    pub count: u64,
}

impl Ingredient {
    pub fn new(item: &str, count: u64) -> Self {
        Self {
            item: ItemId::new(item),
            count,
        }
    }
}

/// Catalog entry for anything that can sit in the inventory.
///
/// Entries with a `skill` are gatherable or craftable; entries with `inputs`
/// are recipes whose ingredients are consumed all at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skill: Option<Skill>,
    #[serde(default)]
    pub required_level: u32,
    #[serde(default)]
    pub xp_reward: u64,
    #[serde(default)]
    pub base_tick_ms: u64,
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub inputs: Vec<Ingredient>,
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,
    #[serde(default)]
    pub stats: ItemStats,
    #[serde(default)]
    pub heals: Option<u32>,
    /// Enchanting scroll strength, if this is a scroll.
    #[serde(default)]
    pub scroll_tier: Option<u32>,
    /// World loot rolled when the item is opened.
    #[serde(default)]
    pub contents: Vec<WeightedDrop>,
}

impl Resource {
    /// Bare catalog entry; the builder methods below fill in the rest.
    pub fn new(id: &str, name: &str, value: u64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            skill: None,
            required_level: 1,
            xp_reward: 0,
            base_tick_ms: 0,
            value,
            inputs: Vec::new(),
            slot: None,
            stats: ItemStats::default(),
            heals: None,
            scroll_tier: None,
            contents: Vec::new(),
        }
    }

    pub fn trained_by(mut self, skill: Skill, level: u32, xp: u64, tick_ms: u64) -> Self {
        self.skill = Some(skill);
        self.required_level = level;
        self.xp_reward = xp;
        self.base_tick_ms = tick_ms;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<Ingredient>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn equippable(mut self, slot: EquipmentSlot, stats: ItemStats) -> Self {
        self.slot = Some(slot);
        self.stats = stats;
        self
    }

    pub fn healing(mut self, amount: u32) -> Self {
        self.heals = Some(amount);
        self
    }

    pub fn scroll(mut self, tier: u32) -> Self {
        self.scroll_tier = Some(tier);
        self
    }

    pub fn containing(mut self, contents: Vec<WeightedDrop>) -> Self {
        self.contents = contents;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_name_ignores_case() {
        assert_eq!(EquipmentSlot::from_name("weapon"), Some(EquipmentSlot::Weapon));
        assert_eq!(EquipmentSlot::from_name("RING"), Some(EquipmentSlot::Ring));
        assert_eq!(EquipmentSlot::from_name("cape"), None);
    }

    #[test]
    fn test_item_id_display_plain_and_enchanted() {
        assert_eq!(ItemId::new("iron_sword").to_string(), "iron_sword");
        assert_eq!(ItemId::with_tier("iron_sword", 3).to_string(), "iron_sword_e3");
    }

    #[test]
    fn test_item_id_parse_suffix() {
        let id = ItemId::from("iron_sword_e7");
        assert_eq!(id.base, "iron_sword");
        assert_eq!(id.tier, 7);
    }

    #[test]
    fn test_item_id_parse_without_suffix() {
        let id = ItemId::from("frozen_key");
        assert_eq!(id.base, "frozen_key");
        assert_eq!(id.tier, 0);
    }

    #[test]
    fn test_item_id_parse_ignores_non_numeric_suffix() {
        // "_eel" is part of the name, not a tier
        let id = ItemId::from("raw_eel");
        assert_eq!(id, ItemId::new("raw_eel"));
        let id = ItemId::from("thing_e0");
        assert_eq!(id, ItemId::new("thing_e0"));
    }

    #[test]
    fn test_item_id_serde_uses_string_form() {
        let id = ItemId::with_tier("bronze_helm", 2);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bronze_helm_e2\"");
        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_next_tier() {
        let id = ItemId::new("bronze_helm").next_tier().next_tier();
        assert_eq!(id.tier, 2);
        assert_eq!(id.base, "bronze_helm");
    }

    #[test]
    fn test_stats_scaled_by_tier() {
        let stats = ItemStats {
            accuracy: 10.0,
            strength: 5.0,
            armor: 0.0,
            crit_chance: 0.0,
        };
        let scaled = stats.scaled(5);
        assert!((scaled.accuracy - 15.0).abs() < 1e-9);
        assert!((scaled.strength - 7.5).abs() < 1e-9);
        assert_eq!(stats.scaled(0), stats);
    }
}
