use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::STARTING_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Hitpoints,
    Attack,
    Strength,
    Defense,
    Ranged,
    Magic,
    Woodcutting,
    Mining,
    Fishing,
    Smithing,
    Cooking,
    Crafting,
}

impl Skill {
    pub fn all() -> [Skill; 12] {
        [
            Skill::Hitpoints,
            Skill::Attack,
            Skill::Strength,
            Skill::Defense,
            Skill::Ranged,
            Skill::Magic,
            Skill::Woodcutting,
            Skill::Mining,
            Skill::Fishing,
            Skill::Smithing,
            Skill::Cooking,
            Skill::Crafting,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Hitpoints => "Hitpoints",
            Skill::Attack => "Attack",
            Skill::Strength => "Strength",
            Skill::Defense => "Defense",
            Skill::Ranged => "Ranged",
            Skill::Magic => "Magic",
            Skill::Woodcutting => "Woodcutting",
            Skill::Mining => "Mining",
            Skill::Fishing => "Fishing",
            Skill::Smithing => "Smithing",
            Skill::Cooking => "Cooking",
            Skill::Crafting => "Crafting",
        }
    }

    /// Combat skills are trained by fighting, never by a production action.
    pub fn is_combat(&self) -> bool {
        matches!(
            self,
            Skill::Hitpoints
                | Skill::Attack
                | Skill::Strength
                | Skill::Defense
                | Skill::Ranged
                | Skill::Magic
        )
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Level and in-level XP of a single skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub level: u32,
    pub xp: u64,
}

impl Default for SkillProgress {
    fn default() -> Self {
        Self {
            level: STARTING_LEVEL,
            xp: 0,
        }
    }
}

/// Which skill supplies strength in combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatStyle {
    #[default]
    Melee,
    Ranged,
    Magic,
}

impl CombatStyle {
    pub fn all() -> [CombatStyle; 3] {
        [CombatStyle::Melee, CombatStyle::Ranged, CombatStyle::Magic]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CombatStyle::Melee => "melee",
            CombatStyle::Ranged => "ranged",
            CombatStyle::Magic => "magic",
        }
    }

    pub fn from_name(name: &str) -> Option<CombatStyle> {
        Self::all()
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(name))
    }

    pub fn skill(&self) -> Skill {
        match self {
            CombatStyle::Melee => Skill::Strength,
            CombatStyle::Ranged => Skill::Ranged,
            CombatStyle::Magic => Skill::Magic,
        }
    }
}
