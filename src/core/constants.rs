// Leveling
pub const XP_PER_LEVEL_COEFFICIENT: u64 = 150;
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_HITPOINTS_LEVEL: u32 = 10;

// Combat resolution
pub const ARMOR_CONSTANT: f64 = 300.0;
pub const ACCURACY_DEFENSE_FACTOR: f64 = 0.5;
pub const BASE_CRIT_MULTIPLIER: f64 = 1.5;
pub const MAX_HIT_BASE: f64 = 1.0;
pub const MAX_HIT_PER_STRENGTH: f64 = 0.8;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.1;
pub const PLAYER_BASE_CRIT_CHANCE: f64 = 0.05;
pub const ENEMY_CRIT_CHANCE: f64 = 0.05;

// Enemy scaling: scaled = base * ENEMY_GROWTH^(map_id * ENEMY_GROWTH_EXPONENT_PER_MAP)
pub const ENEMY_GROWTH: f64 = 1.1;
pub const ENEMY_GROWTH_EXPONENT_PER_MAP: f64 = 0.5;
pub const ENEMY_DEFENSE_PER_MAP: u32 = 2;

// Combat timing (milliseconds)
pub const RESPAWN_DELAY_MS: i64 = 2000;
pub const ATTACK_CADENCE_MS: i64 = 1000;
pub const CONSUMABLE_COOLDOWN_MS: i64 = 3000;
pub const AUTO_EAT_HP_FRACTION: f64 = 0.5;
pub const HP_PER_HITPOINTS_LEVEL: u32 = 10;
pub const COMBAT_XP_SKILL_SHARES: u64 = 4;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 20;

// Offline replay
pub const MAX_OFFLINE_SECONDS: u64 = 43_200;
pub const OFFLINE_STEP_MS: i64 = 1000;

// Production timing
pub const MIN_TICK_MS: u64 = 200;
pub const SPEED_BONUS_PER_UPGRADE: f64 = 0.2;
pub const MAX_SPEED_MULTIPLIER: f64 = 5.0;

// Enchanting
pub const MAX_ENCHANT_TIER: u8 = 10;
pub const ENCHANT_MIN_BASE_COST: f64 = 100.0;
pub const ENCHANT_VALUE_COST_FACTOR: f64 = 10.0;
pub const ENCHANT_LINEAR_COST_FACTOR: f64 = 0.75;
pub const ENCHANT_CURVE_COST_FACTOR: f64 = 0.2;
pub const ENCHANT_BASE_CHANCE_PERCENT: f64 = 30.0;
pub const ENCHANT_CHANCE_PER_SCROLL_TIER: f64 = 10.0;
pub const ENCHANT_PENALTY_PER_LEVEL: f64 = 10.0;
pub const ENCHANT_MIN_CHANCE_PERCENT: f64 = 5.0;
pub const ENCHANT_MAX_CHANCE_PERCENT: f64 = 100.0;
pub const ENCHANT_STAT_BONUS_PER_TIER: f64 = 0.1;

// Special item ids
pub const COINS_ITEM_ID: &str = "coins";

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x534B_494C_4C51_0002;
