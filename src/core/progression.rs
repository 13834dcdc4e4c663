//! Skill leveling curve shared by every XP source.
//!
//! Advancing from level `L` to `L + 1` costs `L * xp_per_level` XP. There is
//! no level cap.

use crate::skills::SkillProgress;

/// XP needed to leave `level`.
pub fn xp_for_next_level(level: u32, xp_per_level: u64) -> u64 {
    level as u64 * xp_per_level.max(1)
}

/// Adds `gained` XP, rolling over as many levels as it pays for.
///
/// Returns the new `(level, xp)`; the returned xp is always below the next
/// threshold.
pub fn apply_xp(level: u32, xp: u64, gained: u64, xp_per_level: u64) -> (u32, u64) {
    let mut level = level.max(1);
    let mut xp = xp.saturating_add(gained);

    loop {
        let needed = xp_for_next_level(level, xp_per_level);
        if xp < needed {
            break;
        }
        xp -= needed;
        level += 1;
    }

    (level, xp)
}

/// [`apply_xp`] over a [`SkillProgress`].
pub fn grant_xp(progress: SkillProgress, gained: u64, xp_per_level: u64) -> SkillProgress {
    let (level, xp) = apply_xp(progress.level, progress.xp, gained, xp_per_level);
    SkillProgress { level, xp }
}

/// Total XP earned to reach `level` with `xp` into it, saturating at
/// `u64::MAX`.
pub fn cumulative_xp(level: u32, xp: u64, xp_per_level: u64) -> u64 {
    let completed = level.max(1) as u128 - 1;
    let triangle = completed * (completed + 1) / 2;
    (xp_per_level.max(1) as u128)
        .checked_mul(triangle)
        .map(|total| total + xp as u128)
        .and_then(|total| u64::try_from(total).ok())
        .unwrap_or(u64::MAX)
}
