//! Save files for the host.
//!
//! The simulation never touches disk; the binary loads a [`SaveFile`], runs
//! the catch-up, and writes it back through [`SaveManager`].

use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::error::GameError;
use crate::core::game_state::StateSnapshot;
use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// What goes to disk: the snapshot plus when it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Unix seconds.
    pub last_save_time: i64,
    pub snapshot: StateSnapshot,
}

impl SaveFile {
    pub fn new(snapshot: StateSnapshot) -> Self {
        Self {
            last_save_time: Utc::now().timestamp(),
            snapshot,
        }
    }

    pub fn touch(&mut self) {
        self.last_save_time = Utc::now().timestamp();
    }

    /// Moves the save clock forward by time that has been simulated.
    pub fn advance_clock(&mut self, seconds: u64) {
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        self.last_save_time = self.last_save_time.saturating_add(seconds);
    }
}

/// Manages saving and loading with a checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses the platform config directory from the `directories` crate.
    pub fn new() -> Result<Self, GameError> {
        let project_dirs =
            ProjectDirs::from("", "", "skillquest").ok_or(GameError::NoSaveDirectory)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Uses an explicit file path.
    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode payload
    /// - SHA256 over everything before it (32 bytes)
    pub fn save(&self, save: &SaveFile) -> Result<(), GameError> {
        let data = bincode::serialize(save)?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        tracing::debug!(path = %self.save_path.display(), bytes = data.len(), "saved");
        Ok(())
    }

    pub fn load(&self) -> Result<SaveFile, GameError> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(GameError::SaveVersion {
                expected: SAVE_VERSION_MAGIC,
                found: version,
            });
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(GameError::Checksum);
        }

        Ok(bincode::deserialize(&data)?)
    }

    /// Writes a pretty-printed JSON copy, e.g. for hand editing.
    pub fn export_json(save: &SaveFile, path: &Path) -> Result<(), GameError> {
        let json = serde_json::to_string_pretty(save)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reads a JSON copy. Fields missing from older exports take defaults.
    pub fn import_json(path: &Path) -> Result<SaveFile, GameError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
