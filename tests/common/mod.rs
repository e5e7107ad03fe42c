use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEDI_HASH: &str = "cbcc471e62b827c234217d824a1e045743824c8b11ffdb371d203c3bad966d12";
pub const VIDUL_HASH: &str = "c6598b3dfe966d4e7ae60caa34b96eea18fd83cafb245ab0afb454e8d970b8d5";

/// Scratch directory holding a user store file
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Environment whose store already contains tedi (pass-1) and vidul (pass-2)
    pub fn seeded() -> Result<Self> {
        let env = Self::new()?;
        let data = serde_json::json!({
            "tedi": { "password": TEDI_HASH, "username": "tedi", "fullname": "Teodora" },
            "vidul": { "password": VIDUL_HASH, "username": "vidul", "fullname": "VNP" },
        });
        std::fs::write(env.store_path(), data.to_string())?;
        Ok(env)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.path().join("data.json")
    }

    /// Parse the store file as it is on disk right now
    pub fn read_store(&self) -> Result<serde_json::Value> {
        let contents = std::fs::read_to_string(self.store_path())?;
        Ok(serde_json::from_str(&contents)?)
    }
}
