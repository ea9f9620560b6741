use super::backend::RegistryBackend;
use crate::error::{Result, StartupError};
use crate::model::Entry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const REGISTRY_FILE: &str = "registry.json";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct RegistryFile {
    version: u32,
    entries: Vec<Entry>,
}

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(StartupError::Io)?;
        }
        Ok(())
    }

    fn corrupt(&self, reason: impl Into<String>) -> StartupError {
        StartupError::StoreCorrupt {
            path: self.registry_path(),
            reason: reason.into(),
        }
    }
}

impl RegistryBackend for FsBackend {
    fn load_entries(&self) -> Result<Vec<Entry>> {
        let data_file = self.registry_path();
        if !data_file.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&data_file).map_err(StartupError::Io)?;
        if content.trim().is_empty() {
            return Err(self.corrupt("file is empty"));
        }

        let file: RegistryFile =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        if file.version > FORMAT_VERSION {
            return Err(self.corrupt(format!(
                "written by a newer version (format {}, this build reads {})",
                file.version, FORMAT_VERSION
            )));
        }

        Ok(file.entries)
    }

    fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let file = RegistryFile {
            version: FORMAT_VERSION,
            entries: entries.to_vec(),
        };
        let content =
            serde_json::to_string_pretty(&file).map_err(|e| self.corrupt(e.to_string()))?;

        // Atomic write
        let tmp_file = self.root.join(format!(".registry-{}.tmp", Uuid::new_v4()));
        let write = || -> std::io::Result<()> {
            let mut handle = fs::File::create(&tmp_file)?;
            handle.write_all(content.as_bytes())?;
            handle.sync_all()?;
            fs::rename(&tmp_file, self.registry_path())
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp_file);
            return Err(StartupError::Io(e));
        }

        tracing::debug!(
            path = %self.registry_path().display(),
            count = entries.len(),
            "registry saved"
        );
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.root.clone()
    }
}
