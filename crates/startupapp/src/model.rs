//! # Domain Model: Entries and Their Ids
//!
//! An [`Entry`] is one command registered to run at login. The registry owns every
//! entry; the platform adapter only ever sees an entry long enough to render its
//! OS artifact.
//!
//! ## Id Derivation
//!
//! Ids must be short enough to type (`user-startup remove syncthing-1a2b3c4d`) and
//! stable: the same command derives the same id in every process, so nothing about
//! an entry has to be remembered outside the registry file.
//!
//! ```text
//! "/usr/bin/syncthing serve --no-browser"
//!   program token  -> "syncthing"
//!   command digest -> uuid v5 of the whitespace-normalized command -> "1a2b3c4d"
//!   id             -> "syncthing-1a2b3c4d"
//! ```
//!
//! With an explicit name (`add --name sync ...`) the id is just the slug of the
//! name. In both cases a collision is rejected by the store, never disambiguated
//! silently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Longest slug kept from a program token or explicit name.
pub const MAX_SLUG_LEN: usize = 24;

/// Hex characters of the command digest appended to derived ids.
pub const DIGEST_LEN: usize = 8;

const STRIPPED_EXTENSIONS: &[&str] = &[
    "exe", "bat", "cmd", "ps1", "sh", "bash", "py", "app", "command",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub command: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<PathBuf>,
}

impl Entry {
    /// Builds an entry whose id is derived from the command text.
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            id: derive_id(&command),
            command,
            created_at: Utc::now(),
            stdout: None,
            stderr: None,
        }
    }

    /// Builds an entry whose id is the slug of an explicit name.
    pub fn named(name: &str, command: impl Into<String>) -> Self {
        Self {
            id: slugify(name),
            command: command.into(),
            created_at: Utc::now(),
            stdout: None,
            stderr: None,
        }
    }

    pub fn with_stdout(mut self, path: Option<PathBuf>) -> Self {
        self.stdout = path;
        self
    }

    pub fn with_stderr(mut self, path: Option<PathBuf>) -> Self {
        self.stderr = path;
        self
    }

    pub fn redirects_output(&self) -> bool {
        self.stdout.is_some() || self.stderr.is_some()
    }
}

/// Derives the stable id for a command: `<program-slug>-<digest>`.
pub fn derive_id(command: &str) -> String {
    let normalized = normalize_command(command);
    let slug = slugify(program_token(&normalized));
    format!("{}-{}", slug, command_digest(&normalized))
}

/// Collapses runs of whitespace so cosmetic spacing does not change the id.
pub fn normalize_command(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn command_digest(normalized: &str) -> String {
    let digest = Uuid::new_v5(&Uuid::NAMESPACE_URL, normalized.as_bytes());
    digest.simple().to_string()[..DIGEST_LEN].to_string()
}

/// The program part of a command: first token, quotes and directories stripped.
fn program_token(command: &str) -> &str {
    let first = if let Some(rest) = command.strip_prefix('"') {
        rest.split('"').next().unwrap_or("")
    } else {
        command.split_whitespace().next().unwrap_or("")
    };

    let base = first.rsplit(['/', '\\']).next().unwrap_or(first);

    match base.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && STRIPPED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) =>
        {
            stem
        }
        _ => base,
    }
}

/// Lowercases and maps everything outside `[a-z0-9]` to single dashes.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut last_dash = true;

    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "cmd".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_id("syncthing serve --no-browser");
        let b = derive_id("syncthing serve --no-browser");
        assert_eq!(a, b);
        assert!(a.starts_with("syncthing-"));
        assert_eq!(a.len(), "syncthing-".len() + DIGEST_LEN);
    }

    #[test]
    fn whitespace_does_not_change_id() {
        assert_eq!(derive_id("echo  hi"), derive_id(" echo hi\t"));
    }

    #[test]
    fn different_arguments_derive_different_ids() {
        assert_ne!(derive_id("echo hi"), derive_id("echo bye"));
    }

    #[test]
    fn program_token_strips_directories_and_extensions() {
        assert_eq!(program_token("/usr/local/bin/redshift -l 0:0"), "redshift");
        assert_eq!(program_token(r"C:\Tools\clash.exe -d ."), "clash");
        assert_eq!(
            program_token(r#""C:\Program Files\App\app.exe" --tray"#),
            "app"
        );
        assert_eq!(program_token("./backup.sh"), "backup");
        assert_eq!(program_token("python3.11 -m http.server"), "python3.11");
    }

    #[test]
    fn slugify_normalizes() {
        assert_eq!(slugify("My Sync Job"), "my-sync-job");
        assert_eq!(slugify("--weird__name--"), "weird-name");
        assert_eq!(slugify("python3.11"), "python3-11");
        assert_eq!(slugify("!!!"), "cmd");
        assert!(slugify(&"x".repeat(100)).len() <= MAX_SLUG_LEN);
    }

    #[test]
    fn named_entry_uses_slug() {
        let entry = Entry::named("Night Backup", "rsync -a ~ /mnt/backup");
        assert_eq!(entry.id, "night-backup");
        assert!(!entry.redirects_output());
    }

    #[test]
    fn entry_serialization_skips_missing_redirects() {
        let entry = Entry::new("echo hi");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("stdout"));

        let entry = entry.with_stdout(Some(PathBuf::from("/tmp/out.log")));
        let json = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
