use super::{strip_affixes, ARTIFACT_PREFIX};
use crate::error::{Result, StartupError};
use crate::model::Entry;
use std::path::{Path, PathBuf};
use std::process::Command;

const SUFFIX: &str = ".service";

/// A systemd user unit, enabled into `default.target`.
///
/// `systemctl` is resolved once at detection; without it nothing can be enabled and
/// installs fail with an adapter error.
#[derive(Debug, Clone)]
pub struct SystemdUser {
    pub(crate) dir: PathBuf,
    systemctl: Option<PathBuf>,
}

impl SystemdUser {
    pub fn new(dir: PathBuf, systemctl: Option<PathBuf>) -> Self {
        Self { dir, systemctl }
    }

    pub fn file_name(id: &str) -> String {
        format!("{}-{}{}", ARTIFACT_PREFIX, id, SUFFIX)
    }

    pub fn id_from_file_name(name: &str) -> Option<String> {
        strip_affixes(name, &format!("{}-", ARTIFACT_PREFIX), SUFFIX)
    }

    pub fn render(&self, entry: &Entry) -> String {
        let mut unit = format!(
            "# {prefix}: {command}\n\
             [Unit]\n\
             Description={prefix} entry {id}\n\
             \n\
             [Service]\n\
             Type=simple\n\
             ExecStart=/bin/sh -c \"{exec}\"\n",
            prefix = ARTIFACT_PREFIX,
            command = entry.command.replace(['\r', '\n'], " "),
            id = entry.id,
            exec = escape_exec(&entry.command),
        );
        if let Some(path) = &entry.stdout {
            unit.push_str(&format!("StandardOutput=append:{}\n", path.display()));
        }
        if let Some(path) = &entry.stderr {
            unit.push_str(&format!("StandardError=append:{}\n", path.display()));
        }
        unit.push_str("\n[Install]\nWantedBy=default.target\n");
        unit
    }

    pub(crate) fn enable(&self, unit_path: &Path) -> Result<()> {
        self.systemctl(&["daemon-reload"])?;
        let unit = unit_path.to_string_lossy();
        self.systemctl(&["enable", unit.as_ref()])
    }

    pub(crate) fn disable(&self, unit_path: &Path) -> Result<()> {
        let name = unit_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.systemctl(&["disable", name.as_str()])
    }

    fn systemctl(&self, args: &[&str]) -> Result<()> {
        let bin = self.systemctl.as_ref().ok_or_else(|| {
            StartupError::Adapter(
                "systemctl not found; is systemd managing this session?".to_string(),
            )
        })?;

        tracing::debug!(?args, "running systemctl --user");
        let output = Command::new(bin)
            .arg("--user")
            .args(args)
            .output()
            .map_err(|e| StartupError::Adapter(format!("failed to run systemctl: {}", e)))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(StartupError::Adapter(format!(
                "systemctl --user {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

/// Escapes a command for a double-quoted `ExecStart` argument.
/// `%` is a specifier and `$` expands systemd variables, so both are doubled and
/// the shell sees them unchanged.
fn escape_exec(command: &str) -> String {
    let mut out = String::with_capacity(command.len());
    for c in command.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '%' => out.push_str("%%"),
            '$' => out.push_str("$$"),
            '\n' | '\r' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}
