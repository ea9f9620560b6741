use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::platform::Launcher;
use crate::store::RegistryStore;
use std::collections::HashSet;

/// Report from the `doctor` operation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    pub reinstalled: usize,
    pub removed_orphans: usize,
}

/// Brings OS artifacts back in line with the registry, which always wins.
///
/// - Entry without artifact: reinstalled.
/// - Artifact without entry: removed.
/// - With `force`, every entry is reinstalled, which also rewrites artifacts
///   rendered by an older version.
pub fn reconcile<S: RegistryStore, L: Launcher>(
    store: &S,
    launcher: &L,
    force: bool,
) -> Result<DoctorReport> {
    let entries = store.list()?;
    let artifacts: HashSet<String> = launcher.list_artifacts()?.into_iter().collect();
    let mut report = DoctorReport::default();

    for entry in &entries {
        if force || !artifacts.contains(&entry.id) {
            launcher.install(entry)?;
            report.reinstalled += 1;
        }
    }

    let registered: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    for orphan in artifacts.iter().filter(|id| !registered.contains(id.as_str())) {
        tracing::info!(id = %orphan, "removing orphaned artifact");
        launcher.uninstall(orphan)?;
        report.removed_orphans += 1;
    }

    Ok(report)
}

pub fn run<S: RegistryStore, L: Launcher>(store: &S, launcher: &L, force: bool) -> Result<CmdResult> {
    let report = reconcile(store, launcher, force)?;
    let mut result = CmdResult::default();

    if report == DoctorReport::default() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    if force {
        result.add_message(CmdMessage::success(format!(
            "Reinstalled {} artifact(s).",
            report.reinstalled
        )));
    } else if report.reinstalled > 0 {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        result.add_message(CmdMessage::info(format!(
            "  - Reinstalled {} artifact(s) missing for registered entries.",
            report.reinstalled
        )));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    }

    if report.removed_orphans > 0 {
        result.add_message(CmdMessage::info(format!(
            "  - Removed {} artifact(s) with no registered entry.",
            report.removed_orphans
        )));
    }

    Ok(result)
}
