use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StartupError};
use crate::platform::Launcher;
use crate::store::RegistryStore;

/// Unregisters an entry and removes its OS artifact.
///
/// An unknown id fails with `NotFound` before anything is touched. A missing
/// artifact is only a warning: the user (or the OS) may have deleted it already,
/// and the registry entry must still go. If the registry write fails after the
/// artifact was removed, the artifact is reinstalled.
pub fn run<S: RegistryStore, L: Launcher>(
    store: &mut S,
    launcher: &L,
    id: &str,
) -> Result<CmdResult> {
    let id = id.trim();
    let registered = store.get(id)?;

    let mut result = CmdResult::default();
    let uninstalled = match launcher.uninstall(id) {
        Ok(()) => true,
        Err(e) if e.is_not_found() => {
            tracing::warn!(id, "no OS artifact to remove, cleaning up registry only");
            result.add_message(CmdMessage::warning(format!(
                "No {} artifact found for {}; it was already removed.",
                launcher.name(),
                id
            )));
            false
        }
        Err(e) => return Err(e),
    };

    let entry = match store.remove(id) {
        Ok(entry) => entry,
        Err(remove_err) => {
            if uninstalled {
                tracing::warn!(id, "registry write failed, reinstalling artifact: {}", remove_err);
                if let Err(reinstall_err) = launcher.install(&registered) {
                    tracing::error!(id, "artifact reinstall failed: {}", reinstall_err);
                    return Err(StartupError::Adapter(format!(
                        "{}; the registry still lists `{}` but its artifact is gone \
                         (reinstall failed: {}), run `user-startup doctor`",
                        remove_err, id, reinstall_err
                    )));
                }
            }
            return Err(remove_err);
        }
    };

    result.add_message(CmdMessage::success(format!(
        "Removed {}: {}",
        entry.id, entry.command
    )));
    Ok(result.with_affected_entries(vec![entry]))
}
