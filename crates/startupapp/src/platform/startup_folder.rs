use super::{strip_affixes, ARTIFACT_PREFIX};
use crate::model::Entry;
use std::path::{Path, PathBuf};

const SUFFIX: &str = ".cmd";

/// A batch script in the per-user Windows Startup folder.
///
/// Explorer runs `.cmd` files from the folder directly at login. The command is
/// started minimized through `cmd /c` so the script's own console closes at once.
#[derive(Debug, Clone)]
pub struct StartupFolder {
    pub(crate) dir: PathBuf,
}

impl StartupFolder {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn file_name(id: &str) -> String {
        format!("{}-{}{}", ARTIFACT_PREFIX, id, SUFFIX)
    }

    pub fn id_from_file_name(name: &str) -> Option<String> {
        strip_affixes(name, &format!("{}-", ARTIFACT_PREFIX), SUFFIX)
    }

    pub fn render(&self, entry: &Entry) -> String {
        let command = escape_batch(&entry.command);
        let mut body = command.clone();
        if let Some(path) = &entry.stdout {
            body.push_str(&format!(" 1>>{}", quote_path(path)));
        }
        if let Some(path) = &entry.stderr {
            body.push_str(&format!(" 2>>{}", quote_path(path)));
        }

        format!(
            "@rem {prefix}: {command}\r\n\
             @echo off\r\n\
             start \"{prefix}\" /min cmd /c \"{body}\"\r\n",
            prefix = ARTIFACT_PREFIX,
            command = command,
            body = body,
        )
    }
}

/// `%` expands variables inside batch files; doubling keeps it literal.
fn escape_batch(command: &str) -> String {
    command.replace(['\r', '\n'], " ").replace('%', "%%")
}

fn quote_path(path: &Path) -> String {
    format!("\"{}\"", escape_batch(&path.to_string_lossy()))
}
