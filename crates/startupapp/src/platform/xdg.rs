use super::{strip_affixes, ARTIFACT_PREFIX};
use crate::model::Entry;
use std::path::PathBuf;

const SUFFIX: &str = ".desktop";

/// freedesktop.org autostart: a `.desktop` login item started by the session.
///
/// Desktop entries cannot redirect output; the `add` command warns about that.
#[derive(Debug, Clone)]
pub struct XdgAutostart {
    pub(crate) dir: PathBuf,
}

impl XdgAutostart {
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
        format!(
            "# {prefix}: {command}\n\
             [Desktop Entry]\n\
             Type=Application\n\
             Version=1.0\n\
             Name={name}\n\
             Comment={name} startup script\n\
             Exec={exec}\n\
             StartupNotify=false\n\
             Terminal=false\n\
             X-GNOME-Autostart-enabled=true\n",
            prefix = ARTIFACT_PREFIX,
            command = single_line(&entry.command),
            name = entry.id,
            exec = escape_exec(&entry.command),
        )
    }
}

fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// Wraps the command in `/bin/sh -c "..."` so shell syntax works, as it does for
/// the other adapters. Inside the quoted argument `"`, `` ` ``, `$` and `\` take a
/// backslash; the string-value escaping then doubles every backslash again.
/// `%` introduces field codes in `Exec`, so a literal one is doubled.
fn escape_exec(command: &str) -> String {
    let mut quoted = String::with_capacity(command.len());
    for c in single_line(command).chars() {
        match c {
            '"' | '`' | '$' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '%' => quoted.push_str("%%"),
            other => quoted.push(other),
        }
    }
    format!("/bin/sh -c \"{}\"", quoted.replace('\\', "\\\\"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_desktop_entry() {
        let xdg = XdgAutostart::new(PathBuf::from("/tmp"));
        let entry = Entry::named("redshift", "redshift -l 0:0 -t 100%");
        let text = xdg.render(&entry);

        assert!(text.starts_with("# user-startup: redshift -l 0:0 -t 100%\n"));
        assert!(text.contains("[Desktop Entry]\n"));
        assert!(text.contains("Name=redshift\n"));
        assert!(text.contains("Exec=/bin/sh -c \"redshift -l 0:0 -t 100%%\"\n"));
        assert!(text.contains("Terminal=false\n"));
    }

    #[test]
    fn file_name_round_trips_id() {
        let name = XdgAutostart::file_name("echo-1a2b3c4d");
        assert_eq!(name, "user-startup-echo-1a2b3c4d.desktop");
        assert_eq!(
            XdgAutostart::id_from_file_name(&name),
            Some("echo-1a2b3c4d".to_string())
        );
    }

    #[test]
    fn multi_line_commands_are_flattened() {
        let xdg = XdgAutostart::new(PathBuf::from("/tmp"));
        let text = xdg.render(&Entry::named("x", "echo a\necho b"));
        assert!(text.contains("Exec=/bin/sh -c \"echo a echo b\"\n"));
    }

    #[test]
    fn shell_syntax_runs_through_sh() {
        let xdg = XdgAutostart::new(PathBuf::from("/tmp"));
        let text = xdg.render(&Entry::named("x", "cd ~/x && ./run > log"));
        assert!(text.contains("Exec=/bin/sh -c \"cd ~/x && ./run > log\"\n"));
    }

    #[test]
    fn quoted_argument_is_escaped() {
        let xdg = XdgAutostart::new(PathBuf::from("/tmp"));
        let text = xdg.render(&Entry::named("x", r#"echo "$HOME" `date` C:\tmp"#));
        assert!(text.contains(r#"Exec=/bin/sh -c "echo \\"\\$HOME\\" \\`date\\` C:\\\\tmp""#));
    }
}
