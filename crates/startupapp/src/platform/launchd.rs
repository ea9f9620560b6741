use super::{strip_affixes, ARTIFACT_PREFIX};
use crate::model::Entry;
use std::path::{Path, PathBuf};

const SUFFIX: &str = ".plist";

/// A launchd agent in `~/Library/LaunchAgents`, loaded at the next login.
///
/// The command runs through `/bin/sh -c` so arguments are split the way a shell
/// would split them; launchd itself does no splitting.
#[derive(Debug, Clone)]
pub struct LaunchAgent {
    pub(crate) dir: PathBuf,
}

impl LaunchAgent {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn label(id: &str) -> String {
        format!("{}.{}", ARTIFACT_PREFIX, id)
    }

    pub fn file_name(id: &str) -> String {
        format!("{}{}", Self::label(id), SUFFIX)
    }

    pub fn id_from_file_name(name: &str) -> Option<String> {
        strip_affixes(name, &format!("{}.", ARTIFACT_PREFIX), SUFFIX)
    }

    pub fn render(&self, entry: &Entry) -> String {
        let mut plist = String::new();
        plist.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        // `--` is not allowed inside XML comments, so only the id goes here.
        plist.push_str(&format!("<!-- {}: {} -->\n", ARTIFACT_PREFIX, entry.id));
        plist.push_str(
            "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \
             \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
        );
        plist.push_str("<plist version=\"1.0\">\n<dict>\n");
        plist.push_str(&key_string("Label", &Self::label(&entry.id)));
        plist.push_str("    <key>ProgramArguments</key>\n    <array>\n");
        for arg in ["/bin/sh", "-c", entry.command.as_str()] {
            plist.push_str(&format!("        <string>{}</string>\n", xml_escape(arg)));
        }
        plist.push_str("    </array>\n");
        plist.push_str("    <key>RunAtLoad</key>\n    <true/>\n");
        if let Some(path) = &entry.stdout {
            plist.push_str(&key_path("StandardOutPath", path));
        }
        if let Some(path) = &entry.stderr {
            plist.push_str(&key_path("StandardErrorPath", path));
        }
        plist.push_str("</dict>\n</plist>\n");
        plist
    }
}

fn key_string(key: &str, value: &str) -> String {
    format!(
        "    <key>{}</key>\n    <string>{}</string>\n",
        key,
        xml_escape(value)
    )
}

fn key_path(key: &str, path: &Path) -> String {
    key_string(key, &path.to_string_lossy())
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_plist() {
        let agent = LaunchAgent::new(PathBuf::from("/tmp"));
        let entry = Entry::named("caffeinate", "caffeinate -d && echo \"<done>\"")
            .with_stdout(Some(PathBuf::from("/tmp/out.log")));
        let text = agent.render(&entry);

        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(text.contains("<!-- user-startup: caffeinate -->"));
        assert!(text.contains("<string>user-startup.caffeinate</string>"));
        assert!(text.contains("<string>/bin/sh</string>"));
        assert!(text.contains(
            "<string>caffeinate -d &amp;&amp; echo &quot;&lt;done&gt;&quot;</string>"
        ));
        assert!(text.contains("<key>RunAtLoad</key>\n    <true/>"));
        assert!(text.contains("<key>StandardOutPath</key>\n    <string>/tmp/out.log</string>"));
        assert!(!text.contains("StandardErrorPath"));
    }

    #[test]
    fn file_name_round_trips_id() {
        let name = LaunchAgent::file_name("caffeinate-00ff00ff");
        assert_eq!(name, "user-startup.caffeinate-00ff00ff.plist");
        assert_eq!(
            LaunchAgent::id_from_file_name(&name),
            Some("caffeinate-00ff00ff".to_string())
        );
        assert_eq!(LaunchAgent::id_from_file_name("com.apple.foo.plist"), None);
    }
}
