//! Diagnostic logging
//!
//! An explicitly constructed log component owned by the app and handed to
//! collaborators; there is no global logger state. Lines are timestamped and
//! appended to a per-user log file. Logging is best effort: every write
//! failure is swallowed, a broken log must never take the app down with it.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub struct DiagnosticsLog {
    path: Option<PathBuf>,
}

impl DiagnosticsLog {
    /// Log to the given file; `None` disables file output entirely.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// A log that discards everything. Used in tests.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Default log location: `~/.netlabeler/netlabeler.log`.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".netlabeler").join("netlabeler.log"))
    }

    /// Append one timestamped line.
    pub fn log(&self, message: &str) {
        let Some(path) = &self.path else {
            return;
        };
        let line = format!("{}: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"), message);
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = file.write_all(line.as_bytes());
        }
    }

    /// Log an error with its full chain.
    pub fn error(&self, message: &str, err: &anyhow::Error) {
        self.log(&format!("ERROR - {}: {:#}", message, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_appends_timestamped_lines() {
        let path = std::env::temp_dir().join(format!(
            "netlabeler-log-test-{}.log",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let log = DiagnosticsLog::new(Some(path.clone()));
        log.log("first");
        log.log("second");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": first"));
        assert!(lines[1].ends_with(": second"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_disabled_log_writes_nothing() {
        // Must not panic or create files.
        let log = DiagnosticsLog::disabled();
        log.log("dropped");
        log.error("dropped", &anyhow::anyhow!("boom"));
    }
}
