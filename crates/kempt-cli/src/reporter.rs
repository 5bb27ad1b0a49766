use colored::Colorize;
use std::path::Path;

use crate::driver::{FileOutcome, FileStatus, Summary};

/// Renders per-file status lines and the closing summary.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One line per file that changed or failed; unchanged files are quiet.
    pub fn render(&self, outcomes: &[FileOutcome]) -> String {
        let mut out = String::new();
        for outcome in outcomes {
            if let Some(line) = self.format_outcome(outcome) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    pub fn format_outcome(&self, outcome: &FileOutcome) -> Option<String> {
        let (label, detail) = match &outcome.status {
            FileStatus::Unchanged => return None,
            FileStatus::Changed { written: true } => (self.paint_label("sorted", Tone::Good), None),
            FileStatus::Changed { written: false } => (self.paint_label("unsorted", Tone::Warn), None),
            FileStatus::Failed(message) => (self.paint_label("error", Tone::Bad), Some(message.as_str())),
        };
        let path = self.format_path(&outcome.path);
        Some(match detail {
            Some(detail) => format!("{label} {path}: {detail}"),
            None => format!("{label} {path}"),
        })
    }

    pub fn format_summary(&self, summary: &Summary, write: bool) -> String {
        let changed_label = if write { "sorted" } else { "need sorting" };
        let mut parts = vec![
            format!("{} {changed_label}", summary.changed),
            format!("{} unchanged", summary.unchanged),
        ];
        if summary.failed > 0 {
            parts.push(format!("{} failed", summary.failed));
        }
        let line = format!("{} files: {}", summary.changed + summary.unchanged + summary.failed, parts.join(", "));

        if !self.color {
            return line;
        }
        if summary.failed > 0 {
            line.red().to_string()
        } else if summary.changed > 0 && !write {
            line.yellow().to_string()
        } else {
            line.green().to_string()
        }
    }

    fn format_path(&self, path: &Path) -> String {
        let display = path.display().to_string();
        if self.color { display.cyan().to_string() } else { display }
    }

    fn paint_label(&self, label: &str, tone: Tone) -> String {
        if !self.color {
            return label.to_string();
        }
        match tone {
            Tone::Good => label.green().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Bad => label.red().bold().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Warn,
    Bad,
}
