//! `.kemptrc.json` discovery and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kempt_common::read_jsonc_file;
use kempt_plugin::FormatSettings;
use tracing::debug;

pub const RC_FILE_NAME: &str = ".kemptrc.json";

/// Nearest rc file in `start` or one of its ancestors.
pub fn find_rc(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(RC_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Settings from `explicit`, else from the nearest rc file above `cwd`,
/// else defaults.
pub fn load_settings(explicit: Option<&Path>, cwd: &Path) -> Result<FormatSettings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_rc(cwd) {
            Some(path) => path,
            None => {
                debug!(cwd = %cwd.display(), "no rc file found, using defaults");
                return Ok(FormatSettings::default());
            }
        },
    };

    debug!(path = %path.display(), "loading rc file");
    read_jsonc_file(&path).with_context(|| format!("failed to load settings from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use kempt_plugin::FormatSettings;

    use super::*;

    #[test]
    fn test_rc_found_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("packages/app/src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(RC_FILE_NAME),
            "{\n  // keep node: prefixes\n  \"nodeProtocol\": true,\n  \"conditionalBraceMode\": \"remove\",\n}\n",
        )
        .unwrap();

        assert_eq!(find_rc(&nested), Some(dir.path().join(RC_FILE_NAME)));
        let settings = load_settings(None, &nested).unwrap();
        assert_eq!(settings.imports.node_protocol, Some(true));
        assert_eq!(settings.braces.conditional_brace_mode.as_str(), "remove");
    }

    #[test]
    fn test_missing_rc_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_settings(None, dir.path()).unwrap(), FormatSettings::default());
    }

    #[test]
    fn test_explicit_rc_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"sortSideEffect\": ").unwrap();
        let err = load_settings(Some(&path), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
