//! The default import classifier.
//!
//! Group keys are small JSON objects, `{"type":"relative","dir":"/src/a"}`,
//! so a host can hand them around as plain strings and still recover the
//! module type and resolved directory for ordering.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::node_protocol::{NODE_PROTOCOL, is_listed_builtin};
use crate::record::ImportRecord;
use crate::tsconfig::{AliasResolver, absolutize, find_file_with_any_extension, normalize_path};

/// Module type in default group order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleType {
    React,
    Builtin,
    ThirdParty,
    Absolute,
    Relative,
}

impl ModuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::React => "react",
            ModuleType::Builtin => "builtin",
            ModuleType::ThirdParty => "third-party",
            ModuleType::Absolute => "absolute",
            ModuleType::Relative => "relative",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKey {
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    /// Directory the import resolves into; empty unless the import is
    /// relative or an alias.
    pub dir: String,
}

impl GroupKey {
    pub fn new(module_type: ModuleType, dir: impl Into<String>) -> Self {
        GroupKey {
            module_type,
            dir: dir.into(),
        }
    }

    pub fn to_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.module_type.as_str().to_string())
    }

    pub fn parse(key: &str) -> Option<Self> {
        serde_json::from_str(key).ok()
    }
}

static REACT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(npm:)?react(-dom|-native)?(/|$)").expect("valid regex"));

pub fn is_react(path: &str) -> bool {
    REACT_RE.is_match(path)
}

pub fn is_builtin(path: &str) -> bool {
    path.starts_with(NODE_PROTOCOL) || is_listed_builtin(path)
}

pub fn is_relative(path: &str) -> bool {
    path.starts_with("./") || path.starts_with("../")
}

/// Classifies import paths, resolving aliases through the nearest
/// tsconfig.
///
/// The alias resolver is discovered from the first file that has one and
/// then kept. Resolved directories are cached for the lifetime of the
/// classifier and never invalidated.
#[derive(Debug, Default)]
pub struct DefaultClassifier {
    resolver: OnceCell<AliasResolver>,
    dirs: DashMap<PathBuf, String>,
}

static GLOBAL: Lazy<DefaultClassifier> = Lazy::new(DefaultClassifier::new);

impl DefaultClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance used by the preset.
    pub fn global() -> &'static DefaultClassifier {
        &GLOBAL
    }

    pub fn with_resolver(resolver: AliasResolver) -> Self {
        DefaultClassifier {
            resolver: OnceCell::with_value(resolver),
            dirs: DashMap::new(),
        }
    }

    fn resolver(&self, filepath: Option<&Path>) -> Option<&AliasResolver> {
        if let Some(resolver) = self.resolver.get() {
            return Some(resolver);
        }
        let filepath = filepath?;
        // Failed discovery is not cached: the next file may sit in a
        // project that has a tsconfig.
        let resolver = AliasResolver::discover(filepath)?;
        debug!(file = %filepath.display(), "discovered path aliases");
        Some(self.resolver.get_or_init(|| resolver))
    }

    pub fn module_type(&self, path: &str, filepath: Option<&Path>) -> (ModuleType, Option<PathBuf>) {
        if is_react(path) {
            return (ModuleType::React, None);
        }
        if is_builtin(path) {
            return (ModuleType::Builtin, None);
        }
        if let Some(resolved) = self.resolver(filepath).and_then(|r| r.resolve(path)) {
            return (ModuleType::Absolute, Some(resolved));
        }
        if is_relative(path) {
            return (ModuleType::Relative, None);
        }
        (ModuleType::ThirdParty, None)
    }

    pub fn classify(&self, path: &str, filepath: Option<&Path>) -> GroupKey {
        let (module_type, resolved) = self.module_type(path, filepath);
        let dir = match (module_type, resolved, filepath) {
            (ModuleType::Absolute, Some(resolved), _) => self.resolved_dir(&resolved),
            (ModuleType::Relative, _, Some(filepath)) => {
                let importer = absolutize(filepath);
                let base = importer.parent().unwrap_or(Path::new(""));
                self.resolved_dir(&normalize_path(&base.join(path)))
            }
            _ => String::new(),
        };
        trace!(path, module_type = module_type.as_str(), dir = %dir, "classified import");
        GroupKey::new(module_type, dir)
    }

    /// Group key string for a record; usable as a `get_group` callback.
    pub fn group_key(&self, record: &ImportRecord, filepath: Option<&Path>) -> String {
        self.classify(&record.module_path, filepath).to_key()
    }

    /// Directory of the file `path` names, or `path` itself when it is not a
    /// file (a directory import such as `./components`).
    fn resolved_dir(&self, path: &Path) -> String {
        if let Some(dir) = self.dirs.get(path) {
            return dir.clone();
        }
        let dir = if path.is_file() || find_file_with_any_extension(path).is_some() {
            path.parent().unwrap_or(path)
        } else {
            path
        };
        let dir = dir.to_string_lossy().into_owned();
        self.dirs.insert(path.to_path_buf(), dir.clone());
        dir
    }
}

/// Order two group keys: module type, then directory. Keys that are not
/// classifier JSON compare as plain strings after those that are.
pub fn compare_group_keys(a: &str, b: &str) -> Ordering {
    match (GroupKey::parse(a), GroupKey::parse(b)) {
        (Some(a), Some(b)) => a.module_type.cmp(&b.module_type).then_with(|| a.dir.cmp(&b.dir)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_types_without_aliases() {
        let classifier = DefaultClassifier::new();
        let types: Vec<ModuleType> = ["react", "react-dom/client", "npm:react", "reactive", "node:fs", "path", "lodash", "./a", "../b"]
            .iter()
            .map(|path| classifier.classify(path, None).module_type)
            .collect();
        assert_eq!(
            types,
            [
                ModuleType::React,
                ModuleType::React,
                ModuleType::React,
                ModuleType::ThirdParty,
                ModuleType::Builtin,
                ModuleType::Builtin,
                ModuleType::ThirdParty,
                ModuleType::Relative,
                ModuleType::Relative,
            ]
        );
    }

    #[test]
    fn test_group_key_json() {
        let key = GroupKey::new(ModuleType::ThirdParty, "").to_key();
        assert_eq!(key, r#"{"type":"third-party","dir":""}"#);
        assert_eq!(GroupKey::parse(&key), Some(GroupKey::new(ModuleType::ThirdParty, "")));
    }

    #[test]
    fn test_compare_group_keys() {
        let react = GroupKey::new(ModuleType::React, "").to_key();
        let rel_a = GroupKey::new(ModuleType::Relative, "/p/a").to_key();
        let rel_b = GroupKey::new(ModuleType::Relative, "/p/b").to_key();
        assert_eq!(compare_group_keys(&react, &rel_a), Ordering::Less);
        assert_eq!(compare_group_keys(&rel_b, &rel_a), Ordering::Greater);
        assert_eq!(compare_group_keys(&rel_a, "custom"), Ordering::Less);
        assert_eq!(compare_group_keys("a", "b"), Ordering::Less);
    }
}
