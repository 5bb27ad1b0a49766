//! `tsconfig.json` path aliases.
//!
//! Only `compilerOptions.baseUrl` and `compilerOptions.paths` matter here:
//! they decide whether a specifier such as `@/utils` resolves to a file in
//! the project, which the default classifier calls an "absolute" import.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use kempt_common::limits::MAX_TSCONFIG_EXTENDS_DEPTH;
use kempt_common::{ConfigError, read_jsonc_file};
use serde::Deserialize;
use tracing::debug;

pub const TSCONFIG_FILE_NAME: &str = "tsconfig.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn into_vec(self) -> Vec<String> {
        match self {
            Extends::One(path) => vec![path],
            Extends::Many(paths) => paths,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    #[serde(default)]
    extends: Option<Extends>,
    #[serde(default)]
    compiler_options: Option<RawCompilerOptions>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    paths: Option<IndexMap<String, Vec<String>>>,
}

/// Alias settings of a tsconfig with its `extends` chain applied. Relative
/// paths are already resolved against the file that declared them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsConfigPaths {
    pub base_url: Option<PathBuf>,
    pub paths: Option<IndexMap<String, Vec<String>>>,
    /// Directory of the config that declared `paths`.
    pub paths_dir: Option<PathBuf>,
}

impl TsConfigPaths {
    fn merge(base: TsConfigPaths, child: TsConfigPaths) -> TsConfigPaths {
        let (paths, paths_dir) = match child.paths {
            Some(paths) => (Some(paths), child.paths_dir),
            None => (base.paths, base.paths_dir),
        };
        TsConfigPaths {
            base_url: child.base_url.or(base.base_url),
            paths,
            paths_dir,
        }
    }

    /// Directory that `paths` targets are relative to.
    pub fn effective_base(&self) -> Option<&Path> {
        self.base_url.as_deref().or(self.paths_dir.as_deref())
    }
}

/// Load a tsconfig and the configs it extends.
pub fn load_tsconfig_paths(path: &Path) -> Result<TsConfigPaths, ConfigError> {
    let mut visited = HashSet::new();
    load_inner(path, &mut visited, 0)
}

fn load_inner(path: &Path, visited: &mut HashSet<PathBuf>, depth: u32) -> Result<TsConfigPaths, ConfigError> {
    if depth > MAX_TSCONFIG_EXTENDS_DEPTH {
        return Err(ConfigError::ExtendsTooDeep {
            path: path.to_path_buf(),
            limit: MAX_TSCONFIG_EXTENDS_DEPTH,
        });
    }
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        return Err(ConfigError::ExtendsCycle { path: canonical });
    }

    let raw: RawTsConfig = read_jsonc_file(path)?;
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut resolved = TsConfigPaths::default();
    for extends in raw.extends.map(Extends::into_vec).unwrap_or_default() {
        match resolve_extends_path(&dir, &extends) {
            Some(base_path) => {
                let base = load_inner(&base_path, visited, depth + 1)?;
                resolved = TsConfigPaths::merge(resolved, base);
            }
            None => debug!(extends = %extends, config = %path.display(), "tsconfig base not found"),
        }
    }

    let options = raw.compiler_options.unwrap_or_default();
    let own = TsConfigPaths {
        base_url: options.base_url.map(|base_url| normalize_path(&dir.join(base_url))),
        paths_dir: options.paths.as_ref().map(|_| dir.clone()),
        paths: options.paths,
    };

    visited.remove(&canonical);
    Ok(TsConfigPaths::merge(resolved, own))
}

/// Relative and absolute `extends` resolve against the config's directory;
/// anything else is looked up in `node_modules` like a package.
fn resolve_extends_path(dir: &Path, extends: &str) -> Option<PathBuf> {
    let with_json = |path: PathBuf| {
        if path.extension().is_none() {
            path.with_extension("json")
        } else {
            path
        }
    };

    let candidate = PathBuf::from(extends);
    if candidate.is_absolute() || extends.starts_with("./") || extends.starts_with("../") {
        return Some(with_json(dir.join(candidate)));
    }

    for ancestor in dir.ancestors() {
        let package = ancestor.join("node_modules").join(extends);
        let candidates = [package.clone(), with_json(package.clone()), package.join(TSCONFIG_FILE_NAME)];
        if let Some(found) = candidates.into_iter().find(|c| c.is_file()) {
            return Some(found);
        }
    }
    None
}

/// Nearest `tsconfig.json` in the directory of `filepath` or above.
pub fn find_tsconfig(filepath: &Path) -> Option<PathBuf> {
    let absolute = absolutize(filepath);
    absolute
        .parent()?
        .ancestors()
        .map(|dir| dir.join(TSCONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// One `paths` entry: `"@/*": ["src/*"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    pub pattern: String,
    prefix: String,
    suffix: String,
    pub targets: Vec<String>,
}

impl PathMapping {
    pub fn new(pattern: &str, targets: &[String]) -> Self {
        let pattern = normalize_path_pattern(pattern);
        let (prefix, suffix) = split_path_pattern(&pattern);
        PathMapping {
            pattern,
            prefix,
            suffix,
            targets: targets.iter().map(|t| normalize_path_pattern(t)).collect(),
        }
    }

    /// The text matched by `*`, or `""` for an exact pattern.
    pub fn match_specifier<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        if !self.pattern.contains('*') {
            return (self.pattern == specifier).then_some("");
        }
        let rest = specifier.strip_prefix(self.prefix.as_str())?;
        rest.strip_suffix(self.suffix.as_str())
    }

    pub fn specificity(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }
}

/// Mappings ordered most specific first.
pub fn build_path_mappings(paths: &IndexMap<String, Vec<String>>) -> Vec<PathMapping> {
    let mut mappings: Vec<PathMapping> = paths
        .iter()
        .filter(|(_, targets)| !targets.is_empty())
        .map(|(pattern, targets)| PathMapping::new(pattern, targets))
        .collect();
    mappings.sort_by(|left, right| {
        right
            .specificity()
            .cmp(&left.specificity())
            .then_with(|| right.pattern.len().cmp(&left.pattern.len()))
            .then_with(|| left.pattern.cmp(&right.pattern))
    });
    mappings
}

fn normalize_path_pattern(value: &str) -> String {
    value.trim().replace('\\', "/")
}

fn split_path_pattern(pattern: &str) -> (String, String) {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => (prefix.to_string(), suffix.to_string()),
        None => (pattern.to_string(), String::new()),
    }
}

/// Resolves aliased specifiers to files of the project.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    base: PathBuf,
    mappings: Vec<PathMapping>,
}

impl AliasResolver {
    /// With an explicit `baseUrl`, bare specifiers are also tried against it,
    /// after every `paths` entry.
    pub fn new(config: &TsConfigPaths) -> Option<Self> {
        let base = config.effective_base()?.to_path_buf();
        let mut mappings = config.paths.as_ref().map(build_path_mappings).unwrap_or_default();
        if config.base_url.is_some() {
            mappings.push(PathMapping::new("*", &["*".to_string()]));
        }
        Some(AliasResolver { base, mappings })
    }

    pub fn from_tsconfig(path: &Path) -> Result<Option<Self>, ConfigError> {
        Ok(Self::new(&load_tsconfig_paths(path)?))
    }

    /// Resolver for the project containing `filepath`, if it has a tsconfig
    /// with aliases. Load failures are logged and treated as "no aliases".
    pub fn discover(filepath: &Path) -> Option<Self> {
        let tsconfig = find_tsconfig(filepath)?;
        match Self::from_tsconfig(&tsconfig) {
            Ok(resolver) => resolver,
            Err(err) => {
                debug!(error = %err, "ignoring tsconfig aliases");
                None
            }
        }
    }

    /// The project file an aliased specifier points at, extension omitted
    /// when the specifier omitted it.
    pub fn resolve(&self, specifier: &str) -> Option<PathBuf> {
        let specifier = specifier.split_once('?').map_or(specifier, |(path, _)| path);
        for mapping in &self.mappings {
            let Some(matched) = mapping.match_specifier(specifier) else {
                continue;
            };
            for target in &mapping.targets {
                let candidate = normalize_path(&self.base.join(target.replacen('*', matched, 1)));
                if file_exists_with_any_extension(&candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// `base.ext` for a single extension, or `base.d.ts`.
pub fn is_possible_file(base: &str, item: &str) -> bool {
    let Some(rest) = item.strip_prefix(base).and_then(|rest| rest.strip_prefix('.')) else {
        return false;
    };
    !rest.is_empty() && (rest == "d.ts" || !rest.contains('.'))
}

/// `path` exists as is, or as a file with some extension added.
pub fn file_exists_with_any_extension(path: &Path) -> bool {
    if path.exists() {
        return true;
    }
    find_file_with_any_extension(path).is_some()
}

pub(crate) fn find_file_with_any_extension(path: &Path) -> Option<PathBuf> {
    let dir = path.parent()?;
    let base = path.file_name()?.to_str()?;
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_name().to_str().is_some_and(|name| is_possible_file(base, name))
                && entry.file_type().is_ok_and(|t| t.is_file())
        })
        .map(|entry| entry.path())
}

/// Make `path` absolute against the current directory, without touching
/// the file system beyond that.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize_path(&cwd.join(path)),
        Err(_) => normalize_path(path),
    }
}

/// Resolve `.` and `..` components lexically.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pattern: &str, target: &str) -> PathMapping {
        PathMapping::new(pattern, &[target.to_string()])
    }

    #[test]
    fn test_match_specifier() {
        let wildcard = mapping("@/*", "src/*");
        assert_eq!(wildcard.match_specifier("@/utils/x"), Some("utils/x"));
        assert_eq!(wildcard.match_specifier("lodash"), None);

        let exact = mapping("config", "src/config.ts");
        assert_eq!(exact.match_specifier("config"), Some(""));
        assert_eq!(exact.match_specifier("config/x"), None);

        let suffixed = mapping("*.css", "styles/*.css");
        assert_eq!(suffixed.match_specifier("a.css"), Some("a"));
    }

    #[test]
    fn test_mappings_sorted_by_specificity() {
        let mut paths = IndexMap::new();
        paths.insert("*".to_string(), vec!["types/*".to_string()]);
        paths.insert("@/*".to_string(), vec!["src/*".to_string()]);
        paths.insert("@/components/*".to_string(), vec!["src/ui/*".to_string()]);
        paths.insert("unused/*".to_string(), vec![]);
        let patterns: Vec<String> = build_path_mappings(&paths).into_iter().map(|m| m.pattern).collect();
        assert_eq!(patterns, ["@/components/*", "@/*", "*"]);
    }

    #[test]
    fn test_is_possible_file() {
        assert!(is_possible_file("utils", "utils.ts"));
        assert!(is_possible_file("utils", "utils.d.ts"));
        assert!(!is_possible_file("utils", "utils.test.ts"));
        assert!(!is_possible_file("utils", "utils."));
        assert!(!is_possible_file("utils", "utilsx.ts"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_extends_chain_and_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("configs")).unwrap();
        std::fs::write(
            root.join("configs/base.json"),
            r#"{ "compilerOptions": { "baseUrl": "..", "paths": { "~/*": ["lib/*"] } } }"#,
        )
        .unwrap();
        std::fs::write(
            root.join("tsconfig.json"),
            "{\n  // shared settings\n  \"extends\": \"./configs/base\",\n  \"compilerOptions\": { \"strict\": true, },\n}",
        )
        .unwrap();

        let loaded = load_tsconfig_paths(&root.join("tsconfig.json")).unwrap();
        assert_eq!(loaded.base_url.as_deref(), Some(normalize_path(root).as_path()));
        assert_eq!(loaded.paths_dir.as_deref(), Some(root.join("configs").as_path()));
        assert!(loaded.paths.is_some_and(|paths| paths.contains_key("~/*")));

        std::fs::write(root.join("a.json"), r#"{ "extends": "./b.json" }"#).unwrap();
        std::fs::write(root.join("b.json"), r#"{ "extends": "./a.json" }"#).unwrap();
        let err = load_tsconfig_paths(&root.join("a.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ExtendsCycle { .. }));
    }
}
