//! Import pipeline configuration.
//!
//! [`ImportOptions`] is what a host resolves from user settings.
//! [`ImportSortConfig`] is the programmatic side: it carries the pluggable
//! callbacks and can override any scalar option. [`ResolvedConfig`] is the
//! merge of both, with `ImportSortConfig` taking precedence.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::{Binding, ImportRecord};
use crate::sort::Group;

/// Group key of a record. Records with equal keys share a group.
pub type GetGroupFn = Arc<dyn Fn(&ImportRecord, Option<&Path>) -> String + Send + Sync>;
pub type SortGroupFn = Arc<dyn Fn(&Group, &Group) -> Ordering + Send + Sync>;
pub type SortImportStatementFn = Arc<dyn Fn(&ImportRecord, &ImportRecord) -> Ordering + Send + Sync>;
pub type SortImportContentFn = Arc<dyn Fn(&Binding, &Binding) -> Ordering + Send + Sync>;
/// Separator between `group` and `next`; `None` means no separator line.
pub type GroupSeparatorFn = Arc<dyn Fn(&Group, &Group) -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub enum GroupSeparator {
    Text(String),
    Dynamic(GroupSeparatorFn),
}

impl GroupSeparator {
    pub fn between(&self, group: &Group, next: &Group) -> Option<String> {
        match self {
            GroupSeparator::Text(text) => Some(text.clone()),
            GroupSeparator::Dynamic(separator) => separator(group, next),
        }
    }
}

impl fmt::Debug for GroupSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSeparator::Text(text) => f.debug_tuple("Text").field(text).finish(),
            GroupSeparator::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// User-facing import options, as they appear in formatter settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    pub group_separator: Option<String>,
    pub sort_side_effect: Option<bool>,
    pub remove_unused_imports: Option<bool>,
    /// `true` adds `node:` to built-ins, `false` strips it, unset leaves
    /// paths alone.
    pub node_protocol: Option<bool>,
}

/// Programmatic configuration. Every set field overrides [`ImportOptions`].
#[derive(Clone, Default)]
pub struct ImportSortConfig {
    pub get_group: Option<GetGroupFn>,
    pub sort_group: Option<SortGroupFn>,
    pub sort_import_statement: Option<SortImportStatementFn>,
    pub sort_import_content: Option<SortImportContentFn>,
    pub group_separator: Option<GroupSeparator>,
    pub sort_side_effect: Option<bool>,
    pub remove_unused_imports: Option<bool>,
    pub node_protocol: Option<bool>,
}

impl ImportSortConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_group(mut self, f: impl Fn(&ImportRecord, Option<&Path>) -> String + Send + Sync + 'static) -> Self {
        self.get_group = Some(Arc::new(f));
        self
    }

    pub fn sort_group(mut self, f: impl Fn(&Group, &Group) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort_group = Some(Arc::new(f));
        self
    }

    pub fn sort_import_statement(
        mut self,
        f: impl Fn(&ImportRecord, &ImportRecord) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort_import_statement = Some(Arc::new(f));
        self
    }

    pub fn sort_import_content(mut self, f: impl Fn(&Binding, &Binding) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort_import_content = Some(Arc::new(f));
        self
    }

    pub fn group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = Some(GroupSeparator::Text(separator.into()));
        self
    }

    pub fn group_separator_fn(mut self, f: impl Fn(&Group, &Group) -> Option<String> + Send + Sync + 'static) -> Self {
        self.group_separator = Some(GroupSeparator::Dynamic(Arc::new(f)));
        self
    }

    pub fn sort_side_effect(mut self, value: bool) -> Self {
        self.sort_side_effect = Some(value);
        self
    }

    pub fn remove_unused_imports(mut self, value: bool) -> Self {
        self.remove_unused_imports = Some(value);
        self
    }

    pub fn node_protocol(mut self, value: bool) -> Self {
        self.node_protocol = Some(value);
        self
    }
}

impl fmt::Debug for ImportSortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportSortConfig")
            .field("get_group", &self.get_group.is_some())
            .field("sort_group", &self.sort_group.is_some())
            .field("sort_import_statement", &self.sort_import_statement.is_some())
            .field("sort_import_content", &self.sort_import_content.is_some())
            .field("group_separator", &self.group_separator)
            .field("sort_side_effect", &self.sort_side_effect)
            .field("remove_unused_imports", &self.remove_unused_imports)
            .field("node_protocol", &self.node_protocol)
            .finish()
    }
}

/// Effective settings for one file.
#[derive(Clone, Debug, Default)]
pub struct ResolvedConfig {
    pub filepath: Option<PathBuf>,
    pub callbacks: ImportSortConfig,
    pub sort_side_effect: bool,
    pub remove_unused_imports: bool,
    pub node_protocol: Option<bool>,
}

impl ResolvedConfig {
    pub fn resolve(config: &ImportSortConfig, options: &ImportOptions, filepath: Option<&Path>) -> Self {
        let mut callbacks = config.clone();
        if callbacks.group_separator.is_none() {
            callbacks.group_separator = options.group_separator.clone().map(GroupSeparator::Text);
        }
        ResolvedConfig {
            filepath: filepath.map(Path::to_path_buf),
            sort_side_effect: config.sort_side_effect.or(options.sort_side_effect).unwrap_or(false),
            remove_unused_imports: config
                .remove_unused_imports
                .or(options.remove_unused_imports)
                .unwrap_or(false),
            node_protocol: config.node_protocol.or(options.node_protocol),
            callbacks,
        }
    }

    pub fn group_key(&self, record: &ImportRecord) -> Option<String> {
        let get_group = self.callbacks.get_group.as_ref()?;
        Some(get_group(record, self.filepath.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_camel_case() {
        let options: ImportOptions = serde_json::from_str(
            r#"{ "groupSeparator": "", "sortSideEffect": true, "nodeProtocol": false }"#,
        )
        .unwrap();
        assert_eq!(options.group_separator.as_deref(), Some(""));
        assert_eq!(options.sort_side_effect, Some(true));
        assert_eq!(options.remove_unused_imports, None);
        assert_eq!(options.node_protocol, Some(false));
    }

    #[test]
    fn test_config_overrides_options() {
        let options = ImportOptions {
            group_separator: Some("//".into()),
            sort_side_effect: Some(true),
            remove_unused_imports: Some(true),
            node_protocol: Some(true),
        };
        let config = ImportSortConfig::new().sort_side_effect(false).group_separator("");
        let resolved = ResolvedConfig::resolve(&config, &options, None);
        assert!(!resolved.sort_side_effect);
        assert!(resolved.remove_unused_imports);
        assert_eq!(resolved.node_protocol, Some(true));
        assert!(matches!(resolved.callbacks.group_separator, Some(GroupSeparator::Text(ref s)) if s.is_empty()));

        let defaults = ResolvedConfig::resolve(&ImportSortConfig::new(), &ImportOptions::default(), None);
        assert!(!defaults.sort_side_effect);
        assert!(!defaults.remove_unused_imports);
        assert_eq!(defaults.node_protocol, None);
        assert!(defaults.callbacks.group_separator.is_none());
    }
}
