//! Per-file options handed to plugins.

use std::path::PathBuf;
use std::sync::Arc;

use kempt_braces::BracePolicy;
use kempt_imports::ImportOptions;
use serde::{Deserialize, Serialize};

use crate::context::PluginContext;
use crate::descriptor::PluginDescriptor;

/// User settings recognized by the kempt plugins, as they appear in a
/// formatter config file: one flat camelCase object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSettings {
    #[serde(flatten)]
    pub braces: BracePolicy,
    #[serde(flatten)]
    pub imports: ImportOptions,
}

/// Options a host resolves for one file and passes to every plugin call.
#[derive(Clone, Debug)]
pub struct FormatOptions {
    /// Host parser name, e.g. `typescript`.
    pub parser: String,
    pub filepath: Option<PathBuf>,
    pub braces: BracePolicy,
    pub imports: ImportOptions,
    /// Plugins the host runs for this call.
    pub plugins: Vec<Arc<PluginDescriptor>>,
    pub context: PluginContext,
}

impl FormatOptions {
    pub fn new(parser: impl Into<String>) -> Self {
        FormatOptions {
            parser: parser.into(),
            filepath: None,
            braces: BracePolicy::default(),
            imports: ImportOptions::default(),
            plugins: Vec::new(),
            context: PluginContext::default(),
        }
    }

    pub fn with_filepath(mut self, filepath: impl Into<PathBuf>) -> Self {
        self.filepath = Some(filepath.into());
        self
    }

    pub fn with_settings(mut self, settings: &FormatSettings) -> Self {
        self.braces = settings.braces;
        self.imports = settings.imports.clone();
        self
    }

    pub fn with_plugins(mut self, plugins: Vec<Arc<PluginDescriptor>>) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_context(mut self, context: PluginContext) -> Self {
        self.context = context;
        self
    }
}

#[cfg(test)]
mod tests {
    use kempt_braces::BraceMode;

    use super::*;

    #[test]
    fn test_settings_from_flat_object() {
        let settings: FormatSettings = serde_json::from_str(
            r#"{
                "conditionalBraceMode": "remove",
                "multipleLineBraces": "add",
                "sortSideEffect": true,
                "nodeProtocol": true,
                "groupSeparator": ""
            }"#,
        )
        .unwrap();
        assert_eq!(settings.braces, BracePolicy::new(BraceMode::Remove, BraceMode::Add));
        assert_eq!(settings.imports.sort_side_effect, Some(true));
        assert_eq!(settings.imports.node_protocol, Some(true));
        assert_eq!(settings.imports.group_separator.as_deref(), Some(""));

        let empty: FormatSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, FormatSettings::default());
    }
}
