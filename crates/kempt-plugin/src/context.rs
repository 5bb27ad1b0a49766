//! Per-call plugin context.
//!
//! Carried inside [`FormatOptions`](crate::FormatOptions) through every
//! preprocess, transform and nested host `format` call. It names the plugin
//! currently driving the call and marks calls made from inside the
//! delegation bridge, so the bridge can refuse to run itself again.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable identifier of a plugin descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(Arc<str>);

impl PluginId {
    pub fn new(id: impl AsRef<str>) -> Self {
        PluginId(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginId {
    fn from(id: &str) -> Self {
        PluginId::new(id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluginContext {
    pub active_plugin: Option<PluginId>,
    /// Set on the options of a host `format` call issued by the delegation
    /// bridge.
    pub bridging: bool,
}

impl PluginContext {
    /// Context for a call driven by `id` outside the bridge.
    pub fn for_plugin(id: PluginId) -> Self {
        PluginContext {
            active_plugin: Some(id),
            bridging: false,
        }
    }

    /// Context for a nested call made by `id` from inside the bridge.
    pub fn bridged_by(id: PluginId) -> Self {
        PluginContext {
            active_plugin: Some(id),
            bridging: true,
        }
    }
}
