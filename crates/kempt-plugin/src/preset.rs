//! Ready-made configuration: default classifier, blank line between
//! groups, side-effect imports sorted last, braces normalizer chained.

use std::cmp::Ordering;
use std::sync::Arc;

use kempt_imports::{DefaultClassifier, Group, ImportSortConfig, compare_group_keys};

use crate::braces::brace_plugin;
use crate::compose::create_plugin;
use crate::descriptor::PluginDescriptor;

/// Imports before re-exports, binding imports before side-effect imports,
/// then module type and directory.
pub fn compare_groups(a: &Group, b: &Group) -> Ordering {
    a.is_export_group
        .cmp(&b.is_export_group)
        .then_with(|| a.is_side_effect_group.cmp(&b.is_side_effect_group))
        .then_with(|| compare_group_keys(&a.key, &b.key))
}

pub fn preset_config() -> ImportSortConfig {
    ImportSortConfig::new()
        .get_group(|record, filepath| DefaultClassifier::global().group_key(record, filepath))
        .sort_group(compare_groups)
        .group_separator("")
        .sort_side_effect(true)
}

/// The other plugins the preset composes, in registration order.
pub fn preset_plugins() -> Vec<Arc<PluginDescriptor>> {
    vec![Arc::new(brace_plugin())]
}

pub fn preset_plugin() -> PluginDescriptor {
    create_plugin(preset_config(), preset_plugins())
}
