//! Statement ordering and grouping.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::classify::compare_group_keys;
use crate::config::ResolvedConfig;
use crate::record::ImportRecord;

/// Records sharing a group key and statement class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub is_export_group: bool,
    pub is_side_effect_group: bool,
    pub records: Vec<ImportRecord>,
}

fn compare_paths(a: &ImportRecord, b: &ImportRecord) -> Ordering {
    a.module_path
        .to_lowercase()
        .cmp(&b.module_path.to_lowercase())
        .then_with(|| a.module_path.cmp(&b.module_path))
}

/// Stable statement sort.
///
/// A `sort_import_statement` callback replaces the default order entirely.
/// Otherwise records are ordered by export-ness, group key and module path.
/// With `sort_side_effect`, side-effect imports are sorted too and go after
/// every other statement; without it they stay where they were and the
/// statements between two of them are sorted as separate runs.
pub fn sort_imports(records: Vec<ImportRecord>, config: &ResolvedConfig) -> Vec<ImportRecord> {
    if let Some(compare) = &config.callbacks.sort_import_statement {
        let mut records = records;
        records.sort_by(|a, b| compare(a, b));
        return records;
    }

    let mut keyed: Vec<(Option<String>, ImportRecord)> = records
        .into_iter()
        .map(|record| (config.group_key(&record), record))
        .collect();
    let compare = |(a_key, a): &(Option<String>, ImportRecord), (b_key, b): &(Option<String>, ImportRecord)| {
        a.is_export()
            .cmp(&b.is_export())
            .then_with(|| match (a_key, b_key) {
                (Some(a_key), Some(b_key)) => compare_group_keys(a_key, b_key),
                _ => Ordering::Equal,
            })
            .then_with(|| compare_paths(a, b))
    };

    if config.sort_side_effect {
        keyed.sort_by(|a, b| a.1.is_side_effect().cmp(&b.1.is_side_effect()).then_with(|| compare(a, b)));
    } else {
        for run in keyed.split_mut(|(_, record)| record.is_side_effect()) {
            run.sort_by(compare);
        }
    }
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Bucket records by group key, export-ness and side-effect-ness, in order
/// of first appearance. Without a `get_group` callback every record has the
/// empty key.
pub fn group_imports(records: Vec<ImportRecord>, config: &ResolvedConfig) -> Vec<Group> {
    let mut groups: IndexMap<(String, bool, bool), Group> = IndexMap::new();
    for record in records {
        let key = config.group_key(&record).unwrap_or_default();
        let is_export = record.is_export();
        let is_side_effect = record.is_side_effect();
        groups
            .entry((key.clone(), is_export, is_side_effect))
            .or_insert_with(|| Group {
                key,
                is_export_group: is_export,
                is_side_effect_group: is_side_effect,
                records: Vec::new(),
            })
            .records
            .push(record);
    }
    groups.into_values().collect()
}

/// Stable group sort: the `sort_group` callback, or imports before
/// re-exports, binding imports before side-effect imports, then group key.
pub fn sort_groups(mut groups: Vec<Group>, config: &ResolvedConfig) -> Vec<Group> {
    match &config.callbacks.sort_group {
        Some(compare) => groups.sort_by(|a, b| compare(a, b)),
        None => groups.sort_by(|a, b| {
            a.is_export_group
                .cmp(&b.is_export_group)
                .then_with(|| a.is_side_effect_group.cmp(&b.is_side_effect_group))
                .then_with(|| compare_group_keys(&a.key, &b.key))
        }),
    }
    groups
}

/// Grouped records in output order.
///
/// With `sort_side_effect` every record is grouped and the groups sorted.
/// Without it side-effect imports keep their place: each run of consecutive
/// side-effect imports becomes a group of its own, and only the runs between
/// them are grouped and sorted.
pub fn arrange_groups(records: Vec<ImportRecord>, config: &ResolvedConfig) -> Vec<Group> {
    if config.sort_side_effect {
        return sort_groups(group_imports(records, config), config);
    }

    let mut arranged: Vec<Group> = Vec::new();
    let mut run = Vec::new();
    for record in records {
        if !record.is_side_effect() {
            run.push(record);
            continue;
        }
        if run.is_empty() {
            if let Some(barrier) = arranged.last_mut().filter(|group| group.is_side_effect_group) {
                barrier.records.push(record);
                continue;
            }
        } else {
            arranged.extend(sort_groups(group_imports(std::mem::take(&mut run), config), config));
        }
        arranged.push(Group {
            key: config.group_key(&record).unwrap_or_default(),
            is_export_group: false,
            is_side_effect_group: true,
            records: vec![record],
        });
    }
    if !run.is_empty() {
        arranged.extend(sort_groups(group_imports(run, config), config));
    }
    arranged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImportOptions, ImportSortConfig};
    use crate::record::{Binding, ImportKind};

    fn import(path: &str) -> ImportRecord {
        ImportRecord::new(ImportKind::Import, path, vec![Binding::named("x", None)])
    }

    fn paths(records: &[ImportRecord]) -> Vec<&str> {
        records.iter().map(|r| r.module_path.as_str()).collect()
    }

    fn resolved(config: ImportSortConfig) -> ResolvedConfig {
        ResolvedConfig::resolve(&config, &ImportOptions::default(), None)
    }

    #[test]
    fn test_side_effects_are_barriers_by_default() {
        let records = vec![
            import("b"),
            import("a"),
            ImportRecord::side_effect("z-polyfill"),
            import("d"),
            import("C"),
        ];
        let sorted = sort_imports(records, &resolved(ImportSortConfig::new()));
        assert_eq!(paths(&sorted), ["a", "b", "z-polyfill", "C", "d"]);
    }

    #[test]
    fn test_sort_side_effect_moves_them_last() {
        let records = vec![
            ImportRecord::side_effect("z"),
            import("b"),
            ImportRecord::side_effect("y"),
            import("a"),
        ];
        let sorted = sort_imports(records, &resolved(ImportSortConfig::new().sort_side_effect(true)));
        assert_eq!(paths(&sorted), ["a", "b", "y", "z"]);
    }

    #[test]
    fn test_custom_statement_comparator() {
        let config = ImportSortConfig::new().sort_import_statement(|a, b| b.module_path.cmp(&a.module_path));
        let sorted = sort_imports(vec![import("a"), import("c"), import("b")], &resolved(config));
        assert_eq!(paths(&sorted), ["c", "b", "a"]);
    }

    #[test]
    fn test_arrange_keeps_side_effects_in_place() {
        let config = resolved(ImportSortConfig::new().get_group(|record, _| record.module_path[..1].to_string()));
        let records = vec![
            import("b1"),
            import("a1"),
            ImportRecord::side_effect("z1"),
            ImportRecord::side_effect("y1"),
            import("c1"),
            import("a2"),
        ];
        let groups = arrange_groups(records.clone(), &config);
        let layout: Vec<(&str, bool, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.key.as_str(), g.is_side_effect_group, paths(&g.records)))
            .collect();
        assert_eq!(
            layout,
            [
                ("a", false, vec!["a1"]),
                ("b", false, vec!["b1"]),
                ("z", true, vec!["z1", "y1"]),
                ("a", false, vec!["a2"]),
                ("c", false, vec!["c1"]),
            ]
        );

        let sorted_last = resolved(
            ImportSortConfig::new()
                .get_group(|record, _| record.module_path[..1].to_string())
                .sort_side_effect(true),
        );
        let groups = arrange_groups(records, &sorted_last);
        assert!(groups.last().unwrap().is_side_effect_group);
        assert_eq!(groups.len(), 5);
    }

    #[test]
    fn test_groups_keep_first_appearance_and_sort_by_class() {
        let config = resolved(ImportSortConfig::new().get_group(|record, _| record.module_path[..1].to_string()));
        let records = vec![
            ImportRecord::new(ImportKind::Export, "a-export", vec![Binding::named("x", None)]),
            ImportRecord::side_effect("b-side"),
            import("b1"),
            import("a1"),
            import("b2"),
        ];
        let groups = group_imports(records, &config);
        let keys: Vec<(&str, bool, bool)> = groups
            .iter()
            .map(|g| (g.key.as_str(), g.is_export_group, g.is_side_effect_group))
            .collect();
        assert_eq!(
            keys,
            [("a", true, false), ("b", false, true), ("b", false, false), ("a", false, false)]
        );
        assert_eq!(paths(&groups[2].records), ["b1", "b2"]);

        let sorted = sort_groups(groups, &config);
        let keys: Vec<(&str, bool, bool)> = sorted
            .iter()
            .map(|g| (g.key.as_str(), g.is_export_group, g.is_side_effect_group))
            .collect();
        assert_eq!(
            keys,
            [("a", false, false), ("b", false, false), ("b", false, true), ("a", true, false)]
        );
    }
}
