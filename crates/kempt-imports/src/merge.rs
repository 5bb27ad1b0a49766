//! Merging records that import from the same module.

use indexmap::IndexMap;
use tracing::warn;

use crate::record::{Binding, ImportKind, ImportRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    Default,
    Namespace,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::Default => "default",
            ConflictKind::Namespace => "namespace",
        }
    }
}

/// Two incompatible bindings met while merging; the first one was kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeConflict {
    pub module_path: String,
    pub kind: ConflictKind,
    pub kept: String,
    pub discarded: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: Vec<ImportRecord>,
    pub conflicts: Vec<MergeConflict>,
}

type MergeKey = (String, ImportKind, Option<String>);

struct Pending {
    record: ImportRecord,
    /// Every contributing record was `import type` / `export type`.
    all_type_only: bool,
}

/// Combine records sharing module path, kind and attributes, keeping the
/// position of the first one.
///
/// Bindings are concatenated in encounter order with identical
/// `(imported, alias)` pairs collapsed; a value binding wins over a type-only
/// duplicate. A type-only record merged with a value record contributes
/// per-binding `type` modifiers instead. For imports, a second distinct
/// default or namespace binding is a conflict: the first is kept, the later
/// one is dropped and reported.
pub fn merge_imports(records: Vec<ImportRecord>) -> MergeOutcome {
    let mut merged: IndexMap<MergeKey, Pending> = IndexMap::new();
    let mut conflicts = Vec::new();

    for record in records {
        let key = (record.module_path.clone(), record.kind, record.attributes.clone());
        let record = push_type_only_down(record);
        match merged.get_mut(&key) {
            Some(pending) => {
                pending.all_type_only &= record.is_type_only_source;
                merge_into(&mut pending.record, record.record, &mut conflicts);
            }
            None => {
                merged.insert(
                    key,
                    Pending {
                        all_type_only: record.is_type_only_source,
                        record: record.record,
                    },
                );
            }
        }
    }

    let records = merged
        .into_values()
        .map(|pending| lift_type_only(pending.record, pending.all_type_only))
        .collect();
    MergeOutcome { records, conflicts }
}

struct Normalized {
    record: ImportRecord,
    is_type_only_source: bool,
}

/// Move a statement-level `type` onto each binding.
fn push_type_only_down(mut record: ImportRecord) -> Normalized {
    let is_type_only_source = record.is_type_only;
    if record.is_type_only {
        for binding in &mut record.bindings {
            binding.is_type_only = true;
        }
        record.is_type_only = false;
    }
    Normalized {
        record,
        is_type_only_source,
    }
}

fn lift_type_only(mut record: ImportRecord, all_type_only: bool) -> ImportRecord {
    if all_type_only {
        record.is_type_only = true;
        for binding in &mut record.bindings {
            binding.is_type_only = false;
        }
    }
    record
}

fn merge_into(target: &mut ImportRecord, incoming: ImportRecord, conflicts: &mut Vec<MergeConflict>) {
    target.range = target.range.cover(&incoming.range);

    for binding in incoming.bindings {
        if let Some(existing) = target
            .bindings
            .iter_mut()
            .find(|b| b.imported_name == binding.imported_name && b.local_alias == binding.local_alias)
        {
            existing.is_type_only &= binding.is_type_only;
            continue;
        }

        if target.kind == ImportKind::Import {
            if let Some(conflict) = find_conflict(target, &binding) {
                warn!(
                    module = %conflict.module_path,
                    kept = %conflict.kept,
                    discarded = %conflict.discarded,
                    "conflicting {} imports; keeping the first",
                    conflict.kind.as_str()
                );
                conflicts.push(conflict);
                continue;
            }
        }

        target.bindings.push(binding);
    }
}

fn find_conflict(target: &ImportRecord, binding: &Binding) -> Option<MergeConflict> {
    let kind = if binding.is_default {
        ConflictKind::Default
    } else if binding.is_namespace {
        ConflictKind::Namespace
    } else {
        return None;
    };
    // A type-only default and a value default bind different things and
    // print side by side.
    let existing = target.bindings.iter().find(|b| match kind {
        ConflictKind::Default => b.is_default && b.is_type_only == binding.is_type_only,
        ConflictKind::Namespace => b.is_namespace,
    })?;
    Some(MergeConflict {
        module_path: target.module_path.clone(),
        kind,
        kept: existing.local_name().to_string(),
        discarded: binding.local_name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(path: &str, bindings: Vec<Binding>) -> ImportRecord {
        ImportRecord::new(ImportKind::Import, path, bindings)
    }

    #[test]
    fn test_merges_in_encounter_order() {
        let outcome = merge_imports(vec![
            import("m", vec![Binding::named("a", None)]),
            import("other", vec![Binding::named("x", None)]),
            import("m", vec![Binding::named("b", None), Binding::named("a", None)]),
        ]);
        assert!(outcome.conflicts.is_empty());
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].module_path, "m");
        assert_eq!(
            outcome.records[0].bindings,
            [Binding::named("a", None), Binding::named("b", None)]
        );
    }

    #[test]
    fn test_kind_and_attributes_are_part_of_the_key() {
        let mut with_json = import("data", vec![Binding::default_import("a")]);
        with_json.attributes = Some("with { type: \"json\" }".into());
        let outcome = merge_imports(vec![
            import("m", vec![Binding::named("a", None)]),
            ImportRecord::new(ImportKind::Export, "m", vec![Binding::named("a", None)]),
            ImportRecord::side_effect("m"),
            ImportRecord::side_effect("m"),
            with_json,
            import("data", vec![Binding::named("b", None)]),
        ]);
        assert_eq!(outcome.records.len(), 5);
    }

    #[test]
    fn test_second_default_is_a_conflict() {
        let outcome = merge_imports(vec![
            import("m", vec![Binding::default_import("First")]),
            import("m", vec![Binding::default_import("Second"), Binding::named("c", None)]),
            import("m", vec![Binding::namespace(Some("ns".into()))]),
            import("m", vec![Binding::namespace(Some("other".into()))]),
        ]);
        assert_eq!(
            outcome.records[0].bindings,
            [
                Binding::default_import("First"),
                Binding::named("c", None),
                Binding::namespace(Some("ns".into())),
            ]
        );
        assert_eq!(
            outcome.conflicts,
            [
                MergeConflict {
                    module_path: "m".into(),
                    kind: ConflictKind::Default,
                    kept: "First".into(),
                    discarded: "Second".into(),
                },
                MergeConflict {
                    module_path: "m".into(),
                    kind: ConflictKind::Namespace,
                    kept: "ns".into(),
                    discarded: "other".into(),
                },
            ]
        );
    }

    #[test]
    fn test_type_default_and_value_default_are_compatible() {
        let mut types = import("m", vec![Binding::default_import("A")]);
        types.is_type_only = true;
        let outcome = merge_imports(vec![
            types,
            import("m", vec![Binding::default_import("B")]),
            import("m", vec![Binding::default_import("C")]),
        ]);
        assert_eq!(
            outcome.records[0].bindings,
            [Binding::default_import("A").type_only(), Binding::default_import("B")]
        );
        assert_eq!(outcome.conflicts.len(), 1);
        assert_eq!(outcome.conflicts[0].kept, "B");
        assert_eq!(outcome.conflicts[0].discarded, "C");
    }

    #[test]
    fn test_re_exported_defaults_do_not_conflict() {
        let outcome = merge_imports(vec![
            ImportRecord::new(ImportKind::Export, "m", vec![Binding::named("default", Some("A".into()))]),
            ImportRecord::new(ImportKind::Export, "m", vec![Binding::named("default", Some("B".into()))]),
        ]);
        assert!(outcome.conflicts.is_empty());
        assert_eq!(outcome.records[0].bindings.len(), 2);
    }

    #[test]
    fn test_type_only_folding() {
        let mut types = import("m", vec![Binding::named("T", None), Binding::named("a", None)]);
        types.is_type_only = true;
        let outcome = merge_imports(vec![types.clone(), import("m", vec![Binding::named("a", None)])]);
        let record = &outcome.records[0];
        assert!(!record.is_type_only);
        assert_eq!(
            record.bindings,
            [Binding::named("T", None).type_only(), Binding::named("a", None)],
            "value binding wins over its type-only duplicate"
        );

        let mut more_types = import("m", vec![Binding::named("U", None)]);
        more_types.is_type_only = true;
        let outcome = merge_imports(vec![types, more_types]);
        let record = &outcome.records[0];
        assert!(record.is_type_only);
        assert!(record.bindings.iter().all(|b| !b.is_type_only));
        assert_eq!(record.bindings.len(), 3);
    }
}
