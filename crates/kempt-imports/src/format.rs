//! Printing records back to statement text.
//!
//! Output is one statement per line, double-quoted, semicolon-terminated.
//! Line width and trailing commas are left to the host printer, which
//! reformats the block anyway.

use std::cmp::Ordering;

use crate::config::ResolvedConfig;
use crate::record::{Binding, ImportKind, ImportRecord};
use crate::sort::Group;

/// Default member order: default binding first, then by imported name
/// ignoring case, then exactly, then by alias.
pub fn compare_bindings(a: &Binding, b: &Binding) -> Ordering {
    b.is_default
        .cmp(&a.is_default)
        .then_with(|| a.imported_name.to_lowercase().cmp(&b.imported_name.to_lowercase()))
        .then_with(|| a.imported_name.cmp(&b.imported_name))
        .then_with(|| a.local_alias.cmp(&b.local_alias))
}

/// Paths keep their escapes, so only a bare `"` forces single quotes.
fn quote(path: &str) -> String {
    let bare_double_quote = path
        .char_indices()
        .any(|(i, c)| c == '"' && !path[..i].ends_with('\\'));
    if bare_double_quote {
        format!("'{path}'")
    } else {
        format!("\"{path}\"")
    }
}

fn from_clause(record: &ImportRecord) -> String {
    match &record.attributes {
        Some(attributes) => format!("from {} {attributes};", quote(&record.module_path)),
        None => format!("from {};", quote(&record.module_path)),
    }
}

fn member(binding: &Binding, with_type: bool) -> String {
    let mut text = String::new();
    if with_type {
        text.push_str("type ");
    }
    text.push_str(&binding.imported_name);
    if let Some(alias) = binding.local_alias.as_deref().filter(|alias| *alias != binding.imported_name) {
        text.push_str(" as ");
        text.push_str(alias);
    }
    text
}

fn braces(members: &[String]) -> String {
    if members.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", members.join(", "))
    }
}

/// Statements for one record. Usually one; namespace bindings always get
/// their own statement, as does a type-only default next to named types.
pub fn format_record(record: &ImportRecord, config: &ResolvedConfig) -> Vec<String> {
    let mut bindings = record.bindings.clone();
    match &config.callbacks.sort_import_content {
        Some(compare) => bindings.sort_by(|a, b| compare(a, b)),
        None => bindings.sort_by(compare_bindings),
    }
    let keyword = if record.is_type_only { "type " } else { "" };

    match record.kind {
        ImportKind::SideEffect => match &record.attributes {
            Some(attributes) => vec![format!("import {} {attributes};", quote(&record.module_path))],
            None => vec![format!("import {};", quote(&record.module_path))],
        },
        ImportKind::Import => format_import(record, &bindings, keyword),
        ImportKind::Export => format_export(record, &bindings, keyword),
    }
}

fn format_import(record: &ImportRecord, bindings: &[Binding], keyword: &str) -> Vec<String> {
    let from = from_clause(record);
    let mut statements = Vec::new();

    // A value default takes the default slot; a type-only default next to it
    // prints as `type default as X` among the named members.
    let is_default_slot = |b: &&Binding| b.is_default && !b.is_namespace && b.local_alias.is_some();
    let chosen = bindings
        .iter()
        .position(|b| is_default_slot(&b) && (record.is_type_only || !b.is_type_only))
        .or_else(|| bindings.iter().position(|b| is_default_slot(&b)));

    let mut default = None;
    let mut named = Vec::new();
    for (index, binding) in bindings.iter().enumerate() {
        if binding.is_namespace {
            let type_kw = if record.is_type_only || binding.is_type_only { "type " } else { "" };
            statements.push(format!("import {type_kw}* as {} {from}", binding.local_name()));
        } else if Some(index) == chosen {
            default = Some(binding);
        } else {
            named.push(binding);
        }
    }

    let named_members = |extra: Option<&Binding>| -> Vec<String> {
        extra
            .into_iter()
            .chain(named.iter().copied())
            .map(|b| member(b, b.is_type_only && !record.is_type_only))
            .collect()
    };

    let clause = match default {
        Some(default) if record.is_type_only && !named.is_empty() => {
            statements.push(format!("import type {} {from}", default.local_name()));
            braces(&named_members(None))
        }
        Some(default) if default.is_type_only && !record.is_type_only => {
            if named.is_empty() {
                statements.push(format!("import type {} {from}", default.local_name()));
                return statements;
            }
            braces(&named_members(Some(default)))
        }
        Some(default) if named.is_empty() => default.local_name().to_string(),
        Some(default) => format!("{}, {}", default.local_name(), braces(&named_members(None))),
        None if named.is_empty() && !statements.is_empty() => return statements,
        None => braces(&named_members(None)),
    };
    statements.push(format!("import {keyword}{clause} {from}"));
    statements
}

fn format_export(record: &ImportRecord, bindings: &[Binding], keyword: &str) -> Vec<String> {
    let from = from_clause(record);
    let mut statements = Vec::new();
    let mut named = Vec::new();

    for binding in bindings {
        if binding.is_namespace {
            match &binding.local_alias {
                Some(alias) => statements.push(format!("export {keyword}* as {alias} {from}")),
                None => statements.push(format!("export {keyword}* {from}")),
            }
        } else {
            named.push(member(binding, binding.is_type_only && !record.is_type_only));
        }
    }

    if !named.is_empty() || statements.is_empty() {
        statements.push(format!("export {keyword}{} {from}", braces(&named)));
    }
    statements
}

/// One statement per line, in record order.
pub fn format_import_statements(records: &[ImportRecord], config: &ResolvedConfig) -> String {
    records
        .iter()
        .flat_map(|record| format_record(record, config))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Groups in order, with the configured separator line between adjacent
/// groups. Without a separator groups follow each other directly.
pub fn format_groups(groups: &[Group], config: &ResolvedConfig) -> String {
    let mut out = String::new();
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
            let previous = &groups[index - 1];
            if let Some(separator) = config
                .callbacks
                .group_separator
                .as_ref()
                .and_then(|separator| separator.between(previous, group))
            {
                out.push_str(&separator);
                out.push('\n');
            }
        }
        out.push_str(&format_import_statements(&group.records, config));
    }
    out
}
