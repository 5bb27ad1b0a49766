//! Unused-import removal.
//!
//! A textual heuristic, not a scope analysis: a binding counts as used when
//! its local name appears as an identifier token anywhere in the file with
//! the import statements cut out. Property names after `.` do not count;
//! strings and comments are never looked at.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::lexer::{TokenKind, tokenize};
use crate::record::{ImportKind, ImportRecord};

/// Identifier tokens in `text` that can refer to a binding.
pub fn used_identifiers(text: &str) -> FxHashSet<&str> {
    let tokens = tokenize(text);
    let mut used = FxHashSet::default();

    for (index, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Ident {
            continue;
        }
        let dot = |back: usize| {
            index
                .checked_sub(back)
                .and_then(|i| tokens.get(i))
                .is_some_and(|t| t.is_punct(text, '.'))
        };
        // `obj.name` is a property access; `...name` is a spread.
        if dot(1) && !dot(2) {
            continue;
        }
        used.insert(token.text(text));
    }
    used
}

/// Drop import bindings whose local name never occurs in `remainder`.
///
/// Side-effect imports and re-exports are always kept. An import record
/// whose bindings all turn out unused is dropped.
pub fn remove_unused(records: Vec<ImportRecord>, remainder: &str) -> Vec<ImportRecord> {
    let used = used_identifiers(remainder);

    records
        .into_iter()
        .filter_map(|mut record| {
            if record.kind != ImportKind::Import || record.bindings.is_empty() {
                return Some(record);
            }
            record.bindings.retain(|binding| {
                let keep = used.contains(binding.local_name());
                if !keep {
                    trace!(name = binding.local_name(), module = %record.module_path, "removing unused binding");
                }
                keep
            });
            if record.bindings.is_empty() {
                trace!(module = %record.module_path, "removing unused import");
                None
            } else {
                Some(record)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_access_is_not_a_use() {
        let used = used_identifiers("obj.alpha; beta?.gamma; call(...delta); `${epsilon}` // zeta\n'eta'");
        assert!(used.contains("obj"));
        assert!(!used.contains("alpha"));
        assert!(used.contains("beta"));
        assert!(!used.contains("gamma"));
        assert!(used.contains("delta"));
        assert!(used.contains("epsilon"));
        assert!(!used.contains("zeta"));
        assert!(!used.contains("eta"));
    }
}
