//! Import/export statement records.

use kempt_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportKind {
    /// `import ... from "m"`
    Import,
    /// `export ... from "m"`
    Export,
    /// `import "m"`
    SideEffect,
}

/// One imported or re-exported name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Name in the source module: `default` for default imports, `*` for
    /// namespaces. Quoted when the source used a string name.
    pub imported_name: String,
    pub local_alias: Option<String>,
    pub is_default: bool,
    pub is_namespace: bool,
    pub is_type_only: bool,
}

impl Binding {
    /// `{ name }` or `{ name as alias }`.
    pub fn named(imported: impl Into<String>, alias: Option<String>) -> Self {
        let imported_name = imported.into();
        Binding {
            is_default: imported_name == "default",
            imported_name,
            local_alias: alias,
            is_namespace: false,
            is_type_only: false,
        }
    }

    /// `import local from "m"`
    pub fn default_import(local: impl Into<String>) -> Self {
        Binding {
            imported_name: "default".to_string(),
            local_alias: Some(local.into()),
            is_default: true,
            is_namespace: false,
            is_type_only: false,
        }
    }

    /// `* as local`, or a bare `export *` when `local` is `None`.
    pub fn namespace(local: Option<String>) -> Self {
        Binding {
            imported_name: "*".to_string(),
            local_alias: local,
            is_default: false,
            is_namespace: true,
            is_type_only: false,
        }
    }

    pub fn type_only(mut self) -> Self {
        self.is_type_only = true;
        self
    }

    /// The name this binding introduces in the importing file.
    pub fn local_name(&self) -> &str {
        self.local_alias.as_deref().unwrap_or(&self.imported_name)
    }
}

/// One import/export statement found in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRecord {
    pub kind: ImportKind,
    /// Module specifier without its quotes, escapes kept as written.
    pub module_path: String,
    pub bindings: Vec<Binding>,
    /// Byte range of the statement, trailing `;` included.
    pub range: Span,
    /// `import type ...` / `export type ...`
    pub is_type_only: bool,
    /// Raw `with { ... }` / `assert { ... }` clause.
    pub attributes: Option<String>,
}

impl ImportRecord {
    pub fn new(kind: ImportKind, module_path: impl Into<String>, bindings: Vec<Binding>) -> Self {
        ImportRecord {
            kind,
            module_path: module_path.into(),
            bindings,
            range: Span::default(),
            is_type_only: false,
            attributes: None,
        }
    }

    pub fn side_effect(module_path: impl Into<String>) -> Self {
        Self::new(ImportKind::SideEffect, module_path, Vec::new())
    }

    pub fn with_range(mut self, range: Span) -> Self {
        self.range = range;
        self
    }

    pub fn is_side_effect(&self) -> bool {
        self.kind == ImportKind::SideEffect
    }

    pub fn is_export(&self) -> bool {
        self.kind == ImportKind::Export
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_names() {
        assert_eq!(Binding::default_import("React").local_name(), "React");
        assert_eq!(Binding::named("a", None).local_name(), "a");
        assert_eq!(Binding::named("a", Some("b".into())).local_name(), "b");
        assert_eq!(Binding::namespace(Some("ns".into())).local_name(), "ns");
        assert!(Binding::named("default", Some("x".into())).is_default);
    }
}
