//! Default classifier tests against on-disk projects.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kempt_imports::{
    AliasResolver, DefaultClassifier, ImportOptions, ImportSortConfig, ModuleType, compare_group_keys, preprocess_imports,
};
use tempfile::TempDir;

/// A project with `@/*` mapped onto `src/*`.
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/components")).unwrap();
    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::write(
        root.join("tsconfig.json"),
        r#"{
  // aliases only
  "compilerOptions": {
    "paths": { "@/*": ["src/*"], },
  },
}"#,
    )
    .unwrap();
    fs::write(root.join("src/utils.ts"), "export const u = 1\n").unwrap();
    fs::write(root.join("src/local.ts"), "export default 1\n").unwrap();
    fs::write(root.join("src/nested/deep.tsx"), "export default 1\n").unwrap();
    fs::write(root.join("src/components/index.ts"), "export {}\n").unwrap();
    dir
}

fn app_file(dir: &TempDir) -> PathBuf {
    dir.path().join("src/app.ts")
}

fn preset_config(classifier: Arc<DefaultClassifier>) -> ImportSortConfig {
    ImportSortConfig::new()
        .get_group(move |record, filepath| classifier.group_key(record, filepath))
        .sort_group(|a, b| {
            a.is_export_group
                .cmp(&b.is_export_group)
                .then_with(|| a.is_side_effect_group.cmp(&b.is_side_effect_group))
                .then_with(|| compare_group_keys(&a.key, &b.key))
        })
        .group_separator("")
        .sort_side_effect(true)
}

#[test]
fn test_stable_group_order() {
    let dir = project();
    let file = app_file(&dir);
    let text = "import local from \"./local\"\nimport utils from \"@/utils\"\nimport _ from \"lodash\"\nimport fs from \"node:fs\"\nimport React from \"react\"\n\nexport default function App() {}\n";
    let config = preset_config(Arc::new(DefaultClassifier::new()));
    let out = preprocess_imports(text, Some("babel-ts"), Some(&file), &ImportOptions::default(), &config);
    assert_eq!(
        out,
        "import React from \"react\";\n\nimport fs from \"node:fs\";\n\nimport _ from \"lodash\";\n\nimport utils from \"@/utils\";\n\nimport local from \"./local\";\n\nexport default function App() {}\n"
    );
}

#[test]
fn test_side_effect_imports_hold_their_place_between_groups() {
    let dir = project();
    let file = app_file(&dir);
    let text = "import \"./polyfill\"\nimport React from \"react\"\n";
    let config = preset_config(Arc::new(DefaultClassifier::new())).sort_side_effect(false);
    let out = preprocess_imports(text, Some("typescript"), Some(&file), &ImportOptions::default(), &config);
    assert_eq!(out, "import \"./polyfill\";\n\nimport React from \"react\";\n");

    let text = "import _ from \"lodash\"\nimport React from \"react\"\nimport \"./polyfill\"\nimport \"./reset.css\"\nimport local from \"./local\"\nimport fs from \"node:fs\"\n\nrun()\n";
    let out = preprocess_imports(text, Some("typescript"), Some(&file), &ImportOptions::default(), &config);
    assert_eq!(
        out,
        "import React from \"react\";\n\nimport _ from \"lodash\";\n\nimport \"./polyfill\";\nimport \"./reset.css\";\n\nimport fs from \"node:fs\";\n\nimport local from \"./local\";\n\nrun()\n"
    );
}

#[test]
fn test_alias_resolution_picks_absolute_type() {
    let dir = project();
    let file = app_file(&dir);
    let classifier = DefaultClassifier::new();

    let key = classifier.classify("@/utils", Some(&file));
    assert_eq!(key.module_type, ModuleType::Absolute);
    assert_eq!(Path::new(&key.dir), dir.path().join("src"));

    let key = classifier.classify("@/missing", Some(&file));
    assert_eq!(key.module_type, ModuleType::ThirdParty);

    let key = classifier.classify("@/utils?raw", Some(&file));
    assert_eq!(key.module_type, ModuleType::Absolute);
}

#[test]
fn test_relative_dirs() {
    let dir = project();
    let file = app_file(&dir);
    let classifier = DefaultClassifier::new();

    let file_import = classifier.classify("./nested/deep", Some(&file));
    assert_eq!(file_import.module_type, ModuleType::Relative);
    assert_eq!(Path::new(&file_import.dir), dir.path().join("src/nested"));

    let dir_import = classifier.classify("./components", Some(&file));
    assert_eq!(Path::new(&dir_import.dir), dir.path().join("src/components"));

    let parent = classifier.classify("../tsconfig.json", Some(&file));
    assert_eq!(Path::new(&parent.dir), dir.path());

    assert!(compare_group_keys(&file_import.to_key(), &dir_import.to_key()).is_gt());
}

#[test]
fn test_relative_without_filepath_has_no_dir() {
    let key = DefaultClassifier::new().classify("./x", None);
    assert_eq!(key.module_type, ModuleType::Relative);
    assert!(key.dir.is_empty());
}

#[test]
fn test_explicit_resolver_with_base_url() {
    let dir = project();
    fs::write(
        dir.path().join("tsconfig.base.json"),
        r#"{ "compilerOptions": { "baseUrl": "src" } }"#,
    )
    .unwrap();
    let resolver = AliasResolver::from_tsconfig(&dir.path().join("tsconfig.base.json"))
        .unwrap()
        .expect("baseUrl alone enables resolution");
    assert_eq!(resolver.resolve("utils"), Some(dir.path().join("src/utils")));
    assert_eq!(resolver.resolve("lodash"), None);

    let classifier = DefaultClassifier::with_resolver(resolver);
    assert_eq!(classifier.classify("utils", None).module_type, ModuleType::Absolute);
    assert_eq!(classifier.classify("react", None).module_type, ModuleType::React);
}

#[test]
fn test_dir_cache_is_reused() {
    let dir = project();
    let file = app_file(&dir);
    let classifier = DefaultClassifier::new();
    let first = classifier.classify("./local", Some(&file));
    fs::remove_file(dir.path().join("src/local.ts")).unwrap();
    let second = classifier.classify("./local", Some(&file));
    assert_eq!(first, second);
}
