use std::path::Path;

use crate::descriptor::LanguageDecl;

const JAVASCRIPT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".mjs", ".cjs"];
const TYPESCRIPT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mts", ".cts"];

pub fn default_languages() -> Vec<LanguageDecl> {
    vec![
        LanguageDecl::new("JavaScript", &["babel"], JAVASCRIPT_EXTENSIONS),
        LanguageDecl::new("TypeScript", &["typescript", "babel-ts"], TYPESCRIPT_EXTENSIONS),
    ]
}

/// Default parser for a source file, by extension.
pub fn parser_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?;
    let dotted = format!(".{}", extension.to_ascii_lowercase());
    if TYPESCRIPT_EXTENSIONS.contains(&dotted.as_str()) {
        Some("typescript")
    } else if JAVASCRIPT_EXTENSIONS.contains(&dotted.as_str()) {
        Some("babel")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_for_path() {
        assert_eq!(parser_for_path(Path::new("src/a.ts")), Some("typescript"));
        assert_eq!(parser_for_path(Path::new("src/A.TSX")), Some("typescript"));
        assert_eq!(parser_for_path(Path::new("bin/cli.mjs")), Some("babel"));
        assert_eq!(parser_for_path(Path::new("README.md")), None);
        assert_eq!(parser_for_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_languages_cover_supported_parsers() {
        let parsers: Vec<String> = default_languages().into_iter().flat_map(|l| l.parsers).collect();
        for parser in kempt_imports::SUPPORTED_PARSERS {
            assert!(parsers.iter().any(|p| p == parser), "{parser} has no language");
        }
    }
}
