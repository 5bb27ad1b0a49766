use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use kempt_plugin::FormatSettings;

/// CLI arguments for the kempt binary.
#[derive(Parser, Debug)]
#[command(
    name = "kempt",
    version,
    about = "Sort, group and merge JavaScript/TypeScript imports"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite the import block of each file.
    #[command(name = "sort-imports")]
    SortImports(SortImportsArgs),
    /// Print the option schema of the preset plugin as JSON.
    Options,
}

#[derive(Args, Debug)]
pub struct SortImportsArgs {
    /// Files or directories to process. Directories are walked recursively.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write rewritten files in place instead of reporting them.
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Path to an rc file. Defaults to the nearest `.kemptrc.json`.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Parser for every file, instead of inferring it from the extension.
    #[arg(long, value_enum, ignore_case = true)]
    pub parser: Option<ParserName>,

    // ==================== Import Options ====================
    /// Line placed between import groups.
    #[arg(long = "groupSeparator", alias = "group-separator")]
    pub group_separator: Option<String>,

    /// Sort side-effect imports instead of keeping them in place.
    #[arg(long = "sortSideEffect", alias = "sort-side-effect")]
    pub sort_side_effect: Option<bool>,

    /// Drop imported bindings the file never references.
    #[arg(long = "removeUnusedImports", alias = "remove-unused-imports")]
    pub remove_unused_imports: Option<bool>,

    /// Add (`true`) or strip (`false`) the `node:` prefix of built-ins.
    #[arg(long = "nodeProtocol", alias = "node-protocol")]
    pub node_protocol: Option<bool>,

    // ==================== Output Formatting ====================
    /// Colorize status output. Defaults to whether stderr is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,
}

impl SortImportsArgs {
    /// Apply command-line overrides on top of `settings`.
    pub fn apply_to(&self, settings: &mut FormatSettings) {
        let imports = &mut settings.imports;
        if let Some(separator) = &self.group_separator {
            imports.group_separator = Some(separator.clone());
        }
        if let Some(value) = self.sort_side_effect {
            imports.sort_side_effect = Some(value);
        }
        if let Some(value) = self.remove_unused_imports {
            imports.remove_unused_imports = Some(value);
        }
        if let Some(value) = self.node_protocol {
            imports.node_protocol = Some(value);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParserName {
    Babel,
    Typescript,
    #[value(name = "babel-ts")]
    BabelTs,
}

impl ParserName {
    pub fn as_str(self) -> &'static str {
        match self {
            ParserName::Babel => "babel",
            ParserName::Typescript => "typescript",
            ParserName::BabelTs => "babel-ts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort_args(argv: &[&str]) -> SortImportsArgs {
        match CliArgs::try_parse_from(argv).unwrap().command {
            Command::SortImports(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_sort_imports_flags() {
        let args = sort_args(&[
            "kempt",
            "sort-imports",
            "src",
            "lib/a.ts",
            "--write",
            "--parser",
            "babel-ts",
            "--nodeProtocol",
            "true",
            "--group-separator",
            "//",
        ]);
        assert_eq!(args.paths, [PathBuf::from("src"), PathBuf::from("lib/a.ts")]);
        assert!(args.write);
        assert_eq!(args.parser, Some(ParserName::BabelTs));
        assert_eq!(args.node_protocol, Some(true));
        assert_eq!(args.group_separator.as_deref(), Some("//"));
        assert_eq!(args.sort_side_effect, None);
    }

    #[test]
    fn test_paths_are_required() {
        assert!(CliArgs::try_parse_from(["kempt", "sort-imports"]).is_err());
    }

    #[test]
    fn test_flags_override_settings() {
        let args = sort_args(&["kempt", "sort-imports", ".", "--sortSideEffect", "false"]);
        let mut settings = FormatSettings::default();
        settings.imports.sort_side_effect = Some(true);
        settings.imports.remove_unused_imports = Some(true);
        args.apply_to(&mut settings);
        assert_eq!(settings.imports.sort_side_effect, Some(false));
        assert_eq!(settings.imports.remove_unused_imports, Some(true));
    }

    #[test]
    fn test_options_command() {
        let args = CliArgs::try_parse_from(["kempt", "options"]).unwrap();
        assert!(matches!(args.command, Command::Options));
    }
}
