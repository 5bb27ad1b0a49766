//! Brace policy options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How optional braces are treated for one class of single-statement body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BraceMode {
    /// Keep whatever the source has.
    #[default]
    Default,
    /// Remove braces where that is safe.
    Remove,
    /// Add braces where they are missing.
    Add,
}

impl BraceMode {
    pub const ALL: [BraceMode; 3] = [BraceMode::Default, BraceMode::Remove, BraceMode::Add];

    pub fn as_str(self) -> &'static str {
        match self {
            BraceMode::Default => "default",
            BraceMode::Remove => "remove",
            BraceMode::Add => "add",
        }
    }
}

impl fmt::Display for BraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid brace mode '{0}', expected one of: default, remove, add")]
pub struct ParseBraceModeError(pub String);

impl FromStr for BraceMode {
    type Err = ParseBraceModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(BraceMode::Default),
            "remove" => Ok(BraceMode::Remove),
            "add" => Ok(BraceMode::Add),
            _ => Err(ParseBraceModeError(s.to_string())),
        }
    }
}

/// Immutable brace policy, supplied once per normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracePolicy {
    /// Bodies whose single statement is itself a control statement
    /// (`if`, loops, `try`, `switch`).
    #[serde(default, alias = "controlStatementBraces")]
    pub conditional_brace_mode: BraceMode,
    /// Bodies whose single statement spans several lines.
    #[serde(default, alias = "multipleLineBraces")]
    pub multiline_brace_mode: BraceMode,
}

impl BracePolicy {
    pub const fn new(conditional_brace_mode: BraceMode, multiline_brace_mode: BraceMode) -> Self {
        BracePolicy {
            conditional_brace_mode,
            multiline_brace_mode,
        }
    }
}
