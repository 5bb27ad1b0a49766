//! Option declarations a host reads to discover and validate settings.

use kempt_braces::BraceMode;
use serde::Serialize;
use serde_json::Value;

pub const IMPORT_SORT_CATEGORY: &str = "Import Sort";
pub const BRACES_CATEGORY: &str = "Braces";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Boolean,
    String,
    Choice,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChoiceDecl {
    pub value: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionDecl {
    /// Config key, camelCase.
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceDecl>,
}

impl OptionDecl {
    pub fn boolean(name: &str, category: &str, default: Option<bool>, description: &str) -> Self {
        OptionDecl {
            name: name.to_string(),
            kind: OptionType::Boolean,
            category: category.to_string(),
            default: default.map(Value::Bool),
            description: description.to_string(),
            choices: Vec::new(),
        }
    }

    pub fn string(name: &str, category: &str, description: &str) -> Self {
        OptionDecl {
            name: name.to_string(),
            kind: OptionType::String,
            category: category.to_string(),
            default: None,
            description: description.to_string(),
            choices: Vec::new(),
        }
    }

    pub fn choice(name: &str, category: &str, default: &str, description: &str, choices: Vec<ChoiceDecl>) -> Self {
        OptionDecl {
            name: name.to_string(),
            kind: OptionType::Choice,
            category: category.to_string(),
            default: Some(Value::String(default.to_string())),
            description: description.to_string(),
            choices,
        }
    }
}

pub fn import_sort_options() -> Vec<OptionDecl> {
    vec![
        OptionDecl::string(
            "groupSeparator",
            IMPORT_SORT_CATEGORY,
            "Line inserted between import groups",
        ),
        OptionDecl::boolean(
            "sortSideEffect",
            IMPORT_SORT_CATEGORY,
            Some(false),
            "Sort side-effect imports and move them after other imports",
        ),
        OptionDecl::boolean(
            "removeUnusedImports",
            IMPORT_SORT_CATEGORY,
            Some(false),
            "Remove imported bindings that are never referenced",
        ),
        OptionDecl::boolean(
            "nodeProtocol",
            IMPORT_SORT_CATEGORY,
            None,
            "Add (true) or remove (false) the node: prefix on Node.js builtin modules; unset leaves them alone",
        ),
    ]
}

fn brace_mode_choices() -> Vec<ChoiceDecl> {
    let describe = |mode: BraceMode| match mode {
        BraceMode::Default => "Keep braces as written",
        BraceMode::Remove => "Remove braces where it is safe",
        BraceMode::Add => "Add braces where they are missing",
    };
    BraceMode::ALL
        .into_iter()
        .map(|mode| ChoiceDecl {
            value: mode.as_str().to_string(),
            description: describe(mode).to_string(),
        })
        .collect()
}

pub fn brace_options() -> Vec<OptionDecl> {
    vec![
        OptionDecl::choice(
            "conditionalBraceMode",
            BRACES_CATEGORY,
            BraceMode::Default.as_str(),
            "Braces around a body whose only statement is a control statement",
            brace_mode_choices(),
        ),
        OptionDecl::choice(
            "multilineBraceMode",
            BRACES_CATEGORY,
            BraceMode::Default.as_str(),
            "Braces around a body whose only statement spans several lines",
            brace_mode_choices(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_json_shape() {
        let json = serde_json::to_value(&import_sort_options()[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "boolean",
                "category": "Import Sort",
                "default": false,
                "description": "Sort side-effect imports and move them after other imports",
            })
        );

        let node_protocol = serde_json::to_value(&import_sort_options()[3]).unwrap();
        assert!(node_protocol.get("default").is_none());

        let braces = serde_json::to_value(&brace_options()[0]).unwrap();
        assert_eq!(braces["type"], "choice");
        assert_eq!(braces["default"], "default");
        assert_eq!(braces["choices"].as_array().map(Vec::len), Some(3));
    }
}
