//! JSON with comments and trailing commas.
//!
//! `tsconfig.json` and `.kemptrc.json` are JSONC: `//` and `/* */` comments
//! are allowed, and so are trailing commas before `}` or `]`. Both are
//! removed in a single pass before handing the text to `serde_json`.

use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum JsoncError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse JSONC text into `T`.
pub fn parse_jsonc<T: DeserializeOwned>(source: &str) -> Result<T, JsoncError> {
    let normalized = normalize_jsonc(source);
    Ok(serde_json::from_str(&normalized)?)
}

/// Strip comments and trailing commas, keeping newlines so that
/// `serde_json` error positions still point at the right line.
pub fn normalize_jsonc(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    // Index into `out` of a comma that may turn out to be trailing.
    let mut pending_comma: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];
        match ch {
            b'"' => {
                pending_comma = None;
                let start = i;
                i += 1;
                while i < bytes.len() {
                    match bytes[i] {
                        b'\\' => i += 2,
                        b'"' => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                let end = i.min(bytes.len());
                out.extend_from_slice(&bytes[start..end]);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    if bytes[i] == b'\n' {
                        out.push(b'\n');
                    }
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                continue;
            }
            b',' => {
                pending_comma = Some(out.len());
                out.push(ch);
            }
            b'}' | b']' => {
                if let Some(idx) = pending_comma.take() {
                    out[idx] = b' ';
                }
                out.push(ch);
            }
            c if c.is_ascii_whitespace() => out.push(c),
            _ => {
                pending_comma = None;
                out.push(ch);
            }
        }
        i += 1;
    }

    // Only ASCII bytes were removed or replaced, so UTF-8 stays intact.
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strips_line_and_block_comments() {
        let source = r#"{
            // base settings
            "a": 1, /* inline */ "b": "x // not a comment"
        }"#;
        let value: Value = parse_jsonc(source).unwrap();
        assert_eq!(value["a"], 1);
        assert_eq!(value["b"], "x // not a comment");
    }

    #[test]
    fn test_drops_trailing_commas() {
        let value: Value = parse_jsonc(r#"{ "paths": { "@/*": ["./src/*",], }, }"#).unwrap();
        assert_eq!(value["paths"]["@/*"][0], "./src/*");
    }

    #[test]
    fn test_keeps_commas_inside_strings() {
        let value: Value = parse_jsonc(r#"{ "s": ",}" }"#).unwrap();
        assert_eq!(value["s"], ",}");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_jsonc::<Value>("{ \"a\": }").is_err());
    }
}
