//! Import record parser.
//!
//! Finds top-level `import` / `export ... from` statements with a token scan
//! rather than a full parse. Statements this scan does not understand (for
//! example `import x = require("y")` or a half-typed statement) are skipped,
//! never reported as errors.

use std::path::Path;

use kempt_common::Span;
use tracing::debug;

use crate::lexer::{Token, TokenKind, string_contents, tokenize};
use crate::record::{Binding, ImportKind, ImportRecord};

/// Scan `text` for import/export statements, in source order.
pub fn parse_imports(text: &str, filepath: Option<&Path>) -> Vec<ImportRecord> {
    let bytes = text.as_bytes();
    if memchr::memmem::find(bytes, b"import").is_none() && memchr::memmem::find(bytes, b"export").is_none() {
        return Vec::new();
    }

    let tokens = tokenize(text);
    let mut records = Vec::new();
    let mut depth: u32 = 0;
    let mut index = 0;

    while let Some(token) = tokens.get(index) {
        if token.kind == TokenKind::Punct {
            match token.text(text) {
                "{" | "(" | "[" => depth += 1,
                "}" | ")" | "]" => depth = depth.saturating_sub(1),
                _ => {}
            }
        } else if depth == 0 && token.kind == TokenKind::Ident && at_statement_start(text, &tokens, index) {
            let mut cursor = Cursor {
                text,
                tokens: &tokens,
                pos: index + 1,
            };
            let parsed = match token.text(text) {
                "import" => cursor.parse_import(),
                "export" => cursor.parse_export(),
                _ => None,
            };
            if let Some(mut record) = parsed {
                let end = cursor.finish_statement();
                record.range = Span::new(token.span.start, end);
                records.push(record);
                index = cursor.pos;
                continue;
            }
        }
        index += 1;
    }

    debug!(file = ?filepath, count = records.len(), "scanned import statements");
    records
}

fn at_statement_start(text: &str, tokens: &[Token], index: usize) -> bool {
    let Some(previous) = index.checked_sub(1).and_then(|i| tokens.get(i)) else {
        return true;
    };
    if previous.is_punct(text, '.') {
        return false;
    }
    previous.is_punct(text, ';') || previous.is_punct(text, '}') || tokens[index].newline_before
}

struct Cursor<'a> {
    text: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn punct_at(&self, offset: usize, ch: char) -> bool {
        self.at(offset).is_some_and(|token| token.is_punct(self.text, ch))
    }

    fn word_at(&self, offset: usize, word: &str) -> bool {
        self.at(offset).is_some_and(|token| token.is_word(self.text, word))
    }

    fn kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.at(offset).map(|token| token.kind)
    }

    fn eat_punct(&mut self, ch: char) -> bool {
        let matched = self.punct_at(0, ch);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let matched = self.word_at(0, word);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn ident(&mut self) -> Option<String> {
        let token = self.at(0)?;
        if token.kind != TokenKind::Ident {
            return None;
        }
        self.pos += 1;
        Some(token.text(self.text).to_string())
    }

    /// An identifier or a string name (`"a-b" as c`), kept as written.
    fn module_export_name(&mut self) -> Option<String> {
        let token = self.at(0)?;
        if !matches!(token.kind, TokenKind::Ident | TokenKind::String) {
            return None;
        }
        self.pos += 1;
        Some(token.text(self.text).to_string())
    }

    fn module_specifier(&mut self) -> Option<String> {
        let token = self.at(0)?;
        if token.kind != TokenKind::String {
            return None;
        }
        self.pos += 1;
        Some(string_contents(token.text(self.text)).to_string())
    }

    /// `with { ... }` / `assert { ... }`, returned verbatim.
    fn attributes(&mut self) -> Option<String> {
        if !(self.word_at(0, "with") || self.word_at(0, "assert")) || !self.punct_at(1, '{') {
            return None;
        }
        let start = self.at(0)?.span.start;
        let mut depth = 0u32;
        let mut offset = 1;
        while let Some(token) = self.at(offset) {
            if token.is_punct(self.text, '{') {
                depth += 1;
            } else if token.is_punct(self.text, '}') {
                depth -= 1;
                if depth == 0 {
                    let raw = Span::new(start, token.span.end).slice(self.text)?.to_string();
                    self.pos += offset + 1;
                    return Some(raw);
                }
            }
            offset += 1;
        }
        None
    }

    /// Consume an optional `;` and return the statement's end offset.
    fn finish_statement(&mut self) -> u32 {
        self.eat_punct(';');
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |token| token.span.end)
    }

    fn parse_import(&mut self) -> Option<ImportRecord> {
        if self.kind_at(0) == Some(TokenKind::String) {
            let module_path = self.module_specifier()?;
            let mut record = ImportRecord::side_effect(module_path);
            record.attributes = self.attributes();
            return Some(record);
        }
        // `import(...)` and `import.meta` are expressions.
        if self.punct_at(0, '(') || self.punct_at(0, '.') {
            return None;
        }

        let is_type_only = self.word_at(0, "type")
            && !self.word_at(1, "from")
            && (self.kind_at(1) == Some(TokenKind::Ident) || self.punct_at(1, '{') || self.punct_at(1, '*'));
        if is_type_only {
            self.pos += 1;
        }

        let mut bindings = Vec::new();
        if self.kind_at(0) == Some(TokenKind::Ident) && !self.word_at(0, "from") {
            bindings.push(Binding::default_import(self.ident()?));
            if !self.eat_punct(',') {
                return self.finish_import(bindings, is_type_only);
            }
        }

        if self.eat_punct('*') {
            if !self.eat_word("as") {
                return None;
            }
            bindings.push(Binding::namespace(Some(self.ident()?)));
        } else if self.eat_punct('{') {
            bindings.extend(self.named_bindings()?);
        } else if bindings.is_empty() || !self.word_at(0, "from") {
            return None;
        }

        self.finish_import(bindings, is_type_only)
    }

    fn finish_import(&mut self, bindings: Vec<Binding>, is_type_only: bool) -> Option<ImportRecord> {
        if !self.eat_word("from") {
            return None;
        }
        let module_path = self.module_specifier()?;
        // `import {} from "m"` only runs the module, like `import "m"`.
        let mut record = if bindings.is_empty() && !is_type_only {
            ImportRecord::side_effect(module_path)
        } else {
            ImportRecord::new(ImportKind::Import, module_path, bindings)
        };
        record.is_type_only = is_type_only;
        record.attributes = self.attributes();
        Some(record)
    }

    fn parse_export(&mut self) -> Option<ImportRecord> {
        let is_type_only = self.word_at(0, "type") && (self.punct_at(1, '{') || self.punct_at(1, '*'));
        if is_type_only {
            self.pos += 1;
        }

        let bindings = if self.eat_punct('*') {
            let alias = if self.eat_word("as") {
                Some(self.module_export_name()?)
            } else {
                None
            };
            vec![Binding::namespace(alias)]
        } else if self.eat_punct('{') {
            self.named_bindings()?
        } else {
            return None;
        };

        // `export { a, b }` without `from` exports local names.
        if !self.eat_word("from") {
            return None;
        }
        let module_path = self.module_specifier()?;
        let mut record = ImportRecord::new(ImportKind::Export, module_path, bindings);
        record.is_type_only = is_type_only;
        record.attributes = self.attributes();
        Some(record)
    }

    /// The list after `{`, through the closing `}`.
    fn named_bindings(&mut self) -> Option<Vec<Binding>> {
        let mut bindings = Vec::new();
        loop {
            if self.eat_punct('}') {
                return Some(bindings);
            }

            let is_type_only = self.word_at(0, "type") && self.type_modifier_follows();
            if is_type_only {
                self.pos += 1;
            }

            let imported = self.module_export_name()?;
            let alias = if self.eat_word("as") {
                Some(self.module_export_name()?)
            } else {
                None
            };
            let binding = Binding::named(imported, alias);
            bindings.push(if is_type_only { binding.type_only() } else { binding });

            if !self.eat_punct(',') && !self.punct_at(0, '}') {
                return None;
            }
        }
    }

    /// Whether the `type` at the cursor modifies the following name, as in
    /// `{ type A }`, rather than being the imported name, as in `{ type }`
    /// or `{ type as T }`.
    fn type_modifier_follows(&self) -> bool {
        let Some(next) = self.at(1) else {
            return false;
        };
        if !matches!(next.kind, TokenKind::Ident | TokenKind::String) {
            return false;
        }
        let plain_alias = self.word_at(1, "as")
            && self.kind_at(2) == Some(TokenKind::Ident)
            && (self.punct_at(3, ',') || self.punct_at(3, '}'));
        !plain_alias
    }
}
