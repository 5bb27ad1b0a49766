//! A lightweight JavaScript/TypeScript token scanner.
//!
//! This is not a full tokenizer: it only needs to tell identifiers and
//! punctuation apart from string, template, regex and comment contents, so
//! that `import` inside a string is never taken for a statement and an
//! identifier inside a comment is never counted as a use. Template
//! substitutions (`${ ... }`) are scanned as ordinary code.

use kempt_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    String,
    /// A literal chunk of a template, including its delimiters.
    Template,
    Number,
    Regex,
    /// A single punctuation character.
    Punct,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line break (possibly inside a comment) precedes this token.
    pub newline_before: bool,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source).unwrap_or("")
    }

    pub fn is_punct(&self, source: &str, ch: char) -> bool {
        self.kind == TokenKind::Punct && self.text(source).starts_with(ch)
    }

    pub fn is_word(&self, source: &str, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(source) == word
    }
}

/// Contents of a string literal token without its quotes.
pub fn string_contents(raw: &str) -> &str {
    let mut chars = raw.chars();
    let Some(quote) = chars.next() else {
        return raw;
    };
    let inner = &raw[quote.len_utf8()..];
    inner.strip_suffix(quote).unwrap_or(inner)
}

/// Keywords after which a `/` starts a regular expression.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    lexer.run();
    lexer.tokens
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    newline_before: bool,
    brace_depth: u32,
    /// Brace depth at each open `${`; a `}` at that depth resumes the template.
    template_stack: Vec<u32>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
            newline_before: false,
            brace_depth: 0,
            template_stack: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            span: Span::from_range(start, self.pos),
            newline_before: self.newline_before,
        });
        self.newline_before = false;
    }

    fn run(&mut self) {
        if self.source.starts_with("#!") {
            self.skip_line();
        }

        while let Some(byte) = self.peek(0) {
            let start = self.pos;
            match byte {
                b'\n' => {
                    self.newline_before = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.peek(1) == Some(b'/') => self.skip_line(),
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment(),
                b'/' if self.regex_allowed() => {
                    self.scan_regex();
                    self.push(TokenKind::Regex, start);
                }
                b'\'' | b'"' => {
                    self.scan_string(byte);
                    self.push(TokenKind::String, start);
                }
                b'`' => {
                    self.pos += 1;
                    self.scan_template_chunk(start);
                }
                b'}' if self.template_stack.last() == Some(&self.brace_depth) => {
                    self.template_stack.pop();
                    self.pos += 1;
                    self.scan_template_chunk(start);
                }
                b'{' => {
                    self.brace_depth += 1;
                    self.pos += 1;
                    self.push(TokenKind::Punct, start);
                }
                b'}' => {
                    self.brace_depth = self.brace_depth.saturating_sub(1);
                    self.pos += 1;
                    self.push(TokenKind::Punct, start);
                }
                b'0'..=b'9' => {
                    self.scan_number();
                    self.push(TokenKind::Number, start);
                }
                b'.' if self.peek(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.scan_number();
                    self.push(TokenKind::Number, start);
                }
                _ if is_ident_start(byte) => {
                    self.pos += 1;
                    while self.peek(0).is_some_and(is_ident_part) {
                        self.pos += 1;
                    }
                    self.push(TokenKind::Ident, start);
                }
                _ => {
                    // Punctuation is ASCII; anything else was taken as an
                    // identifier byte above.
                    self.pos += 1;
                    self.push(TokenKind::Punct, start);
                }
            }
        }
    }

    fn skip_line(&mut self) {
        match memchr::memchr(b'\n', &self.bytes[self.pos..]) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.bytes.len(),
        }
    }

    fn skip_block_comment(&mut self) {
        let body_start = self.pos + 2;
        let end = memchr::memmem::find(&self.bytes[body_start..], b"*/")
            .map_or(self.bytes.len(), |offset| body_start + offset + 2);
        if memchr::memchr(b'\n', &self.bytes[self.pos..end]).is_some() {
            self.newline_before = true;
        }
        self.pos = end;
    }

    fn regex_allowed(&self) -> bool {
        let Some(last) = self.tokens.last() else {
            return true;
        };
        match last.kind {
            TokenKind::Punct => !matches!(last.text(self.source), ")" | "]" | "}"),
            TokenKind::Ident => REGEX_PRECEDING_KEYWORDS.contains(&last.text(self.source)),
            _ => false,
        }
    }

    /// Unterminated strings end at the line break.
    fn scan_string(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(byte) = self.peek(0) {
            match byte {
                b'\\' => self.pos = (self.pos + 2).min(self.bytes.len()),
                b'\n' => return,
                _ if byte == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Scan template text up to the closing backtick or the next `${`.
    fn scan_template_chunk(&mut self, start: usize) {
        while let Some(byte) = self.peek(0) {
            match byte {
                b'\\' => self.pos = (self.pos + 2).min(self.bytes.len()),
                b'`' => {
                    self.pos += 1;
                    self.push(TokenKind::Template, start);
                    return;
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    self.pos += 2;
                    self.push(TokenKind::Template, start);
                    self.template_stack.push(self.brace_depth);
                    return;
                }
                _ => self.pos += 1,
            }
        }
        self.push(TokenKind::Template, start);
    }

    fn scan_regex(&mut self) {
        self.pos += 1;
        let mut in_class = false;
        while let Some(byte) = self.peek(0) {
            match byte {
                b'\\' => self.pos = (self.pos + 2).min(self.bytes.len()),
                b'\n' => break,
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    while self.peek(0).is_some_and(is_ident_part) {
                        self.pos += 1;
                    }
                    break;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn scan_number(&mut self) {
        while self
            .peek(0)
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
        {
            self.pos += 1;
        }
    }
}

/// Bytes >= 0x80 belong to multi-byte characters, which are consumed whole
/// as identifier parts.
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || matches!(byte, b'_' | b'$' | b'#' | b'\\') || byte >= 0x80
}

fn is_ident_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'$' | b'\\') || byte >= 0x80
}
