//! Token classification and primitive literal values
//!
//! Every lexical unit a writer emits carries a [`TokenKind`]; the spacing
//! decorator keys its rule lookups on the kinds and texts of adjacent tokens.
//! [`PrimitiveValue`] covers literals whose printed form may differ from
//! their semantic value (a hex literal, a suffixed number): when the walker
//! supplies explicit literal text it is used verbatim, otherwise the writer
//! derives a canonical form from the value itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an emitted token, fixed at emission time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Brace,
    Number,
    OtherLiteral,
    Comment,
    Directive,
}

impl TokenKind {
    /// Word-like tokens glue into a single token when printed adjacently,
    /// so a separating space between two of them is mandatory.
    pub fn is_word_like(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::Number
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Brace => "brace",
            TokenKind::Number => "number",
            TokenKind::OtherLiteral => "other-literal",
            TokenKind::Comment => "comment",
            TokenKind::Directive => "directive",
        };
        write!(f, "{}", name)
    }
}

/// The child slot a token occupies in its parent node
///
/// Walkers that track slot tags pass them through; writers that do not
/// care (all of the shipped ones) ignore them. [`SlotTag::NONE`] is for
/// callers without slot information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTag<'a>(&'a str);

impl<'a> SlotTag<'a> {
    pub const NONE: SlotTag<'static> = SlotTag("");

    pub fn new(name: &'a str) -> Self {
        SlotTag(name)
    }

    pub fn name(&self) -> &'a str {
        self.0
    }
}

impl fmt::Display for SlotTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A primitive literal value carried by the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveValue {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PrimitiveValue {
    /// The token kind used for spacing when the walker does not override it
    pub fn default_kind(&self) -> TokenKind {
        match self {
            PrimitiveValue::Int(_) | PrimitiveValue::Float(_) => TokenKind::Number,
            // true/false/null print as keywords and must not glue with words
            PrimitiveValue::Null | PrimitiveValue::Bool(_) => TokenKind::Keyword,
            PrimitiveValue::Char(_) | PrimitiveValue::Str(_) => TokenKind::OtherLiteral,
        }
    }

    /// The canonical printed form, used when no explicit literal text is given
    pub fn default_text(&self) -> String {
        match self {
            PrimitiveValue::Null => "null".to_string(),
            PrimitiveValue::Bool(true) => "true".to_string(),
            PrimitiveValue::Bool(false) => "false".to_string(),
            PrimitiveValue::Char(c) => {
                let mut out = String::from('\'');
                escape_into(&mut out, *c, '\'');
                out.push('\'');
                out
            }
            PrimitiveValue::Int(n) => n.to_string(),
            PrimitiveValue::Float(x) => {
                let text = x.to_string();
                // Keep floats lexically distinct from integers
                if text.contains('.') || text.contains('e') || text.contains("inf") || text.contains("NaN") {
                    text
                } else {
                    format!("{}.0", text)
                }
            }
            PrimitiveValue::Str(s) => {
                let mut out = String::from('"');
                for c in s.chars() {
                    escape_into(&mut out, c, '"');
                }
                out.push('"');
                out
            }
        }
    }
}

fn escape_into(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c == quote => {
            out.push('\\');
            out.push(quote);
        }
        c if c.is_control() => {
            out.push_str(&format!("\\u{:04x}", c as u32));
        }
        c => out.push(c),
    }
}
