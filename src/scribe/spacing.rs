//! Pairwise spacing rules consulted between adjacent tokens
//!
//! The spacing decorator asks this table one question: given the previous
//! token's (kind, text) and the next token's (kind, text), is a separating
//! space mandatory, optional, or forbidden? The table is configuration
//! data, not logic — per-language tables load from YAML files, and the
//! shipped default only covers the pairs that are wrong for any C-family
//! lexer: word-like tokens that would glue into one token, and operator
//! pairs that would lex as a longer operator or a comment opener.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::token::TokenKind;

/// The answer for one adjacent token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceRequirement {
    /// A space must separate the pair; the decorator inserts one.
    Mandatory,
    /// Style preference only; the decorator inserts nothing.
    Optional,
    /// No space should be inserted. Exists so a custom table can carve
    /// exceptions out of a broader mandatory rule; explicit spaces
    /// requested by the walker are never removed.
    Forbidden,
}

/// One rule: matchers for the previous and next token, and the requirement
///
/// A `None` matcher accepts anything. Text matchers compare the exact
/// token text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingRule {
    #[serde(default)]
    pub prev_kind: Option<TokenKind>,
    #[serde(default)]
    pub prev_text: Option<String>,
    #[serde(default)]
    pub next_kind: Option<TokenKind>,
    #[serde(default)]
    pub next_text: Option<String>,
    pub require: SpaceRequirement,
}

impl SpacingRule {
    fn matches(&self, prev_kind: TokenKind, prev_text: &str, next_kind: TokenKind, next_text: &str) -> bool {
        self.prev_kind.map_or(true, |k| k == prev_kind)
            && self.prev_text.as_deref().map_or(true, |t| t == prev_text)
            && self.next_kind.map_or(true, |k| k == next_kind)
            && self.next_text.as_deref().map_or(true, |t| t == next_text)
    }
}

/// An ordered rule table; the first matching rule wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpacingRules {
    rules: Vec<SpacingRule>,
}

impl SpacingRules {
    /// A table with no explicit rules; only the word-like fallback applies
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn new(rules: Vec<SpacingRule>) -> Self {
        Self { rules }
    }

    /// Load a rule table from YAML (a sequence of rules)
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        let rules: Vec<SpacingRule> = serde_yaml::from_str(text)?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SpacingRule] {
        &self.rules
    }

    /// Decide the requirement between two adjacent tokens
    ///
    /// Explicit rules are consulted in order; when none match, two
    /// word-like tokens mandate a space (they would glue otherwise) and
    /// every other pair is optional.
    pub fn lookup(
        &self,
        prev_kind: TokenKind,
        prev_text: &str,
        next_kind: TokenKind,
        next_text: &str,
    ) -> SpaceRequirement {
        for rule in &self.rules {
            if rule.matches(prev_kind, prev_text, next_kind, next_text) {
                return rule.require;
            }
        }
        if prev_kind.is_word_like() && next_kind.is_word_like() {
            SpaceRequirement::Mandatory
        } else {
            SpaceRequirement::Optional
        }
    }
}

impl Default for SpacingRules {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

fn operator_pair(prev: &str, next: &str) -> SpacingRule {
    SpacingRule {
        prev_kind: Some(TokenKind::Operator),
        prev_text: Some(prev.to_string()),
        next_kind: Some(TokenKind::Operator),
        next_text: Some(next.to_string()),
        require: SpaceRequirement::Mandatory,
    }
}

/// Operator pairs that would lex as one longer operator, or open a comment
static DEFAULT_RULES: Lazy<SpacingRules> = Lazy::new(|| {
    SpacingRules::new(vec![
        operator_pair("-", "-"),
        operator_pair("+", "+"),
        operator_pair("&", "&"),
        operator_pair("|", "|"),
        operator_pair("<", "<"),
        operator_pair(">", ">"),
        operator_pair("=", "="),
        operator_pair("!", "="),
        operator_pair("/", "/"),
        operator_pair("/", "*"),
        operator_pair("*", "/"),
    ])
});
