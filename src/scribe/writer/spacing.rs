//! The spacing decorator: inserts mandatory whitespace between tokens
//!
//! Remembers the kind and text of the most recently emitted token and
//! consults the [`SpacingRules`] table before each subsequent token.
//! Mandatory pairs get a space inserted on the inner writer; optional and
//! forbidden pairs get nothing. Explicit `space()` calls from the walker
//! are always forwarded and clear the remembered token, so the decorator
//! adds spaces but never removes or doubles them.

use crate::scribe::ast::AstNode;
use crate::scribe::location::TextLocation;
use crate::scribe::spacing::{SpaceRequirement, SpacingRules};
use crate::scribe::token::{PrimitiveValue, SlotTag, TokenKind};
use crate::scribe::trivia::{CommentKind, CommentRef, DirectiveKind};
use crate::scribe::writer::TokenWriter;

/// A [`TokenWriter`] that inserts rule-mandated spaces between adjacent tokens
pub struct SpacingWriter<W: TokenWriter> {
    inner: W,
    rules: SpacingRules,
    last: Option<(TokenKind, String)>,
}

impl<W: TokenWriter> SpacingWriter<W> {
    /// Wrap `inner` with the default rule table
    pub fn new(inner: W) -> Self {
        Self::with_rules(inner, SpacingRules::default())
    }

    pub fn with_rules(inner: W, rules: SpacingRules) -> Self {
        Self {
            inner,
            rules,
            last: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Insert a space if the rule table mandates one before (kind, text)
    fn separate(&mut self, kind: TokenKind, text: &str) {
        if let Some((prev_kind, prev_text)) = &self.last {
            let requirement = self.rules.lookup(*prev_kind, prev_text, kind, text);
            if requirement == SpaceRequirement::Mandatory {
                self.inner.space();
            }
        }
    }

    fn remember(&mut self, kind: TokenKind, text: &str) {
        self.last = Some((kind, text.to_string()));
    }
}

impl<W: TokenWriter> TokenWriter for SpacingWriter<W> {
    fn start_node(&mut self, node: &dyn AstNode) {
        self.inner.start_node(node);
    }

    fn end_node(&mut self, node: &dyn AstNode) {
        self.inner.end_node(node);
    }

    fn write_identifier(&mut self, name: &str, kind: TokenKind) {
        self.separate(kind, name);
        self.inner.write_identifier(name, kind);
        self.remember(kind, name);
    }

    fn write_keyword(&mut self, slot: SlotTag<'_>, keyword: &str) {
        self.separate(TokenKind::Keyword, keyword);
        self.inner.write_keyword(slot, keyword);
        self.remember(TokenKind::Keyword, keyword);
    }

    fn write_token(&mut self, slot: SlotTag<'_>, token: &str, kind: TokenKind) {
        self.separate(kind, token);
        self.inner.write_token(slot, token, kind);
        self.remember(kind, token);
    }

    fn write_primitive_value(
        &mut self,
        value: &PrimitiveValue,
        kind: Option<TokenKind>,
        literal: Option<&str>,
    ) {
        let effective_kind = kind.unwrap_or_else(|| value.default_kind());
        let text = match literal {
            Some(text) => text.to_string(),
            None => value.default_text(),
        };
        self.separate(effective_kind, &text);
        self.inner.write_primitive_value(value, kind, literal);
        self.remember(effective_kind, &text);
    }

    fn write_primitive_type(&mut self, name: &str) {
        self.separate(TokenKind::Keyword, name);
        self.inner.write_primitive_type(name);
        self.remember(TokenKind::Keyword, name);
    }

    fn space(&mut self) {
        self.inner.space();
        self.last = None;
    }

    fn indent(&mut self) {
        self.inner.indent();
    }

    fn unindent(&mut self) {
        self.inner.unindent();
    }

    fn new_line(&mut self) {
        self.inner.new_line();
        self.last = None;
    }

    fn write_comment(&mut self, kind: CommentKind, content: &str, refs: &[CommentRef]) {
        self.inner.write_comment(kind, content, refs);
        self.last = None;
    }

    fn write_directive(&mut self, kind: DirectiveKind, argument: &str) {
        self.inner.write_directive(kind, argument);
        self.last = None;
    }

    fn debug_start(&mut self, node: &dyn AstNode, start: Option<TextLocation>) {
        self.inner.debug_start(node, start);
    }

    fn debug_hidden(&mut self, node: Option<&dyn AstNode>) {
        self.inner.debug_hidden(node);
    }

    fn debug_expression(&mut self, node: &dyn AstNode) {
        self.inner.debug_expression(node);
    }

    fn debug_end(&mut self, node: &dyn AstNode, end: Option<TextLocation>) {
        self.inner.debug_end(node, end);
    }

    fn location(&self) -> Option<TextLocation> {
        self.inner.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scribe::spacing::SpacingRule;
    use crate::scribe::writer::TextTokenWriter;

    fn writer() -> SpacingWriter<TextTokenWriter> {
        SpacingWriter::new(TextTokenWriter::new())
    }

    #[test]
    fn test_keyword_then_identifier_gets_space() {
        let mut w = writer();
        w.write_keyword(SlotTag::NONE, "return");
        w.write_identifier("x", TokenKind::Identifier);
        assert_eq!(w.into_inner().into_string(), "return x");
    }

    #[test]
    fn test_explicit_space_is_not_doubled() {
        let mut w = writer();
        w.write_keyword(SlotTag::NONE, "return");
        w.space();
        w.write_identifier("x", TokenKind::Identifier);
        assert_eq!(w.into_inner().into_string(), "return x");
    }

    #[test]
    fn test_punctuation_stays_tight() {
        let mut w = writer();
        w.write_identifier("call", TokenKind::Identifier);
        w.write_token_brace(SlotTag::NONE, "(");
        w.write_identifier("a", TokenKind::Identifier);
        w.write_token_brace(SlotTag::NONE, ")");
        assert_eq!(w.into_inner().into_string(), "call(a)");
    }

    #[test]
    fn test_gluing_operators_get_space() {
        let mut w = writer();
        w.write_identifier("a", TokenKind::Identifier);
        w.write_token_operator(SlotTag::NONE, "-");
        w.write_token_operator(SlotTag::NONE, "-");
        w.write_identifier("b", TokenKind::Identifier);
        assert_eq!(w.into_inner().into_string(), "a- -b");
    }

    #[test]
    fn test_newline_resets_state() {
        let mut w = writer();
        w.write_keyword(SlotTag::NONE, "else");
        w.new_line();
        w.write_keyword(SlotTag::NONE, "if");
        assert_eq!(w.into_inner().into_string(), "else\nif");
    }

    #[test]
    fn test_primitive_value_spacing_uses_effective_text() {
        let mut w = writer();
        w.write_keyword(SlotTag::NONE, "return");
        w.write_primitive_value(&PrimitiveValue::Int(255), None, Some("0xFF"));
        assert_eq!(w.into_inner().into_string(), "return 0xFF");
    }

    #[test]
    fn test_forbidden_rule_overrides_fallback() {
        let rules = SpacingRules::new(vec![SpacingRule {
            prev_kind: Some(TokenKind::Keyword),
            prev_text: Some("return".to_string()),
            next_kind: Some(TokenKind::Identifier),
            next_text: None,
            require: SpaceRequirement::Forbidden,
        }]);
        let mut w = SpacingWriter::with_rules(TextTokenWriter::new(), rules);
        w.write_keyword(SlotTag::NONE, "return");
        w.write_identifier("x", TokenKind::Identifier);
        assert_eq!(w.into_inner().into_string(), "returnx");
    }

    #[test]
    fn test_block_comment_clears_state() {
        let mut w = writer();
        w.write_keyword(SlotTag::NONE, "return");
        w.write_comment(CommentKind::Block, "why", &[]);
        w.write_identifier("x", TokenKind::Identifier);
        assert_eq!(w.into_inner().into_string(), "return/*why*/x");
    }
}
