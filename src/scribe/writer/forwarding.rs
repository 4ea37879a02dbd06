//! The forwarding decorator: the base every specialized decorator follows
//!
//! `ForwardingWriter` owns exactly one inner writer and forwards every
//! contract operation verbatim — including the debug hooks and the
//! location probe. A chain of N forwarding layers around a terminal
//! writer behaves observably identical to the terminal writer alone;
//! specialized decorators start from this shape and augment only the
//! operations they care about, forwarding the rest the same way.

use crate::scribe::ast::AstNode;
use crate::scribe::location::TextLocation;
use crate::scribe::token::{PrimitiveValue, SlotTag, TokenKind};
use crate::scribe::trivia::{CommentKind, CommentRef, DirectiveKind};
use crate::scribe::writer::TokenWriter;

/// A [`TokenWriter`] that forwards every call to its inner writer
pub struct ForwardingWriter<W: TokenWriter> {
    inner: W,
}

impl<W: TokenWriter> ForwardingWriter<W> {
    /// Wrap `inner`; the inner writer is owned for the pipeline's lifetime
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: TokenWriter> TokenWriter for ForwardingWriter<W> {
    fn start_node(&mut self, node: &dyn AstNode) {
        self.inner.start_node(node);
    }

    fn end_node(&mut self, node: &dyn AstNode) {
        self.inner.end_node(node);
    }

    fn write_identifier(&mut self, name: &str, kind: TokenKind) {
        self.inner.write_identifier(name, kind);
    }

    fn write_keyword(&mut self, slot: SlotTag<'_>, keyword: &str) {
        self.inner.write_keyword(slot, keyword);
    }

    fn write_token(&mut self, slot: SlotTag<'_>, token: &str, kind: TokenKind) {
        self.inner.write_token(slot, token, kind);
    }

    fn write_primitive_value(
        &mut self,
        value: &PrimitiveValue,
        kind: Option<TokenKind>,
        literal: Option<&str>,
    ) {
        self.inner.write_primitive_value(value, kind, literal);
    }

    fn write_primitive_type(&mut self, name: &str) {
        self.inner.write_primitive_type(name);
    }

    fn space(&mut self) {
        self.inner.space();
    }

    fn indent(&mut self) {
        self.inner.indent();
    }

    fn unindent(&mut self) {
        self.inner.unindent();
    }

    fn new_line(&mut self) {
        self.inner.new_line();
    }

    fn write_comment(&mut self, kind: CommentKind, content: &str, refs: &[CommentRef]) {
        self.inner.write_comment(kind, content, refs);
    }

    fn write_directive(&mut self, kind: DirectiveKind, argument: &str) {
        self.inner.write_directive(kind, argument);
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
    use crate::scribe::writer::TextTokenWriter;

    #[test]
    fn test_forwarding_preserves_text() {
        let mut direct = TextTokenWriter::new();
        direct.write_keyword(SlotTag::NONE, "return");
        direct.space();
        direct.write_identifier("x", TokenKind::Identifier);

        let mut wrapped = ForwardingWriter::new(ForwardingWriter::new(TextTokenWriter::new()));
        wrapped.write_keyword(SlotTag::NONE, "return");
        wrapped.space();
        wrapped.write_identifier("x", TokenKind::Identifier);

        assert_eq!(
            wrapped.into_inner().into_inner().into_string(),
            direct.into_string()
        );
    }

    #[test]
    fn test_forwarding_exposes_inner_location() {
        let mut w = ForwardingWriter::new(TextTokenWriter::new());
        w.write_identifier("abc", TokenKind::Identifier);
        assert_eq!(w.location(), w.inner().location());
        assert!(w.location().is_some());
    }
}
