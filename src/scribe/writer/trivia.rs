//! The trivia decorator: re-inserts comments and directives
//!
//! Trivia live on tree nodes, not in the primary token stream. As the
//! walk enters a node this decorator flushes the node's leading trivia
//! (before forwarding `start_node`, so recorded locations start at the
//! node's own first token); as the walk leaves it flushes the trailing
//! trivia. Whether a trivium has already been flushed is tracked in a
//! registry scoped to the rendering pass and shared by construction, so
//! nested or repeated trivia layers in one composition never duplicate
//! output.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::scribe::ast::AstNode;
use crate::scribe::location::TextLocation;
use crate::scribe::token::{PrimitiveValue, SlotTag, TokenKind};
use crate::scribe::trivia::{Anchor, CommentKind, CommentRef, DirectiveKind, TriviaId, TriviaPayload};
use crate::scribe::writer::TokenWriter;

/// Records which trivia a rendering pass has already emitted
pub type FlushRegistry = Rc<RefCell<HashSet<TriviaId>>>;

/// A [`TokenWriter`] that emits node-anchored trivia at their anchors
pub struct TriviaWriter<W: TokenWriter> {
    inner: W,
    flushed: FlushRegistry,
}

impl<W: TokenWriter> TriviaWriter<W> {
    /// Wrap `inner` with a fresh flush registry (one rendering pass)
    pub fn new(inner: W) -> Self {
        Self::with_registry(inner, FlushRegistry::default())
    }

    /// Wrap `inner` sharing `registry` with other trivia layers of the
    /// same pass
    pub fn with_registry(inner: W, registry: FlushRegistry) -> Self {
        Self {
            inner,
            flushed: registry,
        }
    }

    /// The registry of this pass, for sharing with another layer
    pub fn registry(&self) -> FlushRegistry {
        Rc::clone(&self.flushed)
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Emit the node's not-yet-flushed trivia at `anchor`, in list order
    fn flush(&mut self, node: &dyn AstNode, anchor: Anchor) {
        for trivium in node.trivia() {
            if trivium.anchor != anchor {
                continue;
            }
            if !self.flushed.borrow_mut().insert(trivium.id) {
                continue;
            }
            match &trivium.payload {
                TriviaPayload::Comment(comment) => {
                    self.inner
                        .write_comment(comment.kind, &comment.content, &comment.refs);
                    self.inner.new_line();
                }
                TriviaPayload::Directive(directive) => {
                    self.inner.write_directive(directive.kind, &directive.argument);
                    self.inner.new_line();
                }
            }
        }
    }
}

impl<W: TokenWriter> TokenWriter for TriviaWriter<W> {
    fn start_node(&mut self, node: &dyn AstNode) {
        self.flush(node, Anchor::Leading);
        self.inner.start_node(node);
    }

    fn end_node(&mut self, node: &dyn AstNode) {
        self.flush(node, Anchor::Trailing);
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
    use crate::scribe::testing::TestNode;
    use crate::scribe::trivia::{Comment, Directive};
    use crate::scribe::writer::TextTokenWriter;

    #[test]
    fn test_leading_comment_then_newline_then_token() {
        let node = TestNode::new(1, "Stmt")
            .leading_comment(Comment::line(" note"))
            .keyword("return");

        let mut w = TriviaWriter::new(TextTokenWriter::new());
        node.walk(&mut w);

        assert_eq!(w.into_inner().into_string(), "// note\nreturn");
    }

    #[test]
    fn test_trailing_directive_after_tokens() {
        let node = TestNode::new(1, "Block")
            .leading_directive(Directive::new(DirectiveKind::Region, "body"))
            .keyword("begin")
            .newline()
            .trailing_directive(Directive::new(DirectiveKind::EndRegion, ""));

        let mut w = TriviaWriter::new(TextTokenWriter::new());
        node.walk(&mut w);

        assert_eq!(
            w.into_inner().into_string(),
            "#region body\nbegin\n#endregion\n"
        );
    }

    #[test]
    fn test_same_anchor_preserves_list_order() {
        let node = TestNode::new(1, "Stmt")
            .leading_comment(Comment::line(" first"))
            .leading_comment(Comment::line(" second"))
            .identifier("x");

        let mut w = TriviaWriter::new(TextTokenWriter::new());
        node.walk(&mut w);

        assert_eq!(w.into_inner().into_string(), "// first\n// second\nx");
    }

    #[test]
    fn test_nested_trivia_layers_do_not_duplicate() {
        let node = TestNode::new(1, "Stmt")
            .leading_comment(Comment::line(" once"))
            .identifier("x");

        // Two trivia layers sharing one registry: still exactly one copy
        let inner = TriviaWriter::new(TextTokenWriter::new());
        let registry = inner.registry();
        let mut outer = TriviaWriter::with_registry(inner, registry);
        node.walk(&mut outer);

        assert_eq!(
            outer.into_inner().into_inner().into_string(),
            "// once\nx"
        );
    }
}
