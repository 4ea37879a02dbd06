//! The location-recording decorator: captures per-node output spans
//!
//! Wraps an inner writer and uses its `location()` as the coordinate
//! source. Entering a node records the current coordinate as the node's
//! start; leaving it records the end. Spans land in a side table keyed by
//! node id — the tree is immutable during traversal, so nodes are never
//! annotated in place. An inner writer that cannot report coordinates
//! records unknown endpoints instead of failing; compositions that need
//! guaranteed coordinates wrap the text writer directly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use crate::scribe::ast::{AstNode, NodeId};
use crate::scribe::location::{TextLocation, TextSpan};
use crate::scribe::token::{PrimitiveValue, SlotTag, TokenKind};
use crate::scribe::trivia::{CommentKind, CommentRef, DirectiveKind};
use crate::scribe::writer::TokenWriter;

/// Output coordinates recorded for one node; endpoints are `None` when
/// the coordinate source could not report a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeSpan {
    pub start: Option<TextLocation>,
    pub end: Option<TextLocation>,
}

impl NodeSpan {
    /// The span as a [`TextSpan`], if both endpoints are known
    pub fn text_span(&self) -> Option<TextSpan> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(TextSpan::new(start, end)),
            _ => None,
        }
    }
}

/// A cheaply cloneable handle to the per-node span side table of one pass
#[derive(Debug, Clone, Default)]
pub struct SpanTable {
    spans: Rc<RefCell<HashMap<NodeId, NodeSpan>>>,
}

impl SpanTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeSpan> {
        self.spans.borrow().get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.borrow().is_empty()
    }

    /// All recorded spans, sorted by node id
    pub fn entries(&self) -> Vec<(NodeId, NodeSpan)> {
        let mut entries: Vec<_> = self
            .spans
            .borrow()
            .iter()
            .map(|(id, span)| (*id, *span))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    fn record(&self, id: NodeId, span: NodeSpan) {
        self.spans.borrow_mut().insert(id, span);
    }
}

/// A [`TokenWriter`] that records each node's output span as it is walked
pub struct LocatingWriter<W: TokenWriter> {
    inner: W,
    spans: SpanTable,
    open: Vec<(NodeId, Option<TextLocation>)>,
}

impl<W: TokenWriter> LocatingWriter<W> {
    /// Wrap `inner` with a fresh span table
    pub fn new(inner: W) -> Self {
        Self::with_table(inner, SpanTable::new())
    }

    pub fn with_table(inner: W, spans: SpanTable) -> Self {
        Self {
            inner,
            spans,
            open: Vec::new(),
        }
    }

    /// A handle to the span table this writer records into
    pub fn spans(&self) -> SpanTable {
        self.spans.clone()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: TokenWriter> TokenWriter for LocatingWriter<W> {
    fn start_node(&mut self, node: &dyn AstNode) {
        self.open.push((node.id(), self.inner.location()));
        self.inner.start_node(node);
    }

    fn end_node(&mut self, node: &dyn AstNode) {
        let (id, start) = self
            .open
            .pop()
            .expect("end_node without a matching start_node");
        assert_eq!(
            id,
            node.id(),
            "end_node for {} while {} is still open",
            node.id(),
            id
        );
        self.spans.record(
            id,
            NodeSpan {
                start,
                end: self.inner.location(),
            },
        );
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
