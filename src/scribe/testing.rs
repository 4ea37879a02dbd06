//! Test support for driving writers without a language front end
//!
//! The real callers of a pipeline are output visitors owned by language
//! front ends, which this crate does not contain. `TestNode` is a small
//! owned tree with a built-in depth-first walker so tests can drive any
//! [`TokenWriter`] declaratively, and `RecordingWriter` captures the call
//! stream for assertions about forwarding behavior.

use crate::scribe::ast::{AstNode, NodeId};
use crate::scribe::location::TextLocation;
use crate::scribe::token::{PrimitiveValue, SlotTag, TokenKind};
use crate::scribe::trivia::{
    Anchor, Comment, CommentKind, CommentRef, Directive, DirectiveKind, Trivia, TriviaId,
};
use crate::scribe::writer::TokenWriter;

/// One token a [`TestNode`] emits when walked
#[derive(Debug, Clone)]
pub enum TestToken {
    Keyword(&'static str),
    Identifier(&'static str),
    Operator(&'static str),
    Brace(&'static str),
    Number(&'static str),
    Primitive(PrimitiveValue),
    Space,
    NewLine,
    Indent,
    Unindent,
}

impl TestToken {
    fn emit<W: TokenWriter>(&self, writer: &mut W) {
        match self {
            TestToken::Keyword(text) => writer.write_keyword(SlotTag::NONE, text),
            TestToken::Identifier(text) => writer.write_identifier(text, TokenKind::Identifier),
            TestToken::Operator(text) => writer.write_token_operator(SlotTag::NONE, text),
            TestToken::Brace(text) => writer.write_token_brace(SlotTag::NONE, text),
            TestToken::Number(text) => writer.write_token_number(SlotTag::NONE, text),
            TestToken::Primitive(value) => writer.write_primitive_value(value, None, None),
            TestToken::Space => writer.space(),
            TestToken::NewLine => writer.new_line(),
            TestToken::Indent => writer.indent(),
            TestToken::Unindent => writer.unindent(),
        }
    }
}

#[derive(Debug, Clone)]
enum TestContent {
    Token(TestToken),
    Child(TestNode),
}

/// A self-walking tree node for pipeline tests
///
/// Builder methods append tokens and children in emission order. Trivia
/// ids derive from the owning node's id, so they are unique as long as
/// node ids are distinct and no node carries a hundred trivia.
#[derive(Debug, Clone)]
pub struct TestNode {
    id: NodeId,
    node_type: &'static str,
    trivia: Vec<Trivia>,
    content: Vec<TestContent>,
}

impl TestNode {
    pub fn new(id: u64, node_type: &'static str) -> Self {
        Self {
            id: NodeId(id),
            node_type,
            trivia: Vec::new(),
            content: Vec::new(),
        }
    }

    fn next_trivia_id(&self) -> TriviaId {
        TriviaId(self.id.0 * 100 + self.trivia.len() as u64)
    }

    pub fn leading_comment(mut self, comment: Comment) -> Self {
        let id = self.next_trivia_id();
        self.trivia.push(Trivia::comment(id, Anchor::Leading, comment));
        self
    }

    pub fn trailing_comment(mut self, comment: Comment) -> Self {
        let id = self.next_trivia_id();
        self.trivia.push(Trivia::comment(id, Anchor::Trailing, comment));
        self
    }

    pub fn leading_directive(mut self, directive: Directive) -> Self {
        let id = self.next_trivia_id();
        self.trivia
            .push(Trivia::directive(id, Anchor::Leading, directive));
        self
    }

    pub fn trailing_directive(mut self, directive: Directive) -> Self {
        let id = self.next_trivia_id();
        self.trivia
            .push(Trivia::directive(id, Anchor::Trailing, directive));
        self
    }

    pub fn keyword(mut self, text: &'static str) -> Self {
        self.content.push(TestContent::Token(TestToken::Keyword(text)));
        self
    }

    pub fn identifier(mut self, text: &'static str) -> Self {
        self.content
            .push(TestContent::Token(TestToken::Identifier(text)));
        self
    }

    pub fn operator(mut self, text: &'static str) -> Self {
        self.content
            .push(TestContent::Token(TestToken::Operator(text)));
        self
    }

    pub fn brace(mut self, text: &'static str) -> Self {
        self.content.push(TestContent::Token(TestToken::Brace(text)));
        self
    }

    pub fn number(mut self, text: &'static str) -> Self {
        self.content.push(TestContent::Token(TestToken::Number(text)));
        self
    }

    pub fn primitive(mut self, value: PrimitiveValue) -> Self {
        self.content
            .push(TestContent::Token(TestToken::Primitive(value)));
        self
    }

    pub fn space_token(mut self) -> Self {
        self.content.push(TestContent::Token(TestToken::Space));
        self
    }

    pub fn newline(mut self) -> Self {
        self.content.push(TestContent::Token(TestToken::NewLine));
        self
    }

    pub fn indented(mut self) -> Self {
        self.content.push(TestContent::Token(TestToken::Indent));
        self
    }

    pub fn unindented(mut self) -> Self {
        self.content.push(TestContent::Token(TestToken::Unindent));
        self
    }

    pub fn child(mut self, child: TestNode) -> Self {
        self.content.push(TestContent::Child(child));
        self
    }

    /// Drive `writer` through this subtree in depth-first order
    pub fn walk<W: TokenWriter>(&self, writer: &mut W) {
        writer.start_node(self);
        for item in &self.content {
            match item {
                TestContent::Token(token) => token.emit(writer),
                TestContent::Child(child) => child.walk(writer),
            }
        }
        writer.end_node(self);
    }
}

impl AstNode for TestNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> &str {
        self.node_type
    }

    fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }
}

/// A [`TokenWriter`] that records every call as a readable event string
///
/// Deliberately not locatable, which also makes it the standard probe for
/// the pipeline's wrap-existing configuration error.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    events: Vec<String>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }
}

impl TokenWriter for RecordingWriter {
    fn start_node(&mut self, node: &dyn AstNode) {
        self.events.push(format!("start:{}", node.node_type()));
    }

    fn end_node(&mut self, node: &dyn AstNode) {
        self.events.push(format!("end:{}", node.node_type()));
    }

    fn write_identifier(&mut self, name: &str, _kind: TokenKind) {
        self.events.push(format!("identifier:{}", name));
    }

    fn write_keyword(&mut self, _slot: SlotTag<'_>, keyword: &str) {
        self.events.push(format!("keyword:{}", keyword));
    }

    fn write_token(&mut self, _slot: SlotTag<'_>, token: &str, kind: TokenKind) {
        self.events.push(format!("token[{}]:{}", kind, token));
    }

    fn write_primitive_value(
        &mut self,
        value: &PrimitiveValue,
        _kind: Option<TokenKind>,
        literal: Option<&str>,
    ) {
        match literal {
            Some(text) => self.events.push(format!("primitive:{}", text)),
            None => self.events.push(format!("primitive:{}", value.default_text())),
        }
    }

    fn write_primitive_type(&mut self, name: &str) {
        self.events.push(format!("primitive-type:{}", name));
    }

    fn space(&mut self) {
        self.events.push("space".to_string());
    }

    fn indent(&mut self) {
        self.events.push("indent".to_string());
    }

    fn unindent(&mut self) {
        self.events.push("unindent".to_string());
    }

    fn new_line(&mut self) {
        self.events.push("newline".to_string());
    }

    fn write_comment(&mut self, kind: CommentKind, content: &str, _refs: &[CommentRef]) {
        self.events.push(format!("comment[{:?}]:{}", kind, content));
    }

    fn write_directive(&mut self, kind: DirectiveKind, argument: &str) {
        self.events.push(format!("directive[{}]:{}", kind, argument));
    }

    fn debug_start(&mut self, node: &dyn AstNode, _start: Option<TextLocation>) {
        self.events.push(format!("debug-start:{}", node.node_type()));
    }

    fn debug_hidden(&mut self, node: Option<&dyn AstNode>) {
        let name = node.map(|n| n.node_type().to_string()).unwrap_or_default();
        self.events.push(format!("debug-hidden:{}", name));
    }

    fn debug_expression(&mut self, node: &dyn AstNode) {
        self.events
            .push(format!("debug-expression:{}", node.node_type()));
    }

    fn debug_end(&mut self, node: &dyn AstNode, _end: Option<TextLocation>) {
        self.events.push(format!("debug-end:{}", node.node_type()));
    }
}
