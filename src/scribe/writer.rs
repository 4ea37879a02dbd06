//! The token sink contract and its implementations
//!
//! [`TokenWriter`] is the destination every renderer and decorator
//! implements. An external walker visits the tree depth-first and calls
//! these operations in tree order; decorators intercept, possibly augment,
//! and forward to their inner writer; only the terminal
//! [`TextTokenWriter`](text::TextTokenWriter) appends characters.

pub mod forwarding;
pub mod locating;
pub mod spacing;
pub mod text;
pub mod trivia;

pub use self::forwarding::ForwardingWriter;
pub use self::locating::{LocatingWriter, NodeSpan, SpanTable};
pub use self::spacing::SpacingWriter;
pub use self::text::TextTokenWriter;
pub use self::trivia::{FlushRegistry, TriviaWriter};

use super::ast::AstNode;
use super::location::TextLocation;
use super::token::{PrimitiveValue, SlotTag, TokenKind};
use super::trivia::{CommentKind, CommentRef, DirectiveKind};

/// The abstract destination for rendered lexical output
///
/// All operations are commands; only [`location`](TokenWriter::location)
/// reports back. Contract obligations on the caller:
///
/// - `start_node`/`end_node` bracket each subtree and must balance in
///   tree order (pre/post-order visit).
/// - `indent`/`unindent` must nest; an `unindent` with no prior `indent`
///   is a programming error and panics in the terminal writer.
///
/// The `debug_*` hooks and `location` have defaults so a sink that does
/// not care about debug mapping or coordinates implements nothing extra.
pub trait TokenWriter {
    /// Begin a subtree
    fn start_node(&mut self, node: &dyn AstNode);

    /// End the most recently started subtree
    fn end_node(&mut self, node: &dyn AstNode);

    /// Write an identifier token
    fn write_identifier(&mut self, name: &str, kind: TokenKind);

    /// Write a keyword token
    fn write_keyword(&mut self, slot: SlotTag<'_>, keyword: &str);

    /// Write a generic token classified by `kind`
    fn write_token(&mut self, slot: SlotTag<'_>, token: &str, kind: TokenKind);

    /// Write a primitive literal
    ///
    /// `literal` is used verbatim when supplied (a literal printed in a
    /// non-default base or suffix form); otherwise the writer derives the
    /// text from `value`. `kind` overrides the value's default
    /// classification for spacing purposes.
    fn write_primitive_value(
        &mut self,
        value: &PrimitiveValue,
        kind: Option<TokenKind>,
        literal: Option<&str>,
    );

    /// Write a primitive type name (renders as a keyword)
    fn write_primitive_type(&mut self, name: &str);

    /// Write a single explicit space
    fn space(&mut self);

    /// Increase the indentation depth
    fn indent(&mut self);

    /// Decrease the indentation depth
    fn unindent(&mut self);

    /// End the current line; indentation is emitted lazily before the
    /// next token
    fn new_line(&mut self);

    /// Write a comment
    fn write_comment(&mut self, kind: CommentKind, content: &str, refs: &[CommentRef]);

    /// Write a preprocessor directive
    fn write_directive(&mut self, kind: DirectiveKind, argument: &str);

    /// Debug-mapping hook: a debuggable region starts at `node`
    fn debug_start(&mut self, _node: &dyn AstNode, _start: Option<TextLocation>) {}

    /// Debug-mapping hook: `node` produces no user-visible code
    fn debug_hidden(&mut self, _node: Option<&dyn AstNode>) {}

    /// Debug-mapping hook: `node` is an expression-level sequence point
    fn debug_expression(&mut self, _node: &dyn AstNode) {}

    /// Debug-mapping hook: the region started at `node` ends
    fn debug_end(&mut self, _node: &dyn AstNode, _end: Option<TextLocation>) {}

    /// The coordinate the next character would land at, if this writer
    /// (or anything it wraps) can tell; `None` means unknown.
    ///
    /// This doubles as the locatable capability probe: compositions that
    /// require coordinates check it at construction time.
    fn location(&self) -> Option<TextLocation> {
        None
    }

    /// [`write_token`](TokenWriter::write_token) pre-filled with [`TokenKind::Operator`]
    fn write_token_operator(&mut self, slot: SlotTag<'_>, token: &str) {
        self.write_token(slot, token, TokenKind::Operator);
    }

    /// [`write_token`](TokenWriter::write_token) pre-filled with [`TokenKind::Brace`]
    fn write_token_brace(&mut self, slot: SlotTag<'_>, token: &str) {
        self.write_token(slot, token, TokenKind::Brace);
    }

    /// [`write_token`](TokenWriter::write_token) pre-filled with [`TokenKind::Number`]
    fn write_token_number(&mut self, slot: SlotTag<'_>, token: &str) {
        self.write_token(slot, token, TokenKind::Number);
    }
}
