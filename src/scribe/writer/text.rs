//! The terminal writer: serializes tokens to a character buffer
//!
//! `TextTokenWriter` is the only component of a pipeline that appends
//! characters. It tracks indentation depth and the current output
//! coordinate; indentation is written lazily, just before the first token
//! of each line, so blank lines stay blank.

use crate::scribe::ast::AstNode;
use crate::scribe::location::TextLocation;
use crate::scribe::token::{PrimitiveValue, SlotTag, TokenKind};
use crate::scribe::trivia::{CommentKind, CommentRef, DirectiveKind};
use crate::scribe::writer::TokenWriter;

/// A [`TokenWriter`] that accumulates rendered text into a `String`
pub struct TextTokenWriter {
    buf: String,
    indentation: String,
    indent_depth: usize,
    node_depth: usize,
    needs_indent: bool,
    line: usize,
    column: usize,
}

impl TextTokenWriter {
    /// A writer with the default indentation unit (one tab)
    pub fn new() -> Self {
        Self::with_indentation("\t")
    }

    /// A writer using `unit` for each level of indentation
    pub fn with_indentation(unit: impl Into<String>) -> Self {
        Self {
            buf: String::new(),
            indentation: unit.into(),
            indent_depth: 0,
            node_depth: 0,
            needs_indent: false,
            line: 1,
            column: 1,
        }
    }

    /// The text rendered so far
    pub fn text(&self) -> &str {
        &self.buf
    }

    /// Consume the writer and return the rendered text
    pub fn into_string(self) -> String {
        assert_eq!(
            self.node_depth, 0,
            "rendering pass ended with {} unclosed node(s)",
            self.node_depth
        );
        self.buf
    }

    fn indent_width(&self) -> usize {
        self.indentation.chars().count()
    }

    /// Append raw text, keeping the line/column counters current.
    /// Multi-line content (block comments) advances the line counter.
    fn push_raw(&mut self, s: &str) {
        for (i, segment) in s.split('\n').enumerate() {
            if i > 0 {
                self.line += 1;
                self.column = 1;
            }
            self.column += segment.chars().count();
        }
        self.buf.push_str(s);
    }

    /// Append a token, writing pending indentation first
    fn push_token(&mut self, s: &str) {
        if self.needs_indent {
            self.needs_indent = false;
            for _ in 0..self.indent_depth {
                self.buf.push_str(&self.indentation);
            }
            self.column += self.indent_depth * self.indent_width();
        }
        self.push_raw(s);
    }
}

impl Default for TextTokenWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenWriter for TextTokenWriter {
    fn start_node(&mut self, _node: &dyn AstNode) {
        self.node_depth += 1;
    }

    fn end_node(&mut self, _node: &dyn AstNode) {
        assert!(
            self.node_depth > 0,
            "end_node without a matching start_node"
        );
        self.node_depth -= 1;
    }

    fn write_identifier(&mut self, name: &str, _kind: TokenKind) {
        self.push_token(name);
    }

    fn write_keyword(&mut self, _slot: SlotTag<'_>, keyword: &str) {
        self.push_token(keyword);
    }

    fn write_token(&mut self, _slot: SlotTag<'_>, token: &str, _kind: TokenKind) {
        self.push_token(token);
    }

    fn write_primitive_value(
        &mut self,
        value: &PrimitiveValue,
        _kind: Option<TokenKind>,
        literal: Option<&str>,
    ) {
        match literal {
            Some(text) => self.push_token(text),
            None => self.push_token(&value.default_text()),
        }
    }

    fn write_primitive_type(&mut self, name: &str) {
        self.push_token(name);
    }

    fn space(&mut self) {
        self.push_token(" ");
    }

    fn indent(&mut self) {
        self.indent_depth += 1;
    }

    fn unindent(&mut self) {
        assert!(self.indent_depth > 0, "unindent without a matching indent");
        self.indent_depth -= 1;
    }

    fn new_line(&mut self) {
        self.buf.push('\n');
        self.line += 1;
        self.column = 1;
        self.needs_indent = true;
    }

    fn write_comment(&mut self, kind: CommentKind, content: &str, _refs: &[CommentRef]) {
        match kind {
            CommentKind::Line => {
                self.push_token("//");
                self.push_raw(content);
            }
            CommentKind::Documentation => {
                self.push_token("///");
                self.push_raw(content);
            }
            CommentKind::Block => {
                self.push_token("/*");
                self.push_raw(content);
                self.push_raw("*/");
            }
        }
    }

    fn write_directive(&mut self, kind: DirectiveKind, argument: &str) {
        self.push_token(&format!("#{}", kind.keyword()));
        if !argument.is_empty() {
            self.push_raw(" ");
            self.push_raw(argument);
        }
    }

    fn location(&self) -> Option<TextLocation> {
        let pending = if self.needs_indent {
            self.indent_depth * self.indent_width()
        } else {
            0
        };
        Some(TextLocation::new(self.line, self.column + pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scribe::trivia::CommentKind;

    fn kw(w: &mut TextTokenWriter, text: &str) {
        w.write_keyword(SlotTag::NONE, text);
    }

    #[test]
    fn test_plain_tokens_concatenate() {
        let mut w = TextTokenWriter::new();
        kw(&mut w, "if");
        w.space();
        w.write_identifier("ready", TokenKind::Identifier);
        assert_eq!(w.text(), "if ready");
    }

    #[test]
    fn test_indentation_is_lazy() {
        let mut w = TextTokenWriter::with_indentation("    ");
        kw(&mut w, "loop");
        w.indent();
        w.new_line();
        // A blank line carries no indentation
        w.new_line();
        w.write_identifier("body", TokenKind::Identifier);
        w.unindent();
        assert_eq!(w.text(), "loop\n\n    body");
    }

    #[test]
    fn test_location_tracks_lines_and_columns() {
        let mut w = TextTokenWriter::new();
        assert_eq!(w.location(), Some(TextLocation::new(1, 1)));

        kw(&mut w, "let");
        assert_eq!(w.location(), Some(TextLocation::new(1, 4)));

        w.new_line();
        assert_eq!(w.location(), Some(TextLocation::new(2, 1)));
    }

    #[test]
    fn test_location_accounts_for_pending_indentation() {
        let mut w = TextTokenWriter::with_indentation("  ");
        w.indent();
        w.indent();
        w.new_line();
        // Next token will land after two 2-char units
        assert_eq!(w.location(), Some(TextLocation::new(2, 5)));
        w.write_identifier("x", TokenKind::Identifier);
        assert_eq!(w.text(), "\n    x");
        assert_eq!(w.location(), Some(TextLocation::new(2, 6)));
    }

    #[test]
    fn test_block_comment_advances_lines() {
        let mut w = TextTokenWriter::new();
        w.write_comment(CommentKind::Block, " a\n b ", &[]);
        assert_eq!(w.text(), "/* a\n b */");
        assert_eq!(w.location(), Some(TextLocation::new(2, 6)));
    }

    #[test]
    fn test_comment_rendering() {
        let mut w = TextTokenWriter::new();
        w.write_comment(CommentKind::Line, " note", &[]);
        assert_eq!(w.text(), "// note");

        let mut w = TextTokenWriter::new();
        w.write_comment(CommentKind::Documentation, " api", &[]);
        assert_eq!(w.text(), "/// api");
    }

    #[test]
    fn test_directive_rendering() {
        let mut w = TextTokenWriter::new();
        w.write_directive(DirectiveKind::Region, "setup");
        assert_eq!(w.text(), "#region setup");

        let mut w = TextTokenWriter::new();
        w.write_directive(DirectiveKind::EndRegion, "");
        assert_eq!(w.text(), "#endregion");
    }

    #[test]
    fn test_primitive_literal_text_is_verbatim() {
        let mut w = TextTokenWriter::new();
        w.write_primitive_value(&PrimitiveValue::Int(255), None, Some("0xFF"));
        assert_eq!(w.text(), "0xFF");

        let mut w = TextTokenWriter::new();
        w.write_primitive_value(&PrimitiveValue::Int(255), None, None);
        assert_eq!(w.text(), "255");
    }

    #[test]
    #[should_panic(expected = "unindent without a matching indent")]
    fn test_unbalanced_unindent_panics() {
        let mut w = TextTokenWriter::new();
        w.unindent();
    }
}
