//! Comments and preprocessor directives anchored to tree positions
//!
//! Trivia are not part of the primary token stream: the tree keeps them
//! attached to nodes, anchored relative to the node's own tokens, and the
//! trivia decorator re-inserts them at the matching point of the output.
//! Each trivium carries an id that is unique within one rendering pass so
//! the flush registry can guarantee exactly-once emission.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    Line,
    Block,
    Documentation,
}

/// A structured reference embedded in a documentation comment,
/// e.g. a symbol cross-reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRef {
    /// Byte offset of the reference within the comment content
    pub offset: usize,
    /// Byte length of the referenced text
    pub length: usize,
    /// Resolved target name, if resolution happened upstream
    #[serde(default)]
    pub target: Option<String>,
}

/// A comment attached to a tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub content: String,
    #[serde(default)]
    pub refs: Vec<CommentRef>,
}

impl Comment {
    pub fn new(kind: CommentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            refs: Vec::new(),
        }
    }

    pub fn line(content: impl Into<String>) -> Self {
        Self::new(CommentKind::Line, content)
    }

    pub fn block(content: impl Into<String>) -> Self {
        Self::new(CommentKind::Block, content)
    }

    pub fn documentation(content: impl Into<String>) -> Self {
        Self::new(CommentKind::Documentation, content)
    }

    pub fn with_refs(mut self, refs: Vec<CommentRef>) -> Self {
        self.refs = refs;
        self
    }
}

/// The kind of a preprocessor directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    If,
    Elif,
    Else,
    EndIf,
    Define,
    Undef,
    Region,
    EndRegion,
    Error,
    Warning,
    Pragma,
    Line,
}

impl DirectiveKind {
    /// The directive keyword as it appears after the `#` marker
    pub fn keyword(self) -> &'static str {
        match self {
            DirectiveKind::If => "if",
            DirectiveKind::Elif => "elif",
            DirectiveKind::Else => "else",
            DirectiveKind::EndIf => "endif",
            DirectiveKind::Define => "define",
            DirectiveKind::Undef => "undef",
            DirectiveKind::Region => "region",
            DirectiveKind::EndRegion => "endregion",
            DirectiveKind::Error => "error",
            DirectiveKind::Warning => "warning",
            DirectiveKind::Pragma => "pragma",
            DirectiveKind::Line => "line",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.keyword())
    }
}

/// A preprocessor directive attached to a tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub kind: DirectiveKind,
    #[serde(default)]
    pub argument: String,
}

impl Directive {
    pub fn new(kind: DirectiveKind, argument: impl Into<String>) -> Self {
        Self {
            kind,
            argument: argument.into(),
        }
    }
}

/// Identifier for one trivium, unique within a rendering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriviaId(pub u64);

impl fmt::Display for TriviaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Where a trivium sits relative to its node's primary tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Before the node's first primary token
    Leading,
    /// After the node's last primary token
    Trailing,
}

/// The content of a trivium
#[derive(Debug, Clone, PartialEq)]
pub enum TriviaPayload {
    Comment(Comment),
    Directive(Directive),
}

/// One out-of-tree element anchored to a node
#[derive(Debug, Clone, PartialEq)]
pub struct Trivia {
    pub id: TriviaId,
    pub anchor: Anchor,
    pub payload: TriviaPayload,
}

impl Trivia {
    pub fn comment(id: TriviaId, anchor: Anchor, comment: Comment) -> Self {
        Self {
            id,
            anchor,
            payload: TriviaPayload::Comment(comment),
        }
    }

    pub fn directive(id: TriviaId, anchor: Anchor, directive: Directive) -> Self {
        Self {
            id,
            anchor,
            payload: TriviaPayload::Directive(directive),
        }
    }
}
