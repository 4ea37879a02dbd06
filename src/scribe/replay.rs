//! Serialized sink-call scripts
//!
//! A script is a JSON array of writer operations — the call trace an
//! output visitor would produce — with node declarations inlined on the
//! `start_node` entries. Scripts exist so the CLI (and tests) can drive a
//! pipeline end-to-end without a language front end; they are tooling
//! surface, not a tree model. Loading validates that `start_node` and
//! `end_node` balance before anything is replayed.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ast::{AstNode, NodeId};
use super::token::{PrimitiveValue, SlotTag, TokenKind};
use super::trivia::{
    Anchor, Comment, CommentKind, Directive, DirectiveKind, Trivia, TriviaId,
};
use super::writer::TokenWriter;

/// A trivium declared inline on a script node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriviaSpec {
    Comment {
        anchor: Anchor,
        kind: CommentKind,
        text: String,
    },
    Directive {
        anchor: Anchor,
        kind: DirectiveKind,
        #[serde(default)]
        argument: String,
    },
}

/// One writer operation in a script
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SinkOp {
    StartNode {
        id: u64,
        #[serde(default)]
        node_type: String,
        #[serde(default)]
        trivia: Vec<TriviaSpec>,
    },
    EndNode {
        id: u64,
    },
    Identifier {
        text: String,
    },
    Keyword {
        text: String,
    },
    Token {
        text: String,
        kind: TokenKind,
    },
    Primitive {
        value: PrimitiveValue,
        #[serde(default)]
        kind: Option<TokenKind>,
        #[serde(default)]
        literal: Option<String>,
    },
    PrimitiveType {
        name: String,
    },
    Space,
    Indent,
    Unindent,
    NewLine,
    Comment {
        kind: CommentKind,
        text: String,
    },
    Directive {
        kind: DirectiveKind,
        #[serde(default)]
        argument: String,
    },
}

/// Errors raised while loading a script
#[derive(Debug)]
pub enum ScriptError {
    /// The script file could not be read
    Io(std::io::Error),
    /// The script is not valid JSON for the operation format
    Json(serde_json::Error),
    /// `start_node`/`end_node` do not balance in tree order
    Unbalanced { id: u64 },
    /// An `end_node` references a node never started
    UnknownNode { id: u64 },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(err) => write!(f, "cannot read script: {}", err),
            ScriptError::Json(err) => write!(f, "cannot parse script: {}", err),
            ScriptError::Unbalanced { id } => {
                write!(f, "unbalanced start_node/end_node at node {}", id)
            }
            ScriptError::UnknownNode { id } => {
                write!(f, "end_node references undeclared node {}", id)
            }
        }
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScriptError::Io(err) => Some(err),
            ScriptError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(err: std::io::Error) -> Self {
        ScriptError::Io(err)
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        ScriptError::Json(err)
    }
}

/// A node materialized from a script's `start_node` declaration
#[derive(Debug)]
struct ScriptNode {
    id: NodeId,
    node_type: String,
    trivia: Vec<Trivia>,
}

impl AstNode for ScriptNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> &str {
        &self.node_type
    }

    fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }
}

/// A validated, replayable script
#[derive(Debug)]
pub struct Script {
    ops: Vec<SinkOp>,
    nodes: HashMap<u64, ScriptNode>,
}

impl Script {
    /// Parse and validate a script from JSON text
    pub fn parse(json: &str) -> Result<Self, ScriptError> {
        let ops: Vec<SinkOp> = serde_json::from_str(json)?;

        let mut nodes = HashMap::new();
        let mut open: Vec<u64> = Vec::new();
        let mut next_trivia_id = 0u64;

        for op in &ops {
            match op {
                SinkOp::StartNode {
                    id,
                    node_type,
                    trivia,
                } => {
                    open.push(*id);
                    nodes.entry(*id).or_insert_with(|| {
                        let trivia = trivia
                            .iter()
                            .map(|spec| {
                                let trivia_id = TriviaId(next_trivia_id);
                                next_trivia_id += 1;
                                materialize(spec, trivia_id)
                            })
                            .collect();
                        ScriptNode {
                            id: NodeId(*id),
                            node_type: node_type.clone(),
                            trivia,
                        }
                    });
                }
                SinkOp::EndNode { id } => {
                    if !nodes.contains_key(id) {
                        return Err(ScriptError::UnknownNode { id: *id });
                    }
                    match open.pop() {
                        Some(top) if top == *id => {}
                        _ => return Err(ScriptError::Unbalanced { id: *id }),
                    }
                }
                _ => {}
            }
        }

        if let Some(id) = open.pop() {
            return Err(ScriptError::Unbalanced { id });
        }

        debug!(ops = ops.len(), nodes = nodes.len(), "loaded script");
        Ok(Self { ops, nodes })
    }

    /// Load and validate a script file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The number of operations in the script
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Feed every operation to `writer` in script order
    pub fn replay<W: TokenWriter>(&self, writer: &mut W) {
        for op in &self.ops {
            match op {
                SinkOp::StartNode { id, .. } => writer.start_node(&self.nodes[id]),
                SinkOp::EndNode { id } => writer.end_node(&self.nodes[id]),
                SinkOp::Identifier { text } => {
                    writer.write_identifier(text, TokenKind::Identifier)
                }
                SinkOp::Keyword { text } => writer.write_keyword(SlotTag::NONE, text),
                SinkOp::Token { text, kind } => writer.write_token(SlotTag::NONE, text, *kind),
                SinkOp::Primitive {
                    value,
                    kind,
                    literal,
                } => writer.write_primitive_value(value, *kind, literal.as_deref()),
                SinkOp::PrimitiveType { name } => writer.write_primitive_type(name),
                SinkOp::Space => writer.space(),
                SinkOp::Indent => writer.indent(),
                SinkOp::Unindent => writer.unindent(),
                SinkOp::NewLine => writer.new_line(),
                SinkOp::Comment { kind, text } => writer.write_comment(*kind, text, &[]),
                SinkOp::Directive { kind, argument } => writer.write_directive(*kind, argument),
            }
        }
    }
}

fn materialize(spec: &TriviaSpec, id: TriviaId) -> Trivia {
    match spec {
        TriviaSpec::Comment { anchor, kind, text } => {
            Trivia::comment(id, *anchor, Comment::new(*kind, text.clone()))
        }
        TriviaSpec::Directive {
            anchor,
            kind,
            argument,
        } => Trivia::directive(id, *anchor, Directive::new(*kind, argument.clone())),
    }
}
