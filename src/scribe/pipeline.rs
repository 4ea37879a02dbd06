//! Pipeline factory: the supported writer compositions
//!
//! A pipeline is constructed once per rendering pass and discarded when
//! the walk completes. The nesting order is fixed — trivia outermost,
//! then spacing, then (optionally) location recording around the terminal
//! writer — so trivia participate in spacing and location capture sees
//! exactly the characters that reach the buffer.

use std::error::Error;
use std::fmt;

use tracing::debug;

use super::spacing::SpacingRules;
use super::writer::{
    LocatingWriter, SpacingWriter, SpanTable, TextTokenWriter, TokenWriter, TriviaWriter,
};

/// Configuration shared by all compositions
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// The indentation unit written per depth level
    pub indentation: String,
    /// The pairwise spacing rule table
    pub spacing: SpacingRules,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indentation: "\t".to_string(),
            spacing: SpacingRules::default(),
        }
    }
}

/// Construction-time configuration errors
#[derive(Debug)]
pub enum PipelineError {
    /// The wrap-existing composition was requested over a writer that
    /// cannot report output coordinates
    NotLocatable,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NotLocatable => {
                write!(f, "wrapped writer does not provide output locations")
            }
        }
    }
}

impl Error for PipelineError {}

/// The plain composition: trivia, spacing, text
pub type PlainWriter = TriviaWriter<SpacingWriter<TextTokenWriter>>;

/// The capturing composition: trivia, spacing, location recording, text
pub type CapturingWriter = TriviaWriter<SpacingWriter<LocatingWriter<TextTokenWriter>>>;

/// Build the plain rendering composition
pub fn plain(config: RenderConfig) -> PlainWriter {
    debug!(indentation = ?config.indentation, "constructing plain pipeline");
    let text = TextTokenWriter::with_indentation(config.indentation);
    TriviaWriter::new(SpacingWriter::with_rules(text, config.spacing))
}

/// Build the capturing composition; the returned [`SpanTable`] fills with
/// per-node output spans as the tree is walked
pub fn capturing(config: RenderConfig) -> (CapturingWriter, SpanTable) {
    debug!(indentation = ?config.indentation, "constructing capturing pipeline");
    let text = TextTokenWriter::with_indentation(config.indentation);
    let locating = LocatingWriter::new(text);
    let spans = locating.spans();
    let writer = TriviaWriter::new(SpacingWriter::with_rules(locating, config.spacing));
    (writer, spans)
}

/// Wrap a pre-existing writer with location capture
///
/// Fails before any token is written if `writer` cannot report output
/// coordinates, since the recording layer would only ever capture
/// unknowns.
pub fn locating<W: TokenWriter>(
    writer: W,
    config: RenderConfig,
) -> Result<(TriviaWriter<SpacingWriter<LocatingWriter<W>>>, SpanTable), PipelineError> {
    if writer.location().is_none() {
        return Err(PipelineError::NotLocatable);
    }
    debug!("constructing locating pipeline over existing writer");
    let locating = LocatingWriter::new(writer);
    let spans = locating.spans();
    let wrapped = TriviaWriter::new(SpacingWriter::with_rules(locating, config.spacing));
    Ok((wrapped, spans))
}

impl TriviaWriter<SpacingWriter<TextTokenWriter>> {
    /// Tear down a plain composition and return the rendered text
    pub fn finish(self) -> String {
        self.into_inner().into_inner().into_string()
    }
}

impl TriviaWriter<SpacingWriter<LocatingWriter<TextTokenWriter>>> {
    /// Tear down a capturing composition and return the rendered text;
    /// the span table handle stays valid
    pub fn finish(self) -> String {
        self.into_inner().into_inner().into_inner().into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scribe::ast::NodeId;
    use crate::scribe::testing::{RecordingWriter, TestNode};
    use crate::scribe::trivia::Comment;

    #[test]
    fn test_plain_composition_renders() {
        let tree = TestNode::new(1, "Return")
            .leading_comment(Comment::line(" exit early"))
            .keyword("return")
            .identifier("x")
            .operator(";");

        let mut writer = plain(RenderConfig::default());
        tree.walk(&mut writer);

        assert_eq!(writer.finish(), "// exit early\nreturn x;");
    }

    #[test]
    fn test_capturing_composition_records_spans() {
        let tree = TestNode::new(1, "Return")
            .keyword("return")
            .child(TestNode::new(2, "Name").identifier("x"));

        let (mut writer, spans) = capturing(RenderConfig::default());
        tree.walk(&mut writer);
        let text = writer.finish();

        assert_eq!(text, "return x");
        assert_eq!(spans.len(), 2);
        let parent = spans.get(NodeId(1)).unwrap().text_span().unwrap();
        let child = spans.get(NodeId(2)).unwrap().text_span().unwrap();
        assert!(parent.encloses(child));
    }

    #[test]
    fn test_locating_requires_a_locatable_writer() {
        let result = locating(RecordingWriter::new(), RenderConfig::default());
        assert!(matches!(result, Err(PipelineError::NotLocatable)));
    }

    #[test]
    fn test_locating_accepts_the_text_writer() {
        let tree = TestNode::new(1, "Name").identifier("x");

        let (mut writer, spans) =
            locating(TextTokenWriter::new(), RenderConfig::default()).unwrap();
        tree.walk(&mut writer);

        assert!(spans.get(NodeId(1)).unwrap().text_span().is_some());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PipelineError::NotLocatable.to_string(),
            "wrapped writer does not provide output locations"
        );
    }
}
