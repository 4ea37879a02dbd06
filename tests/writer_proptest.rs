//! Property-based tests for the rendering pipeline

use proptest::prelude::*;

use scribe::scribe::pipeline::{self, RenderConfig};
use scribe::scribe::testing::TestNode;
use scribe::scribe::token::TokenKind;
use scribe::scribe::writer::{TextTokenWriter, TokenWriter};

proptest! {
    /// However the walker interleaves word-like tokens, the rendered
    /// output splits back into exactly the tokens that went in: the
    /// spacing decorator never lets two of them glue.
    #[test]
    fn word_tokens_never_glue(words in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
        let mut writer = pipeline::plain(RenderConfig::default());
        for word in &words {
            writer.write_identifier(word, TokenKind::Identifier);
        }
        let output = writer.finish();

        let rendered: Vec<&str> = output.split_whitespace().collect();
        prop_assert_eq!(rendered, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Indentation tracks depth exactly: after n indents, the first
    /// token of a fresh line is preceded by n units.
    #[test]
    fn indentation_matches_depth(depth in 0usize..10) {
        let mut writer = TextTokenWriter::with_indentation("\t");
        for _ in 0..depth {
            writer.indent();
        }
        writer.new_line();
        writer.write_identifier("x", TokenKind::Identifier);
        for _ in 0..depth {
            writer.unindent();
        }

        let output = writer.into_string();
        let line = output.strip_prefix('\n').unwrap();
        prop_assert_eq!(line.chars().take_while(|c| *c == '\t').count(), depth);
        prop_assert!(line.ends_with('x'));
    }

    /// Walking any two-level tree records exactly one span per node and
    /// sibling spans stay in emission order.
    #[test]
    fn sibling_spans_stay_ordered(names in proptest::collection::vec("[a-z]{1,6}", 1..8)) {
        let mut tree = TestNode::new(1, "Block");
        for (i, name) in names.iter().enumerate() {
            // Test nodes borrow 'static names; leak the handful used here
            let name: &'static str = Box::leak(name.clone().into_boxed_str());
            tree = tree.child(
                TestNode::new(2 + i as u64, "Stmt")
                    .identifier(name)
                    .newline(),
            );
        }

        let (mut writer, spans) = pipeline::capturing(RenderConfig::default());
        tree.walk(&mut writer);
        writer.finish();

        prop_assert_eq!(spans.len(), names.len() + 1);

        let entries = spans.entries();
        // Entry 0 is the parent; children follow in id = emission order
        for pair in entries[1..].windows(2) {
            let (_, a) = pair[0];
            let (_, b) = pair[1];
            prop_assert!(a.end.unwrap() <= b.start.unwrap());
        }
    }
}
