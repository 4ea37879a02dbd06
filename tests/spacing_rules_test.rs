//! Table-driven tests for the spacing decorator and rule configuration

use rstest::rstest;

use scribe::scribe::pipeline::{self, RenderConfig};
use scribe::scribe::spacing::{SpaceRequirement, SpacingRules};
use scribe::scribe::token::{SlotTag, TokenKind};
use scribe::scribe::writer::{SpacingWriter, TextTokenWriter, TokenWriter};

fn render_pair(prev: (TokenKind, &str), next: (TokenKind, &str)) -> String {
    let mut writer = SpacingWriter::new(TextTokenWriter::new());
    writer.write_token(SlotTag::NONE, prev.1, prev.0);
    writer.write_token(SlotTag::NONE, next.1, next.0);
    writer.into_inner().into_string()
}

#[rstest]
// Word-like pairs must not glue
#[case((TokenKind::Keyword, "return"), (TokenKind::Identifier, "x"), "return x")]
#[case((TokenKind::Keyword, "else"), (TokenKind::Keyword, "if"), "else if")]
#[case((TokenKind::Identifier, "a"), (TokenKind::Identifier, "b"), "a b")]
#[case((TokenKind::Number, "1"), (TokenKind::Identifier, "e"), "1 e")]
#[case((TokenKind::Identifier, "x"), (TokenKind::Number, "2"), "x 2")]
// Punctuation binds tight
#[case((TokenKind::Identifier, "f"), (TokenKind::Brace, "("), "f(")]
#[case((TokenKind::Brace, ")"), (TokenKind::Operator, ";"), ");")]
#[case((TokenKind::Identifier, "a"), (TokenKind::Operator, "+"), "a+")]
#[case((TokenKind::Operator, "+"), (TokenKind::Identifier, "b"), "+b")]
// Operator pairs that would lex as one longer token
#[case((TokenKind::Operator, "-"), (TokenKind::Operator, "-"), "- -")]
#[case((TokenKind::Operator, "+"), (TokenKind::Operator, "+"), "+ +")]
#[case((TokenKind::Operator, "<"), (TokenKind::Operator, "<"), "< <")]
#[case((TokenKind::Operator, "/"), (TokenKind::Operator, "*"), "/ *")]
// Distinct operators that cannot glue
#[case((TokenKind::Operator, "*"), (TokenKind::Operator, "+"), "*+")]
fn adjacent_pair_renders(
    #[case] prev: (TokenKind, &str),
    #[case] next: (TokenKind, &str),
    #[case] expected: &str,
) {
    assert_eq!(render_pair(prev, next), expected);
}

#[test]
fn custom_table_loads_from_yaml() {
    let yaml = "\
- prev_kind: brace
  prev_text: ')'
  next_kind: brace
  next_text: '{'
  require: mandatory
- prev_kind: keyword
  prev_text: return
  next_kind: identifier
  require: forbidden
";
    let rules = SpacingRules::from_yaml(yaml).unwrap();
    assert_eq!(rules.rules().len(), 2);

    let config = RenderConfig {
        spacing: rules,
        ..RenderConfig::default()
    };
    let mut writer = pipeline::plain(config);
    writer.write_token_brace(SlotTag::NONE, ")");
    writer.write_token_brace(SlotTag::NONE, "{");
    writer.write_keyword(SlotTag::NONE, "return");
    writer.write_identifier("x", TokenKind::Identifier);

    // The custom rules both fire: mandatory between ){ and the forbidden
    // override suppressing the word-like fallback after return
    assert_eq!(writer.finish(), ") {returnx");
}

#[test]
fn lookup_reports_requirements_directly() {
    let rules = SpacingRules::default();
    assert_eq!(
        rules.lookup(TokenKind::Keyword, "return", TokenKind::Identifier, "x"),
        SpaceRequirement::Mandatory
    );
    assert_eq!(
        rules.lookup(TokenKind::Brace, "(", TokenKind::Identifier, "x"),
        SpaceRequirement::Optional
    );
}

#[test]
fn spacing_state_survives_nested_nodes() {
    use scribe::scribe::testing::TestNode;

    // The space between "return" and "x" crosses a node boundary: the
    // keyword belongs to the parent, the identifier to the child
    let tree = TestNode::new(1, "Return")
        .keyword("return")
        .child(TestNode::new(2, "Name").identifier("x"));

    let mut writer = pipeline::plain(RenderConfig::default());
    tree.walk(&mut writer);
    assert_eq!(writer.finish(), "return x");
}
