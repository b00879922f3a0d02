//! End-to-end parsing tests through the public API.

use cardsplit_core::{build, parse_document, Card, Error, GlobalSettings, ParseConfig, Parser};
use pretty_assertions::assert_eq;

fn config(strategy: &str) -> ParseConfig {
    ParseConfig {
        heading_level: Some(2),
        ..ParseConfig::new(strategy)
    }
}

fn cards(config: &ParseConfig, content: &str) -> Vec<Vec<String>> {
    Parser::new(config)
        .unwrap()
        .parse(content)
        .into_iter()
        .map(|card| card.fields)
        .collect()
}

#[test]
fn custom_delimiter_round_trip() {
    let config = ParseConfig {
        card_start: "<<".to_string(),
        field_separator: "||".to_string(),
        card_end: ">>".to_string(),
        ..config("custom-delimiter")
    };
    assert_eq!(cards(&config, "<<\nA\n||\nB\n>>"), vec![vec!["A", "B"]]);
}

#[test]
fn section_subsection_splits_at_first_deeper_heading() {
    assert_eq!(
        cards(&config("section-subsection"), "## Q1\nbody1\n### sub\nbody2"),
        vec![vec!["## Q1\nbody1", "### sub\nbody2"]]
    );
}

#[test]
fn regex_multiline_example() {
    let config = ParseConfig {
        regex: Some("^(.*)::(.*)$".to_string()),
        regex_flags: "m".to_string(),
        ..config("regex")
    };
    assert_eq!(
        cards(&config, "cat::animal\ndog::animal"),
        vec![vec!["cat", "animal"], vec!["dog", "animal"]]
    );
}

#[test]
fn single_delimiter_blank_line_ends_card() {
    let config = ParseConfig {
        single_separator: "--".to_string(),
        ..config("single-delimiter")
    };
    assert_eq!(
        cards(&config, "Q\n--\nA\n\nQ2\n--\nA2"),
        vec![vec!["Q", "A"], vec!["Q2", "A2"]]
    );
}

#[test]
fn single_field_cards_need_opt_in() {
    let doc = "## Lonely\n## Q\nA";
    assert_eq!(
        cards(&config("heading-paragraph"), doc),
        vec![vec!["## Q", "A"]]
    );

    let single = ParseConfig {
        allow_single_field: true,
        ..config("heading-paragraph")
    };
    assert_eq!(
        cards(&single, doc),
        vec![vec!["## Lonely"], vec!["## Q", "A"]]
    );
}

#[test]
fn multi_strategies_differ_only_in_heading_lines() {
    let doc = "# Deck\n## Cat\n### Front\nmeow\n### Back\npurr";
    assert_eq!(
        cards(&config("multi-subsection"), doc),
        vec![vec!["### Front\nmeow", "### Back\npurr"]]
    );
    assert_eq!(
        cards(&config("multi-subparagraph"), doc),
        vec![vec!["meow", "purr"]]
    );
}

#[test]
fn headings_inside_fences_are_not_boundaries() {
    let doc = "## Q\n```\n## not a card\n### not a field\n```\n### A\nanswer";
    assert_eq!(
        cards(&config("section-subsection"), doc),
        vec![vec![
            "## Q\n```\n## not a card\n### not a field\n```",
            "### A\nanswer"
        ]]
    );
}

#[test]
fn delimiters_inside_fences_are_not_boundaries() {
    let config = ParseConfig {
        card_start: "<<".to_string(),
        field_separator: "||".to_string(),
        card_end: ">>".to_string(),
        ..config("custom-delimiter")
    };
    let doc = "<<\nA\n```\n||\n>>\n```\n||\nB\n>>";
    assert_eq!(
        cards(&config, doc),
        vec![vec!["A\n```\n||\n>>\n```", "B"]]
    );
}

#[test]
fn html_breaks_join_lines_outside_code() {
    let config = ParseConfig {
        html_break: true,
        ..config("heading-paragraph")
    };
    let doc = "## Q\nline one\nline two\n```\ncode\n```";
    assert_eq!(
        cards(&config, doc),
        vec![vec!["## Q", "line one<br>\nline two<br>\n```\ncode\n```"]]
    );
}

#[test]
fn crlf_input_matches_lf_input() {
    let config = config("section-subsection");
    assert_eq!(
        cards(&config, "## Q\r\n### A\r\nanswer\r\n"),
        cards(&config, "## Q\n### A\nanswer\n")
    );
}

#[test]
fn parsing_is_deterministic() {
    let parser = Parser::new(&config("multi-subsection")).unwrap();
    let doc = "## C1\n### F1\na\n### F2\nb\n## C2\n### F1\nc\n### F2\nd";
    let first = parser.parse(doc);
    assert_eq!(first.len(), 2);
    for _ in 0..5 {
        assert_eq!(parser.parse(doc), first);
    }
}

#[test]
fn unknown_strategy_fails_at_build() {
    assert!(matches!(
        build("outline", &ParseConfig::default()),
        Err(Error::UnknownStrategy(name)) if name == "outline"
    ));
}

#[test]
fn document_block_selects_delimiter_strategy() {
    let doc = "\
```anki
parser: custom-delimiter
deck: Trivia
```
<!-- card start -->
What?
<!-- field separator -->
That.
<!-- card end -->";

    let result = parse_document(doc, &GlobalSettings::default()).unwrap();
    assert_eq!(result.deck, "Trivia");
    assert_eq!(result.cards, vec![Card::from_iter(["What?", "That."])]);
}

#[test]
fn document_output_serializes_cards_as_arrays() {
    let result = parse_document("## Q\n### A", &GlobalSettings::default()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["cards"], serde_json::json!([["## Q", "### A"]]));
    assert_eq!(json["tag"], "blue-star");
}
