//! Tests for line classification and policy handling

use super::{skipping_options, strict_value_options};
use crate::Error;
use crate::app::models::Observation;
use crate::app::services::line_parser::parser::{
    LineParser, ParseOptions, ParsedLine, parse_line, parse_value,
};

#[test]
fn test_parse_simple_observation() {
    let options = ParseOptions::default();

    assert_eq!(
        parse_line("Hamburg;12.0", &options),
        ParsedLine::Observation(Observation::new("Hamburg", 12.0))
    );
    assert_eq!(
        parse_line("St. John's;-15.2", &options),
        ParsedLine::Observation(Observation::new("St. John's", -15.2))
    );
}

#[test]
fn test_parse_comment_lines() {
    let options = ParseOptions::default();

    assert_eq!(parse_line("# note", &options), ParsedLine::Comment);
    assert_eq!(parse_line("#Hamburg;12.0", &options), ParsedLine::Comment);
    // Only a leading prefix marks a comment
    assert_eq!(
        parse_line("Ham#burg;1.0", &options),
        ParsedLine::Observation(Observation::new("Ham#burg", 1.0))
    );
}

#[test]
fn test_parse_strips_carriage_return() {
    let options = ParseOptions::default();

    assert_eq!(
        parse_line("Oslo;3.5\r", &options),
        ParsedLine::Observation(Observation::new("Oslo", 3.5))
    );
}

#[test]
fn test_parse_ignores_extra_fields() {
    let options = ParseOptions::default();

    assert_eq!(
        parse_line("Oslo;3.5;extra;fields", &options),
        ParsedLine::Observation(Observation::new("Oslo", 3.5))
    );
}

#[test]
fn test_parse_malformed_shapes() {
    let options = ParseOptions::default();

    assert_eq!(parse_line("no delimiter here", &options), ParsedLine::Malformed);
    assert_eq!(parse_line("", &options), ParsedLine::Malformed);
    assert_eq!(parse_line(";4.0", &options), ParsedLine::Malformed);
}

#[test]
fn test_parse_invalid_value_defaults_to_zero() {
    let options = ParseOptions::default();

    assert_eq!(
        parse_line("Oslo;warm", &options),
        ParsedLine::Observation(Observation::defaulted("Oslo"))
    );
    assert_eq!(
        parse_line("Oslo;", &options),
        ParsedLine::Observation(Observation::defaulted("Oslo"))
    );
}

#[test]
fn test_parse_custom_delimiter() {
    let options = ParseOptions {
        delimiter: ',',
        ..ParseOptions::default()
    };

    assert_eq!(
        parse_line("Lima,22.4", &options),
        ParsedLine::Observation(Observation::new("Lima", 22.4))
    );
    assert_eq!(parse_line("Lima;22.4", &options), ParsedLine::Malformed);
}

#[test]
fn test_parse_value_formats() {
    assert_eq!(parse_value("1.0"), Some(1.0));
    assert_eq!(parse_value("-5.5"), Some(-5.5));
    assert_eq!(parse_value("42"), Some(42.0));
    assert_eq!(parse_value("0.25"), Some(0.25));
    assert_eq!(parse_value("abc"), None);
    assert_eq!(parse_value(""), None);
    assert_eq!(parse_value(" 1.0"), None);
}

#[test]
fn test_parse_value_rejects_non_finite() {
    assert_eq!(parse_value("nan"), None);
    assert_eq!(parse_value("NaN"), None);
    assert_eq!(parse_value("inf"), None);
    assert_eq!(parse_value("-infinity"), None);
    assert_eq!(parse_value("1e50"), None);
    assert_eq!(parse_value("3.4e38"), Some(3.4e38));
}

#[test]
fn test_line_parser_counts_lines() {
    let mut parser = LineParser::new(ParseOptions::default());

    assert!(parser.parse(1, "# header").unwrap().is_none());
    assert_eq!(
        parser.parse(2, "A;1.0").unwrap(),
        Some(Observation::new("A", 1.0))
    );
    assert!(parser.parse(3, "B;oops").unwrap().is_some());

    let stats = parser.stats();
    assert_eq!(stats.lines_read, 3);
    assert_eq!(stats.comments, 1);
    assert_eq!(stats.observations, 2);
    assert_eq!(stats.values_defaulted, 1);
    assert_eq!(stats.malformed_skipped, 0);
}

#[test]
fn test_line_parser_fails_on_malformed_by_default() {
    let mut parser = LineParser::new(ParseOptions::default());

    let result = parser.parse(7, "missing-delimiter");
    match result {
        Err(Error::MalformedLine { line_number, line }) => {
            assert_eq!(line_number, 7);
            assert_eq!(line, "missing-delimiter");
        }
        other => panic!("expected malformed line error, got {:?}", other),
    }
}

#[test]
fn test_line_parser_skips_malformed_when_configured() {
    let mut parser = LineParser::new(skipping_options());

    assert!(parser.parse(1, "missing-delimiter").unwrap().is_none());
    assert!(parser.parse(2, "").unwrap().is_none());
    assert!(parser.parse(3, "A;2.0").unwrap().is_some());

    let stats = parser.into_stats();
    assert_eq!(stats.malformed_skipped, 2);
    assert_eq!(stats.observations, 1);
    assert!(stats.has_issues());
}

#[test]
fn test_line_parser_rejects_invalid_values_when_configured() {
    let mut parser = LineParser::new(strict_value_options());

    match parser.parse(4, "Oslo;warm;x") {
        Err(Error::InvalidValue { line_number, value }) => {
            assert_eq!(line_number, 4);
            assert_eq!(value, "warm");
        }
        other => panic!("expected invalid value error, got {:?}", other),
    }

    assert!(parser.parse(5, "Oslo;1.5").unwrap().is_some());
}

#[test]
fn test_line_parser_non_finite_values_follow_invalid_policy() {
    let mut parser = LineParser::new(ParseOptions::default());
    let observation = parser.parse(1, "A;nan").unwrap().unwrap();
    assert_eq!(observation.value, 0.0);
    assert!(observation.value_defaulted);
    assert_eq!(parser.stats().values_defaulted, 1);

    let mut strict = LineParser::new(strict_value_options());
    assert!(matches!(
        strict.parse(2, "A;inf"),
        Err(Error::InvalidValue { line_number: 2, .. })
    ));
}
