#![allow(dead_code)]
//! Shared helpers for `docsearch-query` integration tests.

use docsearch_query::*;

pub fn parse_ok(input: &str) -> Vec<Token> {
    let result = parse_tokens(input);
    assert!(
        result.is_valid(),
        "unexpected parse errors for `{input}`: {:?}",
        result.errors
    );
    result.tokens
}

pub fn parse_errors(input: &str) -> Vec<ParseError> {
    parse_tokens(input).errors
}

pub fn build(input: &str) -> SearchQuery {
    build_search_query(&parse_ok(input), QueryOptions::default())
}

pub fn fts_is(token: &Token, expected: &str) {
    match token {
        Token::Fts { value } => assert_eq!(value, expected),
        other => panic!("expected Fts, got: {other:?}"),
    }
}

pub fn category_is(token: &Token, expected: &[&str]) {
    match token {
        Token::Category { name, value } => {
            assert_eq!(name, "category");
            assert_eq!(value.as_slice(), expected);
        }
        other => panic!("expected Category, got: {other:?}"),
    }
}

pub fn tag_is(token: &Token, expected: &[&str]) {
    match token {
        Token::Tag { value, .. } => assert_eq!(value.as_slice(), expected),
        other => panic!("expected Tag, got: {other:?}"),
    }
}

pub fn tag_any_is(token: &Token, expected: &[&str]) {
    match token {
        Token::TagAny { value, .. } => assert_eq!(value.as_slice(), expected),
        other => panic!("expected TagAny, got: {other:?}"),
    }
}

pub fn tag_not_is(token: &Token, expected: &[&str]) {
    match token {
        Token::TagNot { value, .. } => assert_eq!(value.as_slice(), expected),
        other => panic!("expected TagNot, got: {other:?}"),
    }
}

pub fn custom_field_is(token: &Token, name: &str, operator: Operator, value: &str) {
    match token {
        Token::CustomField {
            name: n,
            operator: op,
            value: v,
        } => {
            assert_eq!(n, name);
            assert_eq!(*op, operator);
            assert_eq!(v, value);
        }
        other => panic!("expected CustomField, got: {other:?}"),
    }
}
