// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Restricted literal-expression parser.
//!
//! The `routes` and `resinject` attributes of a route file carry JS-style
//! array literals. They are data, not code: this parser accepts arrays,
//! objects, strings, numbers and booleans and nothing else, so a route file
//! can never smuggle executable code into the build process through an
//! attribute.

use crate::error::{ExtwebError, Result};
use nom::branch::alt;
use nom::bytes::complete::{escaped_transform, is_not, tag, take_while, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{map, opt, recognize, value};
use nom::multi::separated_list0;
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use nom::{IResult, Parser};

/// A closed data literal: no identifiers, no calls, no operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Single- or double-quoted string.
    Str(String),
    /// Numeric literal.
    Num(f64),
    /// `true` or `false`.
    Bool(bool),
    /// `[ ... ]` array.
    Array(Vec<Literal>),
    /// `{ key: value }` object with identifier or string keys.
    Object(Vec<(String, Literal)>),
}

fn escape_sequences(
    quote: char,
) -> impl for<'a> Fn(&'a str) -> IResult<&'a str, char> {
    move |input| {
        alt((
            value(quote, char(quote)),
            value('\\', char('\\')),
            value('\n', char('n')),
            value('\t', char('t')),
            value('\r', char('r')),
            value('/', char('/')),
        ))
        .parse(input)
    }
}

fn quoted(quote: char) -> impl for<'a> Fn(&'a str) -> IResult<&'a str, String> {
    move |input| {
        let body: &str = match quote {
            '\'' => "\\'",
            _ => "\\\"",
        };
        map(
            delimited(
                char(quote),
                opt(escaped_transform(is_not(body), '\\', escape_sequences(quote))),
                char(quote),
            ),
            |s: Option<String>| s.unwrap_or_default(),
        )
        .parse(input)
    }
}

fn js_string(input: &str) -> IResult<&str, String> {
    alt((quoted('\''), quoted('"'))).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
    ))
    .parse(input)
}

fn array(input: &str) -> IResult<&str, Literal> {
    map(
        delimited(
            char('['),
            terminated(separated_list0(char(','), literal), opt(char(','))),
            preceded(multispace0, char(']')),
        ),
        Literal::Array,
    )
    .parse(input)
}

fn object(input: &str) -> IResult<&str, Literal> {
    let key = delimited(
        multispace0,
        alt((js_string, map(identifier, str::to_string))),
        multispace0,
    );
    let entry = separated_pair(key, char(':'), literal);
    map(
        delimited(
            char('{'),
            terminated(separated_list0(char(','), entry), opt(char(','))),
            preceded(multispace0, char('}')),
        ),
        Literal::Object,
    )
    .parse(input)
}

fn literal(input: &str) -> IResult<&str, Literal> {
    delimited(
        multispace0,
        alt((
            array,
            object,
            map(js_string, Literal::Str),
            value(Literal::Bool(true), tag("true")),
            value(Literal::Bool(false), tag("false")),
            map(double, Literal::Num),
        )),
        multispace0,
    )
    .parse(input)
}

/// Parses a complete literal expression, rejecting trailing input.
pub fn parse_literal(input: &str) -> Result<Literal> {
    match literal(input) {
        Ok((rest, parsed)) if rest.trim().is_empty() => Ok(parsed),
        Ok((rest, _)) => Err(ExtwebError::Literal(format!(
            "unexpected trailing input: '{}'",
            rest.trim()
        ))),
        Err(e) => Err(ExtwebError::Literal(e.to_string())),
    }
}

/// Parses an array literal whose elements are all strings.
///
/// This is the shape both the `routes` and `resinject` attributes must have.
pub fn parse_string_array(input: &str) -> Result<Vec<String>> {
    match parse_literal(input)? {
        Literal::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Literal::Str(s) => Ok(s),
                other => Err(ExtwebError::Literal(format!(
                    "expected a string element, found {:?}",
                    other
                ))),
            })
            .collect(),
        other => Err(ExtwebError::Literal(format!(
            "expected an array literal, found {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_quoted_string_array() {
        let patterns = parse_string_array("[ '*://www.test.com/*' ]").unwrap();
        assert_eq!(patterns, vec!["*://www.test.com/*".to_string()]);
    }

    #[test]
    fn parses_mixed_quotes_and_trailing_comma() {
        let patterns =
            parse_string_array(r#"[ "https://a.com/*", '*://b.com/*', ]"#).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[1], "*://b.com/*");
    }

    #[test]
    fn parses_escapes() {
        let patterns = parse_string_array(r"[ 'it\'s' ]").unwrap();
        assert_eq!(patterns, vec!["it's".to_string()]);
    }

    #[test]
    fn parses_nested_structures() {
        let parsed = parse_literal(r#"{ a: [1, true], "b": 'x' }"#).unwrap();
        match parsed {
            Literal::Object(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].0, "a");
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn rejects_code() {
        assert!(parse_string_array("[ location.href ]").is_err());
        assert!(parse_string_array("require('fs')").is_err());
        assert!(parse_string_array("[ '*' ] + x").is_err());
    }

    #[test]
    fn rejects_non_string_elements() {
        assert!(parse_string_array("[ 1, 2 ]").is_err());
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_string_array("[]").unwrap().is_empty());
        assert!(parse_string_array("[ ]").unwrap().is_empty());
    }
}
