//! Classifies tokenizer segments into typed search tokens.
//!
//! A single linear pass over the segment list with a fixed one-segment
//! lookahead: `key:` with the value in the following segment, and the
//! textual operators `contains`/`icontains`, which always take the next
//! segment as their value. Malformed segments become [`ParseError`]s and
//! never abort the pass.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::segment::{segment_input, split_key_value, split_unquoted};
use crate::value::remove_quotes;

/// Comparison operator of a custom-field token.
///
/// Both `Display` and `Serialize` yield the wire spelling.
///
/// ```
/// use docsearch_query::Operator;
/// assert_eq!(Operator::Gte.to_string(), ">=");
/// assert_eq!(serde_json::to_string(&Operator::IContains).unwrap(), "\"icontains\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "icontains")]
    IContains,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Contains => "contains",
            Operator::IContains => "icontains",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a category or tag token: a single string or a comma list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    One(String),
    Many(Vec<String>),
}

impl TokenValue {
    /// All values as a slice, regardless of arity.
    ///
    /// ```
    /// use docsearch_query::TokenValue;
    /// assert_eq!(TokenValue::One("a".into()).as_slice(), ["a"]);
    /// assert_eq!(TokenValue::Many(vec!["a".into(), "b".into()]).as_slice(), ["a", "b"]);
    /// ```
    pub fn as_slice(&self) -> &[String] {
        match self {
            TokenValue::One(value) => std::slice::from_ref(value),
            TokenValue::Many(values) => values,
        }
    }
}

/// One classified unit of search intent.
///
/// Invariant: a token always carries a non-empty value; segments with empty
/// values surface as [`ParseError`]s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// All free-text words of the query, space-joined in input order.
    /// At most one per parse, always first in the token list.
    Fts { value: String },
    /// `category:`/`cat:` filter. `name` is the canonical keyword.
    Category { name: String, value: TokenValue },
    /// `tag:` filter, AND semantics.
    Tag { name: String, value: TokenValue },
    /// `tag_any:` filter, OR semantics.
    TagAny { name: String, value: TokenValue },
    /// `tag_not:` filter, NOT semantics.
    TagNot { name: String, value: TokenValue },
    /// `field:operator value` comparison against a user-defined document
    /// attribute. `name` keeps the original casing, quotes stripped.
    CustomField {
        name: String,
        operator: Operator,
        value: String,
    },
}

/// A malformed segment: the human-readable diagnostic plus the raw segment
/// it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub token: String,
}

impl ParseError {
    fn new(message: impl Into<String>, token: &str) -> Self {
        Self {
            message: message.into(),
            token: token.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (in `{}`)", self.message, self.token)
    }
}

impl std::error::Error for ParseError {}

/// Output of the parsing phase and sole input to query building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// `true` when every segment classified cleanly.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses raw search input into typed tokens.
///
/// Never fails: malformed segments accumulate in [`ParseResult::errors`]
/// while parsing continues with the rest of the input.
///
/// ```
/// use docsearch_query::{parse_tokens, Operator, Token, TokenValue};
///
/// let result = parse_tokens("category:Invoice,Contract");
/// assert!(result.is_valid());
/// assert_eq!(
///     result.tokens[0],
///     Token::Category {
///         name: "category".into(),
///         value: TokenValue::Many(vec!["Invoice".into(), "Contract".into()]),
///     }
/// );
///
/// let result = parse_tokens(r#""Invoice Total":>100"#);
/// assert_eq!(
///     result.tokens[0],
///     Token::CustomField {
///         name: "Invoice Total".into(),
///         operator: Operator::Gt,
///         value: "100".into(),
///     }
/// );
///
/// // errors are data, not exceptions
/// let result = parse_tokens("category: ");
/// assert!(!result.is_valid());
/// assert!(result.tokens.is_empty());
/// ```
pub fn parse_tokens(input: &str) -> ParseResult {
    let segments = segment_input(input);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut free_text: Vec<&str> = Vec::new();

    let mut index = 0;
    while index < segments.len() {
        let segment = &segments[index];
        index += 1;

        let Some((raw_key, mut rest)) = split_key_value(segment) else {
            free_text.push(segment.as_str());
            continue;
        };

        let key = remove_quotes(raw_key);
        if key.is_empty() {
            errors.push(ParseError::new("missing key before `:`", segment));
            continue;
        }

        // `key:` with a space after the colon takes the next segment as its
        // raw value.
        if rest.is_empty() {
            match segments.get(index) {
                Some(next) => {
                    rest = next.as_str();
                    index += 1;
                }
                None => {
                    errors.push(ParseError::new(format!("`{key}:` is missing a value"), segment));
                    continue;
                }
            }
        }

        match Keyword::of(key) {
            Some(keyword) => match parse_list_value(rest) {
                Some(value) => tokens.push(keyword.token(value)),
                None => errors.push(ParseError::new(
                    format!("`{}:` has an empty value", keyword.name()),
                    segment,
                )),
            },
            None => {
                if let Some(operator) = textual_operator(rest) {
                    // `contains`/`icontains` are never glued to their value;
                    // the value is always the following segment.
                    match segments.get(index) {
                        Some(next) => {
                            index += 1;
                            push_custom_field(&mut tokens, &mut errors, segment, key, operator, next);
                        }
                        None => errors.push(ParseError::new(
                            format!("operator `{operator}` is missing a value"),
                            segment,
                        )),
                    }
                } else {
                    let (operator, raw_value) = split_operator(rest);
                    push_custom_field(&mut tokens, &mut errors, segment, key, operator, raw_value);
                }
            }
        }
    }

    // Free text always leads the token list, wherever the words appeared.
    if !free_text.is_empty() {
        tokens.insert(
            0,
            Token::Fts {
                value: free_text.join(" "),
            },
        );
    }

    debug!(
        "parsed {} segment(s) into {} token(s), {} error(s)",
        segments.len(),
        tokens.len(),
        errors.len()
    );
    ParseResult { tokens, errors }
}

// Reserved keys; any other key names a custom field.
#[derive(Clone, Copy)]
enum Keyword {
    Category,
    Tag,
    TagAny,
    TagNot,
}

impl Keyword {
    fn of(key: &str) -> Option<Self> {
        let lower = key.to_ascii_lowercase();
        match lower.as_str() {
            "category" | "cat" => Some(Keyword::Category),
            "tag" => Some(Keyword::Tag),
            "tag_any" => Some(Keyword::TagAny),
            "tag_not" => Some(Keyword::TagNot),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Keyword::Category => "category",
            Keyword::Tag => "tag",
            Keyword::TagAny => "tag_any",
            Keyword::TagNot => "tag_not",
        }
    }

    fn token(self, value: TokenValue) -> Token {
        let name = self.name().to_string();
        match self {
            Keyword::Category => Token::Category { name, value },
            Keyword::Tag => Token::Tag { name, value },
            Keyword::TagAny => Token::TagAny { name, value },
            Keyword::TagNot => Token::TagNot { name, value },
        }
    }
}

/// Category/tag value: single string or comma list.
///
/// The comma check runs on the quote-stripped rest, but the split runs on
/// the original text honoring quotes, so a comma inside a quoted value
/// never splits. Returns `None` when nothing non-empty survives.
fn parse_list_value(rest: &str) -> Option<TokenValue> {
    if remove_quotes(rest).contains(',') {
        let mut parts: Vec<String> = split_unquoted(rest, ',')
            .into_iter()
            .map(remove_quotes)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        match parts.len() {
            0 => None,
            1 => Some(TokenValue::One(parts.pop().unwrap())),
            _ => Some(TokenValue::Many(parts)),
        }
    } else {
        let value = remove_quotes(rest);
        (!value.is_empty()).then(|| TokenValue::One(value.to_string()))
    }
}

fn textual_operator(rest: &str) -> Option<Operator> {
    if rest.eq_ignore_ascii_case("contains") {
        Some(Operator::Contains)
    } else if rest.eq_ignore_ascii_case("icontains") {
        Some(Operator::IContains)
    } else {
        None
    }
}

/// Detects `>=, <=, !=, >, <, =` prefixes, longest first. No prefix means
/// implicit equality over the whole rest.
fn split_operator(rest: &str) -> (Operator, &str) {
    const SYMBOLS: [(&str, Operator); 6] = [
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("!=", Operator::Ne),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("=", Operator::Eq),
    ];
    for (symbol, operator) in SYMBOLS {
        if let Some(value) = rest.strip_prefix(symbol) {
            return (operator, value);
        }
    }
    (Operator::Eq, rest)
}

fn push_custom_field(
    tokens: &mut Vec<Token>,
    errors: &mut Vec<ParseError>,
    segment: &str,
    name: &str,
    operator: Operator,
    raw_value: &str,
) {
    let value = remove_quotes(raw_value);
    if value.is_empty() {
        errors.push(ParseError::new(
            format!("`{name}` is missing a value after `{operator}`"),
            segment,
        ));
    } else {
        tokens.push(Token::CustomField {
            name: name.to_string(),
            operator,
            value: value.to_string(),
        });
    }
}
