//! # Document search query syntax
//!
//! `docsearch-query` parses the search mini-language of a document
//! management system and folds the result into the normalized query
//! payload the backend search endpoint accepts. The language mixes free
//! text with `key:value` filters: categories, three tag-logic variants,
//! and `field:operator value` comparisons against user-defined custom
//! fields.
//!
//! Parsing is a two-phase pipeline over plain data. [`parse_tokens`] turns
//! the raw string into typed [`Token`]s plus accumulated [`ParseError`]s
//! (malformed segments never abort the parse), and [`build_search_query`]
//! groups the tokens into a serializable [`SearchQuery`].
//!
//! ## Example
//! ```
//! use docsearch_query::{build_search_query, parse_tokens, Operator, QueryOptions, Token};
//!
//! let parsed = parse_tokens(r#"invoice category:"Sales Invoice" tag:urgent "Invoice Total":>1000"#);
//! assert!(parsed.is_valid());
//! assert_eq!(parsed.tokens.len(), 4);
//! assert!(matches!(&parsed.tokens[0], Token::Fts { value } if value == "invoice"));
//!
//! let query = build_search_query(&parsed.tokens, QueryOptions::default());
//! assert_eq!(query.filters.fts.unwrap().terms, ["invoice"]);
//! assert_eq!(query.filters.category.unwrap().values, ["Sales Invoice"]);
//! let fields = query.filters.custom_fields.unwrap();
//! assert_eq!(fields[0].field_name, "Invoice Total");
//! assert_eq!(fields[0].operator, Operator::Gt);
//! ```

mod query;
mod segment;
mod token;
mod value;

pub use query::*;
pub use segment::segment_input;
pub use token::*;
pub use value::*;
