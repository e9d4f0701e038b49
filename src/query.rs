//! Folds parsed tokens into the normalized query payload the backend
//! search endpoint expects.
//!
//! Grouping is deterministic: repeated tokens of one kind merge into one
//! filter group, tag groups keep a fixed order, and custom-field tokens
//! stay independent so `>=`/`<=` pairs express ranges. Values are coerced
//! exactly once, here, on the token-to-filter boundary.

use serde::Serialize;
use tracing::debug;

use crate::token::{Operator, Token};
use crate::value::{FilterValue, convert_value};

/// Caller-supplied paging and sorting. Fields are copied into the query
/// only when set; the builder never invents defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub lang: Option<String>,
    pub document_type_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The backend-facing query payload. Serializes to the wire schema; unset
/// paging fields and empty filter groups are omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchQuery {
    pub filters: SearchFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type_id: Option<String>,
}

/// Normalized filter groups. An empty query serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fts: Option<FtsFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomFieldFilter>>,
}

/// Full-text terms, whitespace-split with empty terms discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FtsFilter {
    pub terms: Vec<String>,
}

/// All category values in encounter order. Duplicates are kept; the
/// backend decides what repetition means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFilter {
    pub values: Vec<String>,
}

/// One tag-logic bucket. Untagged serialization yields the bare
/// `{"tags": [...]}` / `{"tags_any": [...]}` / `{"tags_not": [...]}`
/// objects of the wire schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagGroup {
    All { tags: Vec<String> },
    Any { tags_any: Vec<String> },
    Not { tags_not: Vec<String> },
}

/// One custom-field constraint. Same-name filters are deliberately not
/// merged: `total:>=10 total:<=20` must produce two range constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomFieldFilter {
    pub field_name: String,
    pub operator: Operator,
    pub value: FilterValue,
}

/// Builds the backend query from parsed tokens. Pure and infallible: an
/// empty token list yields an empty `filters` object.
///
/// ```
/// use docsearch_query::{build_search_query, parse_tokens, QueryOptions, TagGroup};
///
/// let parsed = parse_tokens("tag:urgent tag_not:archived");
/// let query = build_search_query(&parsed.tokens, QueryOptions::default());
/// assert_eq!(
///     query.filters.tags.unwrap(),
///     [
///         TagGroup::All { tags: vec!["urgent".into()] },
///         TagGroup::Not { tags_not: vec!["archived".into()] },
///     ]
/// );
/// ```
pub fn build_search_query(tokens: &[Token], options: QueryOptions) -> SearchQuery {
    let mut terms = Vec::new();
    let mut categories = Vec::new();
    let mut tags = Vec::new();
    let mut tags_any = Vec::new();
    let mut tags_not = Vec::new();
    let mut custom_fields = Vec::new();

    for token in tokens {
        match token {
            Token::Fts { value } => {
                terms.extend(value.split_whitespace().map(str::to_string));
            }
            Token::Category { value, .. } => {
                categories.extend(value.as_slice().iter().cloned());
            }
            Token::Tag { value, .. } => tags.extend(value.as_slice().iter().cloned()),
            Token::TagAny { value, .. } => tags_any.extend(value.as_slice().iter().cloned()),
            Token::TagNot { value, .. } => tags_not.extend(value.as_slice().iter().cloned()),
            Token::CustomField {
                name,
                operator,
                value,
            } => custom_fields.push(CustomFieldFilter {
                field_name: name.clone(),
                operator: *operator,
                value: convert_value(value),
            }),
        }
    }

    let mut filters = SearchFilters::default();
    if !terms.is_empty() {
        filters.fts = Some(FtsFilter { terms });
    }
    if !categories.is_empty() {
        filters.category = Some(CategoryFilter { values: categories });
    }

    // Fixed group order: all, any, not. Empty buckets contribute nothing.
    let mut groups = Vec::new();
    if !tags.is_empty() {
        groups.push(TagGroup::All { tags });
    }
    if !tags_any.is_empty() {
        groups.push(TagGroup::Any { tags_any });
    }
    if !tags_not.is_empty() {
        groups.push(TagGroup::Not { tags_not });
    }
    if !groups.is_empty() {
        filters.tags = Some(groups);
    }

    if !custom_fields.is_empty() {
        filters.custom_fields = Some(custom_fields);
    }

    debug!("built query from {} token(s)", tokens.len());

    SearchQuery {
        filters,
        page_size: options.page_size,
        page_number: options.page_number,
        sort_by: options.sort_by,
        sort_direction: options.sort_direction,
        lang: options.lang,
        document_type_id: options.document_type_id,
    }
}
