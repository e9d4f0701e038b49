//! Splits raw search-box input into whitespace-delimited segments.
//!
//! A run of characters between a matching pair of `"` or `'` is atomic:
//! internal whitespace, colons, and commas never end a segment while the
//! run is open. The quote characters themselves stay in the segment so the
//! parser can decide how to strip them. A quote with no matching close
//! quote later in the input is an ordinary literal character.

/// Splits `input` into segments.
///
/// Leading/trailing whitespace is trimmed first; the result never contains
/// empty or whitespace-only segments.
///
/// ```
/// use docsearch_query::segment_input;
///
/// assert_eq!(segment_input("  invoice   tag:urgent "), ["invoice", "tag:urgent"]);
/// assert_eq!(segment_input(r#"category:"Sales Invoice" report"#),
///            [r#"category:"Sales Invoice""#, "report"]);
/// assert_eq!(segment_input(""), Vec::<String>::new());
/// ```
///
/// A colon directly after a closing quote stays attached to the quoted
/// segment, while later operator/value words remain separate:
///
/// ```
/// use docsearch_query::segment_input;
///
/// assert_eq!(segment_input("cf:'total amount': < 100"),
///            ["cf:'total amount':", "<", "100"]);
/// ```
pub fn segment_input(input: &str) -> Vec<String> {
    let input = input.trim();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut open_quote: Option<char> = None;

    for (idx, ch) in input.char_indices() {
        match open_quote {
            Some(quote) => {
                current.push(ch);
                if ch == quote {
                    open_quote = None;
                }
            }
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            None => {
                if is_quote(ch) && opens_quoted_run(input, idx, ch) {
                    open_quote = Some(ch);
                }
                current.push(ch);
            }
        }
    }

    // `opens_quoted_run` guarantees a close quote exists, so the loop can
    // never end with a run still open.
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Splits a segment on its first unquoted `:` into `(key, rest)`.
///
/// Returns `None` for plain free-text segments. Colons inside quoted runs
/// never split, which is what allows quoted field names such as
/// `"Invoice Total":>100`.
pub(crate) fn split_key_value(segment: &str) -> Option<(&str, &str)> {
    let idx = find_unquoted(segment, ':')?;
    Some((&segment[..idx], &segment[idx + 1..]))
}

/// Splits on every unquoted occurrence of `separator`. Always returns at
/// least one part; parts may be empty (callers drop them).
pub(crate) fn split_unquoted(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;
    while let Some(idx) = find_unquoted(rest, separator) {
        parts.push(&rest[..idx]);
        rest = &rest[idx + separator.len_utf8()..];
    }
    parts.push(rest);
    parts
}

fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut open_quote: Option<char> = None;
    for (idx, ch) in s.char_indices() {
        match open_quote {
            Some(quote) => {
                if ch == quote {
                    open_quote = None;
                }
            }
            None if ch == target => return Some(idx),
            None if is_quote(ch) && opens_quoted_run(s, idx, ch) => open_quote = Some(ch),
            None => {}
        }
    }
    None
}

pub(crate) fn is_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'')
}

// A quote only opens an atomic run when a matching close quote exists later.
fn opens_quoted_run(s: &str, idx: usize, quote: char) -> bool {
    s[idx + quote.len_utf8()..].contains(quote)
}
