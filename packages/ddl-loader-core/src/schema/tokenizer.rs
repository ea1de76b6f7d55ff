//! Delimiter-aware scanning of column lists and column declarations.

/// A token enclosed in `[...]`, `"..."` or `` `...` ``.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedToken<'a> {
    /// Token text without delimiters
    pub text: &'a str,
    /// Byte offset just past the closing delimiter
    pub end: usize,
}

fn closing_delimiter(ch: char) -> Option<char> {
    match ch {
        '[' => Some(']'),
        '"' => Some('"'),
        '`' => Some('`'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// Splits a column list on top-level commas.
///
/// `body` starts just after the opening parenthesis of the column list.
/// Commas nested in parentheses or inside quoted/bracketed identifiers do not
/// split, so `[Amount] [decimal](10, 2)` stays one fragment. Scanning stops at
/// the parenthesis closing the list; text after it is ignored.
pub fn split_top_level(body: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in body.char_indices() {
        if let Some(close) = quote {
            if ch == close {
                quote = None;
            }
            continue;
        }

        if let Some(close) = closing_delimiter(ch) {
            quote = Some(close);
            continue;
        }

        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => {
                fragments.push(&body[start..i]);
                return fragments;
            }
            ')' => depth -= 1,
            ',' if depth == 0 => {
                fragments.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    fragments.push(&body[start..]);
    fragments
}

/// Case-insensitive keyword prefix test on a word boundary.
pub fn starts_with_keyword(fragment: &str, keyword: &str) -> bool {
    let Some(head) = fragment.get(..keyword.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(keyword)
        && fragment[keyword.len()..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Cuts a column declaration at the first bare `keyword`.
///
/// Occurrences inside delimited identifiers or string literals do not count,
/// so `[PIID] [char](3) NOT NULL CONSTRAINT [DF_PIID] DEFAULT ('NE1')` is cut
/// before `CONSTRAINT` while `[ConstraintNo] [int]` is left whole.
pub fn truncate_at_keyword<'a>(fragment: &'a str, keyword: &str) -> &'a str {
    let mut quote: Option<char> = None;
    let mut previous: Option<char> = None;

    for (i, ch) in fragment.char_indices() {
        let boundary = !previous.is_some_and(is_word_char);
        if let Some(close) = quote {
            if ch == close {
                quote = None;
            }
        } else if let Some(close) = closing_delimiter(ch) {
            quote = Some(close);
        } else if boundary && starts_with_keyword(&fragment[i..], keyword) {
            return &fragment[..i];
        }
        previous = Some(ch);
    }

    fragment
}

/// Extracts identifier tokens delimited by brackets, double quotes or backticks.
///
/// Single-quoted string literals are skipped so defaults such as `'[x]'` do not
/// produce tokens. An unterminated delimiter ends the scan.
pub fn delimited_tokens(fragment: &str) -> Vec<DelimitedToken<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some((offset, ch)) = fragment[pos..]
        .char_indices()
        .find(|&(_, c)| closing_delimiter(c).is_some())
    {
        let Some(close) = closing_delimiter(ch) else {
            break;
        };
        let content_start = pos + offset + ch.len_utf8();
        let Some(len) = fragment[content_start..].find(close) else {
            break;
        };
        let content_end = content_start + len;
        pos = content_end + close.len_utf8();

        if ch != '\'' {
            tokens.push(DelimitedToken {
                text: &fragment[content_start..content_end],
                end: pos,
            });
        }
    }

    tokens
}
