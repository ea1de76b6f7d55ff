//! `CREATE TABLE` parser.
//!
//! Handles the subset of DDL needed to extract column name, type, length and
//! nullability. Named `CONSTRAINT` clauses end the column list; other
//! table-level constraints are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::requirements::{
    ColumnRequirement, ParseWarning, ParsedSchema, SchemaRequirements, WarningKind,
};
use super::tokenizer::{delimited_tokens, split_top_level, starts_with_keyword, truncate_at_keyword};
use crate::error::{LoaderError, Result};
use crate::io_utils;

static CREATE_TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bCREATE\s+TABLE\b").expect("valid create table regex"));

static LENGTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\(([^)]*)\)").expect("valid length regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static IDENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bIDENTITY\b").expect("valid identity regex"));

static NOT_NULL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").expect("valid not null regex"));

/// Character types whose parenthesized argument is a maximum length.
const LENGTH_TYPES: &[&str] = &["char", "varchar", "nchar", "nvarchar"];

/// Leading keywords of table-level constraints that are not columns.
const TABLE_CONSTRAINT_KEYWORDS: &[&str] =
    &["PRIMARY KEY", "UNIQUE", "FOREIGN KEY", "CHECK", "INDEX"];

/// Parses `CREATE TABLE` text into [`SchemaRequirements`].
pub struct SchemaParser;

impl SchemaParser {
    /// Reads and parses a DDL file.
    pub fn from_file(path: &Path) -> Result<ParsedSchema> {
        let text = io_utils::read_text(path)?;
        tracing::debug!("Parsing CREATE TABLE from {}", path.display());
        Self::parse(&text)
    }

    /// Parses DDL text.
    ///
    /// Malformed column fragments become warnings; only a missing
    /// `CREATE TABLE` clause, a missing column list, or a list with no usable
    /// columns is an error.
    pub fn parse(ddl: &str) -> Result<ParsedSchema> {
        let text = WHITESPACE_RE.replace_all(ddl, " ");

        let keyword = CREATE_TABLE_RE
            .find(&text)
            .ok_or(LoaderError::MissingCreateTable)?;
        let rest = &text[keyword.end()..];

        let Some(open) = rest.find('(') else {
            let table = rest.trim().to_string();
            if table.is_empty() {
                return Err(LoaderError::MissingCreateTable);
            }
            return Err(LoaderError::MissingColumnList { table });
        };

        let table_name = rest[..open].trim().to_string();
        if table_name.is_empty() {
            return Err(LoaderError::MissingCreateTable);
        }

        let mut columns = Vec::new();
        let mut warnings = Vec::new();

        for (position, raw) in split_top_level(&rest[open + 1..]).into_iter().enumerate() {
            let fragment = raw.trim();
            if fragment.is_empty() {
                continue;
            }
            if starts_with_keyword(fragment, "CONSTRAINT") {
                tracing::debug!("{} column list ends at '{}'", table_name, fragment);
                break;
            }
            if TABLE_CONSTRAINT_KEYWORDS
                .iter()
                .any(|kw| starts_with_keyword(fragment, kw))
            {
                tracing::debug!("Skipping table constraint '{}' in {}", fragment, table_name);
                continue;
            }

            match parse_column(fragment) {
                Ok((column, length_warning)) => {
                    if let Some(kind) = length_warning {
                        warnings.push(ParseWarning {
                            position,
                            fragment: fragment.to_string(),
                            kind,
                        });
                    }
                    columns.push(column);
                }
                Err(kind) => warnings.push(ParseWarning {
                    position,
                    fragment: fragment.to_string(),
                    kind,
                }),
            }
        }

        for warning in &warnings {
            tracing::warn!("{}: {}", table_name, warning);
        }

        if columns.is_empty() {
            return Err(LoaderError::EmptySchema { table: table_name });
        }

        tracing::debug!(
            "Parsed {} columns for {} ({} warnings)",
            columns.len(),
            table_name,
            warnings.len()
        );

        Ok(ParsedSchema {
            requirements: SchemaRequirements {
                table_name,
                columns,
            },
            warnings,
        })
    }
}

/// Parses one column declaration.
///
/// An inline `CONSTRAINT` clause and everything after it is ignored. Returns
/// the requirement plus an optional length warning, or the reason the
/// fragment could not be used.
fn parse_column(
    fragment: &str,
) -> std::result::Result<(ColumnRequirement, Option<WarningKind>), WarningKind> {
    let declaration = truncate_at_keyword(fragment, "CONSTRAINT");
    let tokens = delimited_tokens(declaration);
    if tokens.len() != 2 {
        return Err(WarningKind::TokenCount {
            found: tokens.len(),
        });
    }

    let name = tokens[0].text.trim();
    if name.is_empty() {
        return Err(WarningKind::EmptyName);
    }
    let declared_type = tokens[1].text.trim().to_string();
    let attributes = &declaration[tokens[1].end..];

    let mut length_warning = None;
    let max_length = if LENGTH_TYPES
        .iter()
        .any(|t| declared_type.eq_ignore_ascii_case(t))
    {
        LENGTH_RE
            .captures(attributes)
            .and_then(|caps| caps.get(1))
            .and_then(|m| {
                let declared = m.as_str().trim();
                match declared.parse::<u32>() {
                    Ok(len) => Some(len),
                    Err(_) => {
                        length_warning = Some(WarningKind::UnparsedLength {
                            declared: declared.to_string(),
                        });
                        None
                    }
                }
            })
    } else {
        None
    };

    let column = ColumnRequirement {
        name: name.to_string(),
        declared_type,
        max_length,
        nullable: !NOT_NULL_RE.is_match(attributes),
        identity: IDENTITY_RE.is_match(attributes),
        original: fragment.to_string(),
    };

    Ok((column, length_warning))
}
