//! `CREATE TABLE` introspection: table name and ordered column requirements.

mod parser;
mod requirements;
mod tokenizer;

pub use parser::SchemaParser;
pub use requirements::{
    ColumnRequirement, ParseWarning, ParsedSchema, SchemaRequirements, WarningKind,
};
pub use tokenizer::{delimited_tokens, split_top_level, DelimitedToken};
