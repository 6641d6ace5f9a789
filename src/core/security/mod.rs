// Security module for SQL identifier validation
//
// Schema and table names are spliced into SQL text rather than bound as
// parameters. This module is the single gate every such name passes
// through before a statement is built.

pub mod identifier;

pub use identifier::{validate_identifier, IdentifierError, TableRef, MAX_IDENTIFIER_LEN};
