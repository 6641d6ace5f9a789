use std::fmt;

/// MySQL rejects identifiers longer than this.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Errors that can occur during identifier validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("Identifier for {kind} must not be empty")]
    Empty { kind: &'static str },

    #[error("Invalid {kind} name '{value}': must not start with a digit")]
    LeadingDigit { kind: &'static str, value: String },

    #[error("Invalid {kind} name '{value}': only ASCII letters, digits and '_' are allowed")]
    InvalidCharacter { kind: &'static str, value: String },

    #[error("Invalid {kind} name '{value}': longer than {MAX_IDENTIFIER_LEN} characters")]
    TooLong { kind: &'static str, value: String },

    #[error("Invalid table reference '{value}': expected 'schema.table'")]
    MalformedTableRef { value: String },
}

/// Validates a value that will be spliced into SQL text as an identifier.
///
/// Schema and table names cannot be bound as parameters, so every
/// caller-supplied identifier has to pass this check before a statement is
/// built. `kind` only feeds the error message ("schema", "table").
///
/// # Examples
///
/// ```rust
/// use incident_mcp_server::core::security::validate_identifier;
///
/// assert!(validate_identifier("incident", "schema").is_ok());
/// assert!(validate_identifier("1incident", "schema").is_err());
/// assert!(validate_identifier("kb`; DROP", "table").is_err());
/// ```
pub fn validate_identifier<'a>(
    value: &'a str,
    kind: &'static str,
) -> Result<&'a str, IdentifierError> {
    let Some(first) = value.chars().next() else {
        return Err(IdentifierError::Empty { kind });
    };

    if first.is_ascii_digit() {
        return Err(IdentifierError::LeadingDigit {
            kind,
            value: value.to_string(),
        });
    }

    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(IdentifierError::InvalidCharacter {
            kind,
            value: value.to_string(),
        });
    }

    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            kind,
            value: value.to_string(),
        });
    }

    Ok(value)
}

/// A validated `schema.table` pair.
///
/// Construction is the only place the check happens, so holding a
/// `TableRef` means both halves are safe to quote into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    schema: String,
    table: String,
}

impl TableRef {
    pub fn new(schema: &str, table: &str) -> Result<Self, IdentifierError> {
        validate_identifier(schema, "schema")?;
        validate_identifier(table, "table")?;
        Ok(Self {
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }

    /// Parse a `schema.table` string, as used in configuration.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let (schema, table) =
            value
                .split_once('.')
                .ok_or_else(|| IdentifierError::MalformedTableRef {
                    value: value.to_string(),
                })?;
        Self::new(schema, table)
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Backtick-quoted form for splicing into SQL.
    pub fn quoted(&self) -> String {
        format!("`{}`.`{}`", self.schema, self.table)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}
