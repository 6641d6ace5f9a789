//! Typed statement builders.
//!
//! Column names are `&'static str` picked by the tool code, table names are
//! pre-validated [`TableRef`]s, and every caller-supplied value goes through
//! `push_bind`. Nothing a caller sends is ever formatted into SQL text.

use sqlx::{MySql, QueryBuilder};

use crate::core::security::TableRef;

/// Comparison applied by a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `column = ?`
    Eq,
    /// `column LIKE ?` with the value wrapped in `%...%`.
    Contains,
}

/// One `column op value` term of a WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: Op,
    pub value: String,
}

/// A conjunction of predicates. Only supplied filters produce a term.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    predicates: Vec<Predicate>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = value` when `value` is present.
    pub fn eq<V: Into<String>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate {
                column,
                op: Op::Eq,
                value: value.into(),
            });
        }
        self
    }

    /// Add a substring match on `column` when `value` is present.
    pub fn contains<V: Into<String>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate {
                column,
                op: Op::Contains,
                value: value.into(),
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Append ` WHERE a = ? AND b LIKE ?` (or nothing when empty).
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, MySql>) {
        if self.predicates.is_empty() {
            return;
        }

        qb.push(" WHERE ");
        let mut terms = qb.separated(" AND ");
        for predicate in &self.predicates {
            match predicate.op {
                Op::Eq => {
                    terms.push(format!("{} = ", predicate.column));
                    terms.push_bind_unseparated(predicate.value.clone());
                }
                Op::Contains => {
                    terms.push(format!("{} LIKE ", predicate.column));
                    terms.push_bind_unseparated(like_pattern(&predicate.value));
                }
            }
        }
    }
}

/// Wrap a value for a substring `LIKE`, escaping the wildcards it contains.
pub fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `SELECT cols FROM table [WHERE ...] ORDER BY col DESC LIMIT ?`
#[derive(Debug, Clone)]
pub struct Select<'a> {
    table: &'a TableRef,
    columns: &'a [&'static str],
    filters: Filters,
    newest_first_by: Option<&'static str>,
    limit: Option<u32>,
}

impl<'a> Select<'a> {
    pub fn new(table: &'a TableRef, columns: &'a [&'static str]) -> Self {
        Self {
            table,
            columns,
            filters: Filters::new(),
            newest_first_by: None,
            limit: None,
        }
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Order descending by `column`.
    pub fn newest_first_by(mut self, column: &'static str) -> Self {
        self.newest_first_by = Some(column);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(&self) -> QueryBuilder<'static, MySql> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(self.columns.join(", "));
        qb.push(" FROM ");
        qb.push(self.table.quoted());
        self.filters.push_where(&mut qb);
        if let Some(column) = self.newest_first_by {
            qb.push(format!(" ORDER BY {} DESC", column));
        }
        if let Some(limit) = self.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }
        qb
    }
}

/// Right-hand side of one `SET` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Value(String),
    Null,
}

/// `UPDATE table SET a = ?, b = NULL WHERE key = ?`
#[derive(Debug, Clone)]
pub struct Update<'a> {
    table: &'a TableRef,
    assignments: Vec<(&'static str, Assignment)>,
    key_column: &'static str,
    key_value: String,
}

impl<'a> Update<'a> {
    pub fn new(table: &'a TableRef, key_column: &'static str, key_value: impl Into<String>) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            key_column,
            key_value: key_value.into(),
        }
    }

    pub fn set(mut self, column: &'static str, assignment: Assignment) -> Self {
        self.assignments.push((column, assignment));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn build(&self) -> QueryBuilder<'static, MySql> {
        let mut qb = QueryBuilder::new("UPDATE ");
        qb.push(self.table.quoted());
        qb.push(" SET ");
        let mut sets = qb.separated(", ");
        for (column, assignment) in &self.assignments {
            match assignment {
                Assignment::Value(value) => {
                    sets.push(format!("{} = ", column));
                    sets.push_bind_unseparated(value.clone());
                }
                Assignment::Null => {
                    sets.push(format!("{} = NULL", column));
                }
            }
        }
        qb.push(format!(" WHERE {} = ", self.key_column));
        qb.push_bind(self.key_value.clone());
        qb
    }
}
