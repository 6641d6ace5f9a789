//! State shared by every tool invocation.

use crate::core::config::TablesConfig;
use crate::core::database::Database;
use crate::core::security::{IdentifierError, TableRef};

/// The pool plus the validated locations of the domain tables.
///
/// Built once at startup and handed to the router and registry behind an
/// `Arc`. Tool calls share nothing else.
#[derive(Debug, Clone)]
pub struct ToolContext {
    database: Database,
    incidents: TableRef,
    knowledge_base: TableRef,
}

impl ToolContext {
    pub fn new(database: Database, tables: &TablesConfig) -> Result<Self, IdentifierError> {
        Ok(Self {
            database,
            incidents: tables.incidents_table()?,
            knowledge_base: tables.knowledge_base_table()?,
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn incidents(&self) -> &TableRef {
        &self.incidents
    }

    pub fn knowledge_base(&self) -> &TableRef {
        &self.knowledge_base
    }
}
