//! Two otherwise identical tables, one keyed from an AUTOINCREMENT sequence
//! and one from the plain rowid. After deleting the newest row the sequence
//! keeps counting while the rowid key is handed out again.

use crate::error::Result;
use crate::record::Record;
use crate::relation::Model;
use crate::schema::{ColumnDefinition, DataType, TableDefinition};
use crate::sqlite::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct SequencedRow {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlainRow {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl SequencedRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

impl PlainRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

impl Model for SequencedRow {
    const TABLE: &'static str = "a";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id().auto_increment())
            .with_column(ColumnDefinition::new("name", DataType::Varchar(45)))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![("name", self.name.clone().into())]
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            name: record.get("name")?,
        })
    }
}

impl Model for PlainRow {
    const TABLE: &'static str = "b";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id())
            .with_column(ColumnDefinition::new("name", DataType::Varchar(45)))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![("name", self.name.clone().into())]
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            name: record.get("name")?,
        })
    }
}
