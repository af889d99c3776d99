use crate::error::Result;
use crate::record::Record;
use crate::relation::Model;
use crate::schema::{ColumnDefinition, DataType, TableDefinition};
use crate::session::Session;
use crate::sqlite::Value;

use super::human::Human;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cat {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Cat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("None")
    }

    /// Backref of [`Human::CATS`].
    pub fn humans(&self, session: &Session<'_>) -> Result<Vec<Human>> {
        Human::CATS.reverse(session, self.require_id()?)
    }
}

impl Model for Cat {
    const TABLE: &'static str = "cats";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id().auto_increment())
            .with_column(ColumnDefinition::new("name", DataType::Text))
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
