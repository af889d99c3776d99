use crate::error::Result;
use crate::record::Record;
use crate::relation::{HasMany, ManyToMany, Model};
use crate::schema::{ColumnDefinition, DataType, TableDefinition};
use crate::session::Session;
use crate::sqlite::Value;

use super::car::{Car, HumanCarAssociation};
use super::cat::Cat;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Human {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Human {
    /// Cats owned, through the bare `hc_mapper` join table.
    pub const CATS: ManyToMany<Human, Cat> = ManyToMany::new("hc_mapper", "human_id", "cat_id");

    /// Timestamped links to cars.
    pub const CAR_LINKS: HasMany<HumanCarAssociation> = HasMany::new("human_id");

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("None")
    }

    pub fn cats(&self, session: &Session<'_>) -> Result<Vec<Cat>> {
        Self::CATS.related(session, self.require_id()?)
    }

    pub fn car_links(&self, session: &Session<'_>) -> Result<Vec<HumanCarAssociation>> {
        Self::CAR_LINKS.load(session, self.require_id()?)
    }

    /// Cars reached through the association rows, skipping dangling links.
    pub fn cars(&self, session: &Session<'_>) -> Result<Vec<Car>> {
        let mut cars = Vec::new();
        for link in self.car_links(session)? {
            if let Some(car) = link.car(session)? {
                cars.push(car);
            }
        }
        Ok(cars)
    }
}

impl Model for Human {
    const TABLE: &'static str = "humans";

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
