use crate::error::Result;
use crate::record::Record;
use crate::relation::{BelongsTo, HasMany, Link, Model};
use crate::schema::{ColumnDefinition, DataType, ForeignKey, TableDefinition};
use crate::session::Session;
use crate::sqlite::Value;

/// A person with offences logged against them.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: Option<i64>,
    pub name: String,
}

impl Person {
    pub const OFFENCES: HasMany<Offence> = HasMany::new("person_id");

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn offences(&self, session: &Session<'_>) -> Result<Vec<Offence>> {
        Self::OFFENCES.load(session, self.require_id()?)
    }
}

impl Model for Person {
    const TABLE: &'static str = "persons";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id().auto_increment())
            .with_column(ColumnDefinition::new("name", DataType::Varchar(50)).not_null())
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

/// An offence, optionally logged against a [`Person`].
#[derive(Debug, Clone, PartialEq)]
pub struct Offence {
    pub id: Option<i64>,
    pub description: Option<String>,
    pub person_id: Option<i64>,
}

impl Offence {
    pub const PERSON: BelongsTo<Person> = BelongsTo::new("person_id");

    pub fn new(description: impl Into<String>, person_id: Option<i64>) -> Self {
        Self {
            id: None,
            description: Some(description.into()),
            person_id,
        }
    }

    pub fn person(&self, session: &Session<'_>) -> Result<Option<Person>> {
        Self::PERSON.load(session, self.person_id)
    }

    /// The offences table, with the person link optional or mandatory.
    pub fn table(link: Link) -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id().auto_increment())
            .with_column(ColumnDefinition::new("description", DataType::Varchar(50)).unique())
            .with_column(link.column("person_id"))
            .with_foreign_key(ForeignKey::new("person_id", Person::TABLE, "id"))
    }
}

impl Model for Offence {
    const TABLE: &'static str = "offences";

    fn definition() -> TableDefinition {
        Self::table(Link::Optional)
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("description", self.description.clone().into()),
            ("person_id", self.person_id.into()),
        ]
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            description: record.get("description")?,
            person_id: record.get("person_id")?,
        })
    }
}
