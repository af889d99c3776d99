use crate::error::Result;
use crate::record::Record;
use crate::relation::{BelongsTo, HasMany, Link, Model};
use crate::schema::{ColumnDefinition, DataType, ForeignKey, TableDefinition};
use crate::session::Session;
use crate::sqlite::Value;

/// A site visited by many users.
#[derive(Debug, Clone, PartialEq)]
pub struct Website {
    pub id: Option<i64>,
    pub url: String,
}

impl Website {
    pub const USERS: HasMany<User> = HasMany::new("website_id");

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
        }
    }

    pub fn users(&self, session: &Session<'_>) -> Result<Vec<User>> {
        Self::USERS.load(session, self.require_id()?)
    }
}

impl Model for Website {
    const TABLE: &'static str = "website";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id())
            .with_column(ColumnDefinition::new("url", DataType::Text).not_null())
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![("url", self.url.clone().into())]
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            url: record.get("url")?,
        })
    }
}

/// A uniquely named user; many users may point at the same [`Website`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub website_id: Option<i64>,
}

impl User {
    pub const WEBSITE: BelongsTo<Website> = BelongsTo::new("website_id");

    pub fn new(name: impl Into<String>, website_id: Option<i64>) -> Self {
        Self {
            id: None,
            name: name.into(),
            website_id,
        }
    }

    pub fn website(&self, session: &Session<'_>) -> Result<Option<Website>> {
        Self::WEBSITE.load(session, self.website_id)
    }
}

impl Model for User {
    const TABLE: &'static str = "users";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id())
            .with_column(ColumnDefinition::new("name", DataType::Text).not_null().unique())
            .with_column(Link::Optional.column("website_id"))
            .with_foreign_key(ForeignKey::new("website_id", Website::TABLE, "id"))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", self.name.clone().into()),
            ("website_id", self.website_id.into()),
        ]
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            name: record.get("name")?,
            website_id: record.get("website_id")?,
        })
    }
}
