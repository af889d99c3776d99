use crate::error::Result;
use crate::record::Record;
use crate::relation::{BelongsTo, HasOne, Link, Model};
use crate::schema::{ColumnDefinition, DataType, ForeignKey, TableDefinition};
use crate::session::Session;
use crate::sqlite::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Humanoid {
    pub id: Option<i64>,
    pub name: String,
}

impl Humanoid {
    pub const BAR_CODE: HasOne<BarCode> = HasOne::new("humanoid_id");

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn bar_code(&self, session: &Session<'_>) -> Result<Option<BarCode>> {
        Self::BAR_CODE.load(session, self.require_id()?)
    }
}

impl Model for Humanoid {
    const TABLE: &'static str = "humanoids";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id())
            .with_column(ColumnDefinition::new("name", DataType::Text).not_null())
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

/// The dependent half of the one-to-one pair; it cannot exist without its
/// [`Humanoid`].
#[derive(Debug, Clone, PartialEq)]
pub struct BarCode {
    pub id: Option<i64>,
    pub code: String,
    pub humanoid_id: i64,
}

impl BarCode {
    pub const HUMANOID: BelongsTo<Humanoid> = BelongsTo::new("humanoid_id");

    pub fn new(code: impl Into<String>, humanoid_id: i64) -> Self {
        Self {
            id: None,
            code: code.into(),
            humanoid_id,
        }
    }

    pub fn humanoid(&self, session: &Session<'_>) -> Result<Option<Humanoid>> {
        Self::HUMANOID.load(session, Some(self.humanoid_id))
    }

    /// Without `unique` the database accepts several bar codes per humanoid.
    pub fn table(link: Link, unique: bool) -> TableDefinition {
        let mut humanoid_id = link.column("humanoid_id");
        if unique {
            humanoid_id = humanoid_id.unique();
        }
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id())
            .with_column(ColumnDefinition::new("code", DataType::Text).not_null())
            .with_column(humanoid_id)
            .with_foreign_key(ForeignKey::new("humanoid_id", Humanoid::TABLE, "id"))
    }
}

impl Model for BarCode {
    const TABLE: &'static str = "bar_codes";

    fn definition() -> TableDefinition {
        Self::table(Link::Required, true)
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("code", self.code.clone().into()),
            ("humanoid_id", self.humanoid_id.into()),
        ]
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            code: record.get("code")?,
            humanoid_id: record.get("humanoid_id")?,
        })
    }
}
