use chrono::NaiveDateTime;

use crate::error::Result;
use crate::record::Record;
use crate::relation::{BelongsTo, Link, Model};
use crate::schema::{ColumnDefinition, DataType, DefaultValue, ForeignKey, TableDefinition};
use crate::session::Session;
use crate::sqlite::{Params, SqlQuery, Value};

use super::human::Human;

/// A car. It declares no relationships; drivers are found through the
/// association rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Car {
    pub id: Option<i64>,
    pub model: Option<String>,
}

impl Car {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: None,
            model: Some(model.into()),
        }
    }

    pub fn display_model(&self) -> &str {
        self.model.as_deref().unwrap_or("None")
    }

    /// Humans linked to this car, oldest link first.
    pub fn drivers(&self, session: &Session<'_>) -> Result<Vec<Human>> {
        let query = SqlQuery::new(
            "SELECT humans.* FROM humans \
             JOIN human_car_association ON human_car_association.human_id = humans.id \
             WHERE human_car_association.car_id = :car_id \
             ORDER BY human_car_association.id",
        )
        .with_params(Params::new().with_value("car_id", self.require_id()?));
        session.select(&query)
    }
}

impl Model for Car {
    const TABLE: &'static str = "cars";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id())
            .with_column(ColumnDefinition::new("model", DataType::Text))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![("model", self.model.clone().into())]
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            model: record.get("model")?,
        })
    }
}

/// Association object: one human/car link plus when it was made.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HumanCarAssociation {
    pub id: Option<i64>,
    /// Filled by the database on insert; `refresh` to read it back.
    pub datetime: Option<NaiveDateTime>,
    pub human_id: Option<i64>,
    pub car_id: Option<i64>,
}

impl HumanCarAssociation {
    pub const HUMAN: BelongsTo<Human> = BelongsTo::new("human_id");
    pub const CAR: BelongsTo<Car> = BelongsTo::new("car_id");

    pub fn new(human_id: Option<i64>, car_id: Option<i64>) -> Self {
        Self {
            human_id,
            car_id,
            ..Self::default()
        }
    }

    pub fn human(&self, session: &Session<'_>) -> Result<Option<Human>> {
        Self::HUMAN.load(session, self.human_id)
    }

    pub fn car(&self, session: &Session<'_>) -> Result<Option<Car>> {
        Self::CAR.load(session, self.car_id)
    }
}

impl Model for HumanCarAssociation {
    const TABLE: &'static str = "human_car_association";

    fn definition() -> TableDefinition {
        TableDefinition::new(Self::TABLE)
            .with_column(ColumnDefinition::id())
            .with_column(
                ColumnDefinition::new("datetime", DataType::DateTime)
                    .with_default(DefaultValue::CurrentTimestamp),
            )
            .with_column(Link::Optional.column("human_id"))
            .with_column(Link::Optional.column("car_id"))
            .with_foreign_key(ForeignKey::new("human_id", Human::TABLE, "id"))
            .with_foreign_key(ForeignKey::new("car_id", Car::TABLE, "id"))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        let mut values = vec![
            ("human_id", self.human_id.into()),
            ("car_id", self.car_id.into()),
        ];
        // leave the column out so its default applies
        if let Some(at) = self.datetime {
            values.push(("datetime", at.into()));
        }
        values
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.get("id")?,
            datetime: record.get("datetime")?,
            human_id: record.get("human_id")?,
            car_id: record.get("car_id")?,
        })
    }
}
