//! Table declarations and their DDL.
//!
//! A [`Schema`] is an ordered list of [`TableDefinition`]s. Each definition
//! renders to a single `CREATE TABLE IF NOT EXISTS` statement; indexes render
//! separately and are created right after their table.

use serde::{Deserialize, Serialize};

/// Schema definition for the SQLite database
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Every DDL statement needed to create the schema, in declaration order.
    pub fn create_statements(&self) -> Vec<String> {
        let mut statements = Vec::new();
        for table in &self.tables {
            statements.push(table.create_sql());
            for index in &table.indexes {
                statements.push(index.create_sql(&table.name));
            }
        }
        statements
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Append a column. Columns flagged `PrimaryKey` join the table's key.
    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        if column.has(&ColumnConstraint::PrimaryKey) {
            self.primary_key.push(column.name.clone());
        }
        self.columns.push(column);
        self
    }

    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// `None` when the column does not exist.
    pub fn is_nullable(&self, column: &str) -> Option<bool> {
        let inline_key = self.inline_primary_key();
        self.column(column)
            .map(|c| c.is_nullable() && inline_key != Some(column))
    }

    /// A lone INTEGER key column is declared inline so it aliases the rowid.
    fn inline_primary_key(&self) -> Option<&str> {
        match self.primary_key.as_slice() {
            [only] => self
                .column(only)
                .filter(|c| c.data_type == DataType::Integer)
                .map(|c| c.name.as_str()),
            _ => None,
        }
    }

    pub fn create_sql(&self) -> String {
        let inline_key = self.inline_primary_key();
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.sql(inline_key == Some(column.name.as_str())))
            .collect();

        if inline_key.is_none() && !self.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        parts.extend(self.foreign_keys.iter().map(ForeignKey::sql));

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            parts.join(",\n    ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
    pub default_value: Option<DefaultValue>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
            default_value: None,
        }
    }

    /// The conventional `id INTEGER PRIMARY KEY` column.
    pub fn id() -> Self {
        Self::new("id", DataType::Integer).primary_key()
    }

    pub fn primary_key(self) -> Self {
        self.with_constraint(ColumnConstraint::PrimaryKey)
    }

    /// Keys come from a monotonic sequence and are never reused.
    pub fn auto_increment(self) -> Self {
        self.with_constraint(ColumnConstraint::AutoIncrement)
    }

    pub fn not_null(self) -> Self {
        self.with_constraint(ColumnConstraint::NotNull)
    }

    pub fn unique(self) -> Self {
        self.with_constraint(ColumnConstraint::Unique)
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        if !self.has(&constraint) {
            self.constraints.push(constraint);
        }
        self
    }

    pub fn has(&self, constraint: &ColumnConstraint) -> bool {
        self.constraints.contains(constraint)
    }

    pub fn is_nullable(&self) -> bool {
        !self.has(&ColumnConstraint::NotNull)
    }

    fn sql(&self, inline_primary_key: bool) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.sql());
        if inline_primary_key {
            sql.push_str(" PRIMARY KEY");
            if self.has(&ColumnConstraint::AutoIncrement) {
                sql.push_str(" AUTOINCREMENT");
            }
        }
        if self.has(&ColumnConstraint::NotNull) {
            sql.push_str(" NOT NULL");
        }
        if self.has(&ColumnConstraint::Unique) {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default_value {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.sql());
        }
        sql
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Text,
    /// Length is recorded in the DDL; SQLite does not enforce it.
    Varchar(u32),
    Real,
    Blob,
    DateTime,
}

impl DataType {
    pub fn sql(&self) -> String {
        match self {
            DataType::Integer => "INTEGER".to_string(),
            DataType::Text => "TEXT".to_string(),
            DataType::Varchar(len) => format!("VARCHAR({len})"),
            DataType::Real => "REAL".to_string(),
            DataType::Blob => "BLOB".to_string(),
            DataType::DateTime => "DATETIME".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    NotNull,
    Unique,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    Integer(i64),
    Text(String),
    Real(f64),
    Null,
    CurrentTimestamp,
}

impl DefaultValue {
    fn sql(&self) -> String {
        match self {
            DefaultValue::Integer(v) => v.to_string(),
            DefaultValue::Text(v) => format!("'{}'", v.replace('\'', "''")),
            DefaultValue::Real(v) => v.to_string(),
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::CurrentTimestamp => "CURRENT_TIMESTAMP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
}

impl ForeignKey {
    pub fn new(
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
            on_delete: ForeignKeyAction::NoAction,
            on_update: ForeignKeyAction::NoAction,
        }
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }

    fn sql(&self) -> String {
        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            self.column, self.foreign_table, self.foreign_column
        );
        if self.on_delete != ForeignKeyAction::NoAction {
            sql.push_str(" ON DELETE ");
            sql.push_str(self.on_delete.sql());
        }
        if self.on_update != ForeignKeyAction::NoAction {
            sql.push_str(" ON UPDATE ");
            sql.push_str(self.on_update.sql());
        }
        sql
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForeignKeyAction {
    NoAction,
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
}

impl ForeignKeyAction {
    fn sql(&self) -> &'static str {
        match self {
            ForeignKeyAction::NoAction => "NO ACTION",
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
            ForeignKeyAction::Restrict => "RESTRICT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(name: impl Into<String>, columns: &[&str], unique: bool) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique,
        }
    }

    pub fn create_sql(&self, table: &str) -> String {
        format!(
            "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
            if self.unique { "UNIQUE " } else { "" },
            self.name,
            table,
            self.columns.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offences() -> TableDefinition {
        TableDefinition::new("offences")
            .with_column(ColumnDefinition::id().auto_increment())
            .with_column(ColumnDefinition::new("description", DataType::Varchar(50)).unique())
            .with_column(ColumnDefinition::new("person_id", DataType::Integer))
            .with_foreign_key(ForeignKey::new("person_id", "persons", "id"))
    }

    #[test]
    fn integer_key_is_declared_inline() {
        let sql = offences().create_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS offences ("));
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(sql.contains("description VARCHAR(50) UNIQUE"));
        assert!(sql.contains("FOREIGN KEY (person_id) REFERENCES persons (id)"));
        assert!(!sql.contains("ON DELETE"));
        assert!(!sql.contains("PRIMARY KEY (id)"));
    }

    #[test]
    fn composite_key_is_a_table_constraint() {
        let sql = TableDefinition::new("pairs")
            .with_column(ColumnDefinition::new("left_id", DataType::Integer).not_null())
            .with_column(ColumnDefinition::new("right_id", DataType::Integer).not_null())
            .with_primary_key(&["left_id", "right_id"])
            .create_sql();
        assert!(sql.contains("PRIMARY KEY (left_id, right_id)"));
        assert!(sql.contains("left_id INTEGER NOT NULL"));
    }

    #[test]
    fn defaults_and_actions_render() {
        let sql = TableDefinition::new("links")
            .with_column(
                ColumnDefinition::new("datetime", DataType::DateTime)
                    .with_default(DefaultValue::CurrentTimestamp),
            )
            .with_column(
                ColumnDefinition::new("label", DataType::Text)
                    .with_default(DefaultValue::Text("it's".into())),
            )
            .with_foreign_key(
                ForeignKey::new("human_id", "humans", "id")
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Restrict),
            )
            .create_sql();
        assert!(sql.contains("datetime DATETIME DEFAULT CURRENT_TIMESTAMP"));
        assert!(sql.contains("label TEXT DEFAULT 'it''s'"));
        assert!(sql.contains("ON DELETE CASCADE ON UPDATE RESTRICT"));
    }

    #[test]
    fn nullability_follows_constraints() {
        let table = offences();
        assert_eq!(table.is_nullable("person_id"), Some(true));
        assert_eq!(table.is_nullable("id"), Some(false));
        assert_eq!(table.is_nullable("nope"), None);
    }

    #[test]
    fn indexes_follow_their_table() {
        let schema = Schema::new().add_table(
            offences().with_index(IndexDefinition::new("idx_offences_person", &["person_id"], false)),
        );
        let statements = schema.create_statements();
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[1],
            "CREATE INDEX IF NOT EXISTS idx_offences_person ON offences (person_id)"
        );
        assert!(schema.table("offences").is_some());
    }
}
