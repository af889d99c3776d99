use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::Result;
use crate::record::{Record, TIMESTAMP_FORMAT};
use crate::schema::{Schema, TableDefinition};
use crate::session::Session;

/// Path that selects a private in-memory database.
pub const MEMORY: &str = ":memory:";

/// Core value types for SQLite operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Storage class name, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Boolean(_) => "boolean",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{}", v.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use rusqlite::types::Value as Sql;

        Ok(match self {
            Value::Null => ToSqlOutput::Owned(Sql::Null),
            Value::Integer(v) => ToSqlOutput::Owned(Sql::Integer(*v)),
            Value::Real(v) => ToSqlOutput::Owned(Sql::Real(*v)),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
            Value::Boolean(v) => ToSqlOutput::Owned(Sql::Integer(i64::from(*v))),
            Value::Timestamp(v) => {
                ToSqlOutput::Owned(Sql::Text(v.format(TIMESTAMP_FORMAT).to_string()))
            }
        })
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(bytes) => Value::Text(
                std::str::from_utf8(bytes)
                    .map_err(|err| FromSqlError::Other(Box::new(err)))?
                    .to_string(),
            ),
            ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
        })
    }
}

/// Parameter bindings for SQL queries
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    pub values: HashMap<String, Value>,
}

impl Params {
    /// Create a new Params object
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a named value; `car_id` binds to `:car_id`
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        let name = if name.starts_with(':') {
            name.to_string()
        } else {
            format!(":{name}")
        };
        self.values.insert(name, value.into());
        self
    }
}

/// SQL Query with typed parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub params: Params,
}

impl SqlQuery {
    pub fn new(statement: &str) -> Self {
        Self {
            statement: statement.to_string(),
            params: Params::new(),
        }
    }
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// Query operators for building advanced queries
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Equal(Value),
    NotEqual(Value),
    GreaterThan(Value),
    GreaterThanOrEqual(Value),
    LessThan(Value),
    LessThanOrEqual(Value),
    Like(String),
    In(Vec<Value>),
    IsNull,
    IsNotNull,
}

impl QueryOperator {
    fn sql(&self, field: &str, params: &mut Vec<Value>) -> String {
        let (op, value) = match self {
            // `= NULL` never matches, compare nulls the way a reader means it
            QueryOperator::Equal(Value::Null) | QueryOperator::IsNull => {
                return format!("{field} IS NULL");
            }
            QueryOperator::NotEqual(Value::Null) | QueryOperator::IsNotNull => {
                return format!("{field} IS NOT NULL");
            }
            QueryOperator::In(values) if values.is_empty() => return "0 = 1".to_string(),
            QueryOperator::In(values) => {
                params.extend(values.iter().cloned());
                let marks = vec!["?"; values.len()].join(", ");
                return format!("{field} IN ({marks})");
            }
            QueryOperator::Equal(v) => ("=", v.clone()),
            QueryOperator::NotEqual(v) => ("<>", v.clone()),
            QueryOperator::GreaterThan(v) => (">", v.clone()),
            QueryOperator::GreaterThanOrEqual(v) => (">=", v.clone()),
            QueryOperator::LessThan(v) => ("<", v.clone()),
            QueryOperator::LessThanOrEqual(v) => ("<=", v.clone()),
            QueryOperator::Like(pattern) => ("LIKE", Value::Text(pattern.clone())),
        };
        params.push(value);
        format!("{field} {op} ?")
    }
}

/// Query builder for composable, immutable queries. Conditions are ANDed in
/// the order they were added.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pub conditions: Vec<(String, QueryOperator)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_condition(mut self, field: &str, op: QueryOperator) -> Self {
        self.conditions.push((field.to_string(), op));
        self
    }
    /// Shorthand for a single equality filter.
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::new().with_condition(field, QueryOperator::Equal(value.into()))
    }
    pub fn and_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.with_condition(field, QueryOperator::Equal(value.into()))
    }
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// ` WHERE ...` (leading space) or an empty string.
    pub fn where_clause(&self, params: &mut Vec<Value>) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|(field, op)| op.sql(field, params))
            .collect();
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// CRUD operation types
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOperation {
    pub table: String,
    pub data: Vec<(String, Value)>,
}

impl CreateOperation {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            data: Vec::new(),
        }
    }
    pub fn with_value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.data.push((column.to_string(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOperation {
    pub table: String,
    pub query: Query,
    pub fields: Option<Vec<String>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_by: Option<Vec<(String, bool)>>, // (field, is_ascending)
}

impl ReadOperation {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            query: Query::new(),
            fields: None,
            limit: None,
            offset: None,
            order_by: None,
        }
    }
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
    pub fn order_by(mut self, field: &str, ascending: bool) -> Self {
        self.order_by
            .get_or_insert_with(Vec::new)
            .push((field.to_string(), ascending));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOperation {
    pub table: String,
    pub query: Query,
    pub updates: Vec<(String, Value)>,
}

impl UpdateOperation {
    pub fn new(table: &str, query: Query) -> Self {
        Self {
            table: table.to_string(),
            query,
            updates: Vec::new(),
        }
    }
    pub fn with_value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.updates.push((column.to_string(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOperation {
    pub table: String,
    pub query: Query,
}

impl DeleteOperation {
    pub fn new(table: &str, query: Query) -> Self {
        Self {
            table: table.to_string(),
            query,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrudOperation {
    Create(CreateOperation),
    Read(ReadOperation),
    Update(UpdateOperation),
    Delete(DeleteOperation),
}

impl CrudOperation {
    pub fn table(&self) -> &str {
        match self {
            CrudOperation::Create(op) => &op.table,
            CrudOperation::Read(op) => &op.table,
            CrudOperation::Update(op) => &op.table,
            CrudOperation::Delete(op) => &op.table,
        }
    }

    /// Statement text plus positional parameters, in binding order.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let sql = match self {
            CrudOperation::Create(op) if op.data.is_empty() => {
                format!("INSERT INTO {} DEFAULT VALUES", op.table)
            }
            CrudOperation::Create(op) => {
                let columns: Vec<&str> = op.data.iter().map(|(c, _)| c.as_str()).collect();
                params.extend(op.data.iter().map(|(_, v)| v.clone()));
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    op.table,
                    columns.join(", "),
                    vec!["?"; columns.len()].join(", ")
                )
            }
            CrudOperation::Read(op) => {
                let fields = op
                    .fields
                    .as_ref()
                    .map_or_else(|| "*".to_string(), |f| f.join(", "));
                let mut sql = format!("SELECT {} FROM {}", fields, op.table);
                sql.push_str(&op.query.where_clause(&mut params));
                if let Some(order) = op.order_by.as_ref().filter(|o| !o.is_empty()) {
                    let terms: Vec<String> = order
                        .iter()
                        .map(|(field, asc)| format!("{field} {}", if *asc { "ASC" } else { "DESC" }))
                        .collect();
                    sql.push_str(&format!(" ORDER BY {}", terms.join(", ")));
                }
                match (op.limit, op.offset) {
                    (Some(limit), Some(offset)) => {
                        sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"))
                    }
                    (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
                    (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
                    (None, None) => {}
                }
                sql
            }
            CrudOperation::Update(op) => {
                let sets: Vec<String> = op.updates.iter().map(|(c, _)| format!("{c} = ?")).collect();
                params.extend(op.updates.iter().map(|(_, v)| v.clone()));
                let mut sql = format!("UPDATE {} SET {}", op.table, sets.join(", "));
                sql.push_str(&op.query.where_clause(&mut params));
                sql
            }
            CrudOperation::Delete(op) => {
                let mut sql = format!("DELETE FROM {}", op.table);
                sql.push_str(&op.query.where_clause(&mut params));
                sql
            }
        };
        (sql, params)
    }
}

/// What a [`CrudOperation`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CrudResult {
    /// Rowid assigned by an insert
    Inserted(i64),
    Rows(Vec<Record>),
    /// Rows touched by an update or delete
    Affected(usize),
}

impl CrudResult {
    pub fn inserted_id(&self) -> Option<i64> {
        match self {
            CrudResult::Inserted(id) => Some(*id),
            _ => None,
        }
    }

    pub fn into_rows(self) -> Vec<Record> {
        match self {
            CrudResult::Rows(rows) => rows,
            _ => Vec::new(),
        }
    }

    pub fn affected(&self) -> usize {
        match self {
            CrudResult::Affected(n) => *n,
            CrudResult::Inserted(_) => 1,
            CrudResult::Rows(_) => 0,
        }
    }
}

/// SQLite configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file, or [`MEMORY`]
    pub db_path: String,
    /// Schema definition for the database
    pub schema: Schema,
    /// Log every statement at INFO instead of DEBUG
    #[serde(default)]
    pub echo: bool,
    /// Enforce foreign keys (`PRAGMA foreign_keys = ON`)
    #[serde(default = "enabled")]
    pub foreign_keys: bool,
}

fn enabled() -> bool {
    true
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<String>, schema: Schema) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
            echo: false,
            foreign_keys: true,
        }
    }

    pub fn in_memory(schema: Schema) -> Self {
        Self::new(MEMORY, schema)
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_foreign_keys(mut self, enforce: bool) -> Self {
        self.foreign_keys = enforce;
        self
    }
}

/// Statement runner shared by [`Database`] and [`Session`].
#[derive(Clone, Copy)]
pub(crate) struct Executor<'c> {
    conn: &'c Connection,
    echo: bool,
}

impl<'c> Executor<'c> {
    pub(crate) fn new(conn: &'c Connection, echo: bool) -> Self {
        Self { conn, echo }
    }

    pub(crate) fn connection(&self) -> &'c Connection {
        self.conn
    }

    fn log(&self, sql: &str, params: &[Value]) {
        if self.echo {
            info!(target: "sqlite_relationships::sql", ?params, "{sql}");
        } else {
            debug!(target: "sqlite_relationships::sql", ?params, "{sql}");
        }
    }

    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.log(sql, &[]);
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    pub(crate) fn execute_crud(&self, op: &CrudOperation) -> Result<CrudResult> {
        let (sql, params) = op.to_sql();
        self.log(&sql, &params);
        let result = match op {
            CrudOperation::Create(_) => {
                self.conn.execute(&sql, params_from_iter(params.iter()))?;
                CrudResult::Inserted(self.conn.last_insert_rowid())
            }
            CrudOperation::Read(read) => {
                CrudResult::Rows(self.records(&read.table, &sql, params_from_iter(params.iter()))?)
            }
            CrudOperation::Update(update) if update.updates.is_empty() => CrudResult::Affected(0),
            CrudOperation::Update(_) | CrudOperation::Delete(_) => {
                CrudResult::Affected(self.conn.execute(&sql, params_from_iter(params.iter()))?)
            }
        };
        Ok(result)
    }

    /// Runs a raw statement with named parameters. Statements that return no
    /// columns are executed and yield no records.
    pub(crate) fn execute_sql(&self, query: &SqlQuery) -> Result<Vec<Record>> {
        let bound: Vec<Value> = query.params.values.values().cloned().collect();
        self.log(&query.statement, &bound);

        let named: Vec<(&str, &dyn ToSql)> = query
            .params
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect();

        let mut stmt = self.conn.prepare(&query.statement)?;
        if stmt.column_count() == 0 {
            stmt.execute(named.as_slice())?;
            return Ok(Vec::new());
        }
        drop(stmt);
        self.records("", &query.statement, named.as_slice())
    }

    fn records<P: rusqlite::Params>(&self, table: &str, sql: &str, params: P) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::new(table);
            for (index, name) in names.iter().enumerate() {
                record.values.insert(name.clone(), row.get::<_, Value>(index)?);
            }
            records.push(record);
        }
        Ok(records)
    }
}

/// An open SQLite database with its schema created. Plays the role of the
/// engine: sessions borrow its connection.
pub struct Database {
    config: SqliteConfig,
    conn: Connection,
}

impl Database {
    /// Connect, apply pragmas and create every table of the configured schema.
    pub fn open(config: SqliteConfig) -> Result<Self> {
        info!(
            path = %config.db_path,
            tables = config.schema.tables.len(),
            "opening sqlite database"
        );
        let conn = if config.db_path == MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.db_path)?
        };
        let db = Self { config, conn };
        // bundled builds default to ON, so OFF has to be explicit too
        let enforce = if db.config.foreign_keys { "ON" } else { "OFF" };
        db.executor()
            .execute_batch(&format!("PRAGMA foreign_keys = {enforce}"))?;
        db.create_all()?;
        Ok(db)
    }

    /// Open an in-memory database for `schema`.
    pub fn in_memory(schema: Schema) -> Result<Self> {
        Self::open(SqliteConfig::in_memory(schema))
    }

    pub(crate) fn executor(&self) -> Executor<'_> {
        Executor::new(&self.conn, self.config.echo)
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create every table in the configured schema. Existing tables are kept.
    pub fn create_all(&self) -> Result<()> {
        for statement in self.config.schema.create_statements() {
            self.executor().execute_batch(&statement)?;
        }
        Ok(())
    }

    /// Create a table that was declared after the database was opened.
    pub fn create_table(&self, table: &TableDefinition) -> Result<()> {
        self.executor().execute_batch(&table.create_sql())?;
        for index in &table.indexes {
            self.executor().execute_batch(&index.create_sql(&table.name))?;
        }
        Ok(())
    }

    /// User tables, sorted by name.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// Start a session over this database's connection.
    pub fn session(&self) -> Session<'_> {
        Session::new(self.executor())
    }

    pub fn execute_sql(&self, query: &SqlQuery) -> Result<Vec<Record>> {
        self.executor().execute_sql(query)
    }

    /// Perform a CRUD operation outside of any session.
    pub fn execute_crud(&self, op: &CrudOperation) -> Result<CrudResult> {
        self.executor().execute_crud(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDefinition, DataType};

    fn cats_schema() -> Schema {
        Schema::new().add_table(
            TableDefinition::new("cats")
                .with_column(ColumnDefinition::id().auto_increment())
                .with_column(ColumnDefinition::new("name", DataType::Text)),
        )
    }

    #[test]
    fn where_clause_binds_in_order() {
        let query = Query::eq("name", "Wombat")
            .with_condition("id", QueryOperator::In(vec![1.into(), 2.into()]))
            .with_condition("owner_id", QueryOperator::Equal(Value::Null));
        let mut params = Vec::new();
        let clause = query.where_clause(&mut params);
        assert_eq!(clause, " WHERE name = ? AND id IN (?, ?) AND owner_id IS NULL");
        assert_eq!(params, vec![Value::from("Wombat"), Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn empty_in_matches_nothing() {
        let mut params = Vec::new();
        let clause = Query::new()
            .with_condition("id", QueryOperator::In(vec![]))
            .where_clause(&mut params);
        assert_eq!(clause, " WHERE 0 = 1");
        assert!(params.is_empty());
    }

    #[test]
    fn read_operation_sql() {
        let op = CrudOperation::Read(
            ReadOperation::new("cats")
                .with_fields(&["id", "name"])
                .with_query(Query::new().with_condition("id", QueryOperator::GreaterThan(1.into())))
                .order_by("name", false)
                .with_offset(2),
        );
        let (sql, params) = op.to_sql();
        assert_eq!(
            sql,
            "SELECT id, name FROM cats WHERE id > ? ORDER BY name DESC LIMIT -1 OFFSET 2"
        );
        assert_eq!(params, vec![Value::Integer(1)]);
    }

    #[test]
    fn crud_round_trip() {
        let db = Database::in_memory(cats_schema()).unwrap();

        let id = db
            .execute_crud(&CrudOperation::Create(
                CreateOperation::new("cats").with_value("name", "Scratches"),
            ))
            .unwrap()
            .inserted_id()
            .unwrap();
        assert_eq!(id, 1);

        let blank = db
            .execute_crud(&CrudOperation::Create(CreateOperation::new("cats")))
            .unwrap();
        assert_eq!(blank.inserted_id(), Some(2));

        let renamed = db
            .execute_crud(&CrudOperation::Update(
                UpdateOperation::new("cats", Query::eq("id", 2)).with_value("name", "Patches"),
            ))
            .unwrap();
        assert_eq!(renamed.affected(), 1);

        let rows = db
            .execute_crud(&CrudOperation::Read(ReadOperation::new("cats").order_by("id", true)))
            .unwrap()
            .into_rows();
        let names: Vec<String> = rows.iter().map(|r| r.get("name").unwrap()).collect();
        assert_eq!(names, vec!["Scratches", "Patches"]);

        let removed = db
            .execute_crud(&CrudOperation::Delete(DeleteOperation::new("cats", Query::eq("id", 1))))
            .unwrap();
        assert_eq!(removed.affected(), 1);
    }

    #[test]
    fn raw_sql_with_named_params() {
        let db = Database::in_memory(cats_schema()).unwrap();
        let inserted = db
            .execute_sql(
                &SqlQuery::new("INSERT INTO cats (name) VALUES (:name)")
                    .with_params(Params::new().with_value("name", "Wombat")),
            )
            .unwrap();
        assert!(inserted.is_empty());

        let rows = db
            .execute_sql(
                &SqlQuery::new("SELECT name FROM cats WHERE name = :name")
                    .with_params(Params::new().with_value(":name", "Wombat")),
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get::<String>("name").unwrap(), "Wombat");
    }

    #[test]
    fn open_creates_schema_and_late_tables() {
        let db = Database::in_memory(cats_schema()).unwrap();
        assert_eq!(db.table_names().unwrap(), vec!["cats"]);

        db.create_table(
            &TableDefinition::new("humans").with_column(ColumnDefinition::id()),
        )
        .unwrap();
        assert_eq!(db.table_names().unwrap(), vec!["cats", "humans"]);
    }

    #[test]
    fn foreign_keys_pragma_follows_config() {
        let on = Database::in_memory(Schema::new()).unwrap();
        let enforced: i64 = on
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enforced, 1);

        let off = Database::open(SqliteConfig::in_memory(Schema::new()).with_foreign_keys(false))
            .unwrap();
        let enforced: i64 = off
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enforced, 0);
    }
}
