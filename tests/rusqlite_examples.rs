use sqlite_relationships::models::{Cat, Human, Person};
use sqlite_relationships::{
    ColumnDefinition, DataType, Database, Error, Model, Query, Result, Schema, Session,
    SqliteConfig, TableDefinition,
};
use tempfile::NamedTempFile;

fn people_schema() -> Schema {
    Schema::new().add_table(Person::definition())
}

// Helper function to create an in-memory database for testing
fn create_test_db() -> Result<Database> {
    Database::in_memory(people_schema())
}

// Helper function to create a temporary file-based database
fn create_temp_db() -> Result<(Database, NamedTempFile)> {
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path().to_str().unwrap().to_string();
    let db = Database::open(SqliteConfig::new(path, people_schema()))?;
    Ok((db, temp_file))
}

fn names(session: &Session<'_>) -> Result<Vec<String>> {
    Ok(session
        .all::<Person>()?
        .into_iter()
        .map(|person| person.name)
        .collect())
}

#[test]
fn test_basic_operations() {
    test_basic_operations_impl().unwrap();
}

fn test_basic_operations_impl() -> Result<()> {
    let db = create_test_db()?;
    let session = db.session();

    // Insert a new person
    let mut person = Person::new("John Doe");
    let id = session.add(&mut person)?;
    assert_eq!(person.id, Some(id));

    // Query it back
    let fetched: Person = session.one(Query::eq("id", id))?;
    assert_eq!(fetched, person);

    // Update the person
    person.name = "Jane Doe".to_string();
    session.add(&mut person)?;
    let renamed: Option<Person> = session.get(id)?;
    assert_eq!(renamed.map(|p| p.name).as_deref(), Some("Jane Doe"));

    // Delete the person
    assert_eq!(session.delete(&person)?, 1);
    assert!(session.get::<Person>(id)?.is_none());

    session.commit()?;
    session.close()
}

#[test]
fn test_commit_survives_close() {
    test_commit_survives_close_impl().unwrap();
}

fn test_commit_survives_close_impl() -> Result<()> {
    let db = create_test_db()?;

    let session = db.session();
    session.add(&mut Person::new("Kept"))?;
    session.commit()?;
    assert!(!session.in_transaction());
    session.add(&mut Person::new("Discarded"))?;
    assert!(session.in_transaction());
    session.close()?;

    {
        let dropped = db.session();
        dropped.add(&mut Person::new("Also discarded"))?;
    }

    let session = db.session();
    assert_eq!(names(&session)?, vec!["Kept"]);
    session.close()
}

#[test]
fn test_idle_session_leaves_other_batch_alone() {
    test_idle_session_leaves_other_batch_alone_impl().unwrap();
}

fn test_idle_session_leaves_other_batch_alone_impl() -> Result<()> {
    let db = create_test_db()?;

    let writer = db.session();
    writer.add(&mut Person::new("Pending"))?;
    {
        let idle = db.session();
        assert!(!idle.in_transaction());
    }
    assert!(writer.in_transaction());
    writer.commit()?;
    writer.close()?;

    let reader = db.session();
    assert_eq!(names(&reader)?, vec!["Pending"]);
    reader.close()
}

#[test]
fn test_commit_only_finishes_own_batch() {
    test_commit_only_finishes_own_batch_impl().unwrap();
}

fn test_commit_only_finishes_own_batch_impl() -> Result<()> {
    let db = create_test_db()?;

    let writer = db.session();
    writer.add(&mut Person::new("Uncommitted"))?;

    // runs inside the writer's transaction without taking it over
    let other = db.session();
    assert_eq!(names(&other)?, vec!["Uncommitted"]);
    other.commit()?;
    other.close()?;

    assert!(writer.in_transaction());
    writer.close()?;

    let reader = db.session();
    assert!(names(&reader)?.is_empty());
    reader.close()
}

#[test]
fn test_file_database_persists_commits() {
    test_file_database_persists_commits_impl().unwrap();
}

fn test_file_database_persists_commits_impl() -> Result<()> {
    let (db, temp_file) = create_temp_db()?;
    let session = db.session();
    session.add(&mut Person::new("On disk"))?;
    session.commit()?;
    session.close()?;
    drop(db);

    let path = temp_file.path().to_str().unwrap().to_string();
    let reopened = Database::open(SqliteConfig::new(path, people_schema()))?;
    let session = reopened.session();
    assert_eq!(names(&session)?, vec!["On disk"]);
    session.close()
}

#[test]
fn test_lookup_failures() {
    let db = create_test_db().unwrap();
    let session = db.session();

    match session.one::<Person>(Query::eq("name", "Nobody")) {
        Err(Error::NotFound { table, .. }) => assert_eq!(table, "persons"),
        other => panic!("unexpected: {other:?}"),
    }

    match session.delete(&Person::new("Never added")) {
        Err(Error::Transient { table }) => assert_eq!(table, "persons"),
        other => panic!("unexpected: {other:?}"),
    }

    // a missing table is SQLite's error, passed through
    assert!(matches!(session.all::<Cat>(), Err(Error::Sqlite(_))));
}

#[test]
fn test_not_null_is_enforced() {
    let schema = Schema::new().add_table(
        TableDefinition::new("labels")
            .with_column(ColumnDefinition::id())
            .with_column(ColumnDefinition::new("text", DataType::Text).not_null()),
    );
    let db = Database::in_memory(schema).unwrap();
    let err = db
        .execute_sql(&sqlite_relationships::sqlite::SqlQuery::new(
            "INSERT INTO labels (text) VALUES (NULL)",
        ))
        .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn test_config_serializes() {
    let schema = Schema::new()
        .add_table(Human::definition())
        .add_table(Cat::definition())
        .add_table(Human::CATS.definition());
    let config = SqliteConfig::in_memory(schema).with_echo(true);

    let json = serde_json::to_string(&config).unwrap();
    let parsed: SqliteConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);

    // omitted flags fall back to their defaults
    let minimal: SqliteConfig =
        serde_json::from_str(r#"{"db_path":":memory:","schema":{"tables":[]}}"#).unwrap();
    assert!(!minimal.echo);
    assert!(minimal.foreign_keys);
}
