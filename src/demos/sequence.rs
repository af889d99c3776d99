//! AUTOINCREMENT sequence versus plain rowid keys, in a database file.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::{PlainRow, SequencedRow};
use crate::relation::Model;
use crate::schema::Schema;
use crate::sqlite::{Database, SqliteConfig};

pub fn schema() -> Schema {
    Schema::new()
        .add_table(SequencedRow::definition())
        .add_table(PlainRow::definition())
}

/// Run in a scratch directory of its own, removed afterwards.
pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let dir = tempfile::Builder::new()
        .prefix("sqlite_relationships_sequence")
        .tempdir()?;
    run_at(&dir.path().join("sequence.db"), out)
}

/// Run against the database file at `path`, starting from an empty file.
pub fn run_at<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    remove(path)?;
    let db = Database::open(SqliteConfig::new(path.to_string_lossy(), schema()).with_echo(true))?;
    let session = db.session();

    let mut sequenced = Vec::new();
    let mut plain = Vec::new();
    for name in ["first", "second", "third"] {
        let mut a = SequencedRow::new(name);
        session.add(&mut a)?;
        sequenced.push(a);
        let mut b = PlainRow::new(name);
        session.add(&mut b)?;
        plain.push(b);
    }

    if let (Some(a), Some(b)) = (sequenced.last(), plain.last()) {
        session.delete(a)?;
        session.delete(b)?;
    }
    session.add(&mut SequencedRow::new("fourth"))?;
    session.add(&mut PlainRow::new("fourth"))?;
    session.commit()?;

    for row in session.all::<SequencedRow>()? {
        print_row(out, SequencedRow::TABLE, row.id, row.name.as_deref())?;
    }
    for row in session.all::<PlainRow>()? {
        print_row(out, PlainRow::TABLE, row.id, row.name.as_deref())?;
    }

    session.close()
}

fn print_row<W: Write>(out: &mut W, table: &str, id: Option<i64>, name: Option<&str>) -> Result<()> {
    writeln!(
        out,
        "{table}: id={} name={}",
        id.unwrap_or_default(),
        name.unwrap_or("None")
    )?;
    Ok(())
}

fn remove(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed database file");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
