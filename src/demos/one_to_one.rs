//! One-to-one: every bar code needs a humanoid, and a humanoid carries at
//! most one bar code.

use std::io::Write;

use crate::error::Result;
use crate::models::{BarCode, Humanoid};
use crate::relation::Model;
use crate::schema::Schema;
use crate::sqlite::{Database, SqliteConfig};

pub fn schema() -> Schema {
    Schema::new()
        .add_table(Humanoid::definition())
        .add_table(BarCode::definition())
}

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::open(SqliteConfig::in_memory(schema()).with_echo(true))?;
    let session = db.session();

    let mut unit = Humanoid::new("Unit-7");
    session.add(&mut unit)?;
    let mut code = BarCode::new("0451-7734", unit.require_id()?);
    session.add(&mut code)?;
    session.commit()?;

    match unit.bar_code(&session)? {
        Some(code) => writeln!(out, "{} wears bar code {}", unit.name, code.code)?,
        None => writeln!(out, "{} has no bar code", unit.name)?,
    }
    if let Some(owner) = code.humanoid(&session)? {
        writeln!(out, "bar code {} belongs to {}", code.code, owner.name)?;
    }

    let mut second = BarCode::new("0451-9999", unit.require_id()?);
    match session.add(&mut second) {
        Ok(_) => writeln!(out, "second bar code accepted for {}", unit.name)?,
        Err(err) if err.is_constraint_violation() => {
            writeln!(out, "second bar code rejected for {}", unit.name)?
        }
        Err(err) => return Err(err),
    }

    session.commit()?;
    session.close()
}
