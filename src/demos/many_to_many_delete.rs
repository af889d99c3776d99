//! Removing one side of a many-to-many link deletes only its join row.

use std::io::Write;

use crate::error::Result;
use crate::models::{Cat, Human};
use crate::sqlite::{Database, Query};

use super::many_to_many::schema;
use super::print_mapper;

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::in_memory(schema())?;
    let session = db.session();

    let mut libre = Human::new("LibreLad");
    session.add(&mut libre)?;
    let mut scratches = Cat::new("Scratches");
    session.add(&mut scratches)?;
    Human::CATS.link(&session, &libre, &scratches)?;
    session.commit()?;

    print_mapper(out, &session, true)?;

    let human: Human = session.one(Query::eq("name", "LibreLad"))?;
    Human::CATS.unlink(&session, &human, &scratches)?;

    print_mapper(out, &session, true)?;

    session.close()
}
