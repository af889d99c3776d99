//! Deleting a human takes every one of its join rows with it; the cats stay.

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
    let mut cats = [
        Cat::new("Scratches"),
        Cat::new("Bongo"),
        Cat::new("Savage"),
        Cat::new("ThroatKutta"),
    ];
    session.add_all(&mut cats)?;
    Human::CATS.link_all(&session, &libre, &cats)?;

    print_mapper(out, &session, true)?;

    let human: Human = session.one(Query::eq("name", "LibreLad"))?;
    session.delete(&human)?;
    session.commit()?;

    print_mapper(out, &session, true)?;

    let cat: Cat = session.one(Query::eq("id", 1))?;
    writeln!(out, "{}", cat.display_name())?;
    let humans: Vec<String> = cat
        .humans(&session)?
        .iter()
        .map(|human| human.display_name().to_string())
        .collect();
    writeln!(out, "[{}]", humans.join(", "))?;

    session.close()
}
