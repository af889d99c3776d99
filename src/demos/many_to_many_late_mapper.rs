//! Many-to-many whose join table is declared and created only after the
//! database is already open, plus the cat-to-humans backref.

use std::io::Write;

use crate::error::Result;
use crate::models::{Cat, Human};
use crate::relation::Model;
use crate::schema::Schema;
use crate::sqlite::{Database, Query, SqliteConfig};

use super::{print_cats, print_mapper};

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let schema = Schema::new()
        .add_table(Human::definition())
        .add_table(Cat::definition());
    let db = Database::open(SqliteConfig::in_memory(schema).with_echo(true))?;
    db.create_table(&Human::CATS.definition())?;

    let session = db.session();

    let mut scratches = Cat::new("Scratches");
    session.add(&mut scratches)?;
    let mut libre = Human::new("LibreLad");
    session.add(&mut libre)?;
    Human::CATS.link(&session, &libre, &scratches)?;

    let mut more = [Cat::new("Patches"), Cat::new("Wombat")];
    session.add_all(&mut more)?;
    Human::CATS.link_all(&session, &libre, &more)?;

    let mut libre_las = Human::new("LibreLas");
    session.add(&mut libre_las)?;
    Human::CATS.link(&session, &libre_las, &scratches)?;
    Human::CATS.link(&session, &libre_las, &more[1])?;

    session.commit()?;

    print_cats(out, &session, &libre)?;
    print_cats(out, &session, &libre_las)?;
    print_mapper(out, &session, false)?;

    let wombat: Cat = session.one(Query::eq("name", "Wombat"))?;
    for human in wombat.humans(&session)? {
        writeln!(out, "{} knows {}", wombat.display_name(), human.display_name())?;
    }

    session.close()
}
