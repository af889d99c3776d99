//! Many-to-many through a bare join table holding only the two keys.

use std::io::Write;

use crate::error::Result;
use crate::models::{Cat, Human};
use crate::relation::Model;
use crate::schema::Schema;
use crate::sqlite::{Database, SqliteConfig};

use super::{print_cats, print_mapper};

pub fn schema() -> Schema {
    Schema::new()
        .add_table(Human::definition())
        .add_table(Cat::definition())
        .add_table(Human::CATS.definition())
}

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::open(SqliteConfig::in_memory(schema()).with_echo(true))?;
    let session = db.session();

    let mut libre = Human::new("LibreLad");
    session.add(&mut libre)?;
    let mut cats = [Cat::new("Scratches"), Cat::new("Patches"), Cat::new("Wombat")];
    session.add_all(&mut cats)?;
    Human::CATS.link_all(&session, &libre, &cats)?;

    let mut libre_las = Human::new("LibreLas");
    session.add(&mut libre_las)?;
    Human::CATS.link(&session, &libre_las, &cats[0])?;
    Human::CATS.link(&session, &libre_las, &cats[2])?;

    session.commit()?;

    print_cats(out, &session, &libre)?;
    print_cats(out, &session, &libre_las)?;
    print_mapper(out, &session, false)?;

    session.close()
}
