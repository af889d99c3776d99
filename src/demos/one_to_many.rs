//! One-to-many: a person and the offences that point back at them.

use std::io::Write;

use crate::error::Result;
use crate::models::{Offence, Person};
use crate::relation::Model;
use crate::schema::Schema;
use crate::sqlite::{Database, Query};

pub fn schema() -> Schema {
    Schema::new()
        .add_table(Person::definition())
        .add_table(Offence::definition())
}

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::in_memory(schema())?;
    let session = db.session();

    session.add(&mut Person::new("L. Lad"))?;

    // reads see the insert above without a commit
    let libre_lad: Person = session.one(Query::eq("name", "L. Lad"))?;

    for description in [
        "Farting in public.",
        "Looking up skirts.",
        "Stealing from the homeless.",
    ] {
        session.add(&mut Offence::new(description, libre_lad.id))?;
    }
    // no person: legal while the column is nullable
    session.add(&mut Offence::new("Public nudity.", None))?;

    let person: Person = session.one(Query::eq("id", 1))?;
    writeln!(out, "{}'s Offence:", person.name)?;
    for offence in person.offences(&session)? {
        writeln!(out, "offence: {}", offence.description.unwrap_or_default())?;
    }

    session.commit()?;
    session.close()
}
