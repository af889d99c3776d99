//! One-to-many navigated from both ends: person to offences, and an offence
//! back to its person.

use std::io::Write;

use crate::error::Result;
use crate::models::{Offence, Person};
use crate::sqlite::{Database, Query};

use super::one_to_many::schema;

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::in_memory(schema())?;
    let session = db.session();

    session.add(&mut Person::new("L. Lad"))?;
    let libre_lad: Person = session.one(Query::eq("name", "L. Lad"))?;

    session.add(&mut Offence::new("Farting in public.", libre_lad.id))?;
    session.add(&mut Offence::new("Looking up skirts.", libre_lad.id))?;
    session.add(&mut Offence::new("Stealing from the homeless.", libre_lad.id))?;
    session.add(&mut Offence::new("Public nudity.", None))?;

    let person: Person = session.one(Query::eq("id", 1))?;
    writeln!(out, "{}'s Offences:", person.name)?;
    for offence in person.offences(&session)? {
        writeln!(out, "offence: {}", offence.description.unwrap_or_default())?;
    }

    let offence: Offence = session.one(Query::eq("description", "Stealing from the homeless."))?;
    match offence.person(&session)? {
        Some(person) => writeln!(out, "{}", person.name)?,
        None => writeln!(out, "None")?,
    }

    session.commit()?;
    session.close()
}
