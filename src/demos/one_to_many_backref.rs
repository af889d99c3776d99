//! Same walk as the back-populated variant, with the offences added as one
//! batch.

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

    let mut offences = [
        Offence::new("Farting in public.", libre_lad.id),
        Offence::new("Looking up skirts.", libre_lad.id),
        Offence::new("Stealing from the homeless.", libre_lad.id),
        Offence::new("Public nudity.", None),
    ];
    session.add_all(&mut offences)?;

    let person: Person = session.one(Query::eq("id", 1))?;
    writeln!(out, "{}'s Offence:", person.name)?;
    for offence in person.offences(&session)? {
        writeln!(out, "offence: {}", offence.description.unwrap_or_default())?;
    }

    let offence: Offence = session.one(Query::eq("description", "Stealing from the homeless."))?;
    if let Some(person) = offence.person(&session)? {
        writeln!(out, "{}", person.name)?;
    }

    session.commit()?;
    session.close()
}
