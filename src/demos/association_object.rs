//! Many-to-many through an association object that records when each
//! human/car link was made.

use std::io::Write;

use crate::error::Result;
use crate::models::{Car, Human, HumanCarAssociation};
use crate::relation::Model;
use crate::schema::Schema;
use crate::sqlite::{Database, Query};

pub fn schema() -> Schema {
    Schema::new()
        .add_table(Human::definition())
        .add_table(Car::definition())
        .add_table(HumanCarAssociation::definition())
}

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::in_memory(schema())?;
    let session = db.session();

    let mut libre = Human::new("Libre");
    let mut vw = Car::new("VW");
    let mut tesla = Car::new("Tesla");
    let mut libre_las = Human::new("LibreLas");
    session.add(&mut vw)?;
    session.add(&mut libre)?;
    session.add(&mut tesla)?;
    session.add(&mut libre_las)?;
    session.commit()?;

    let mut links = [
        HumanCarAssociation::new(libre.id, vw.id),
        HumanCarAssociation::new(libre.id, tesla.id),
        HumanCarAssociation::new(libre_las.id, tesla.id),
    ];
    session.add_all(&mut links)?;
    session.commit()?;

    for link in session.all::<HumanCarAssociation>()? {
        writeln!(
            out,
            "human {} : car {}",
            link.human_id.unwrap_or_default(),
            link.car_id.unwrap_or_default()
        )?;
    }

    for car in libre.cars(&session)? {
        writeln!(out, "{}", car.display_model())?;
    }

    let first: Car = session.one(Query::eq("id", 1))?;
    let drivers: Vec<String> = first
        .drivers(&session)?
        .iter()
        .map(|human| human.display_name().to_string())
        .collect();
    writeln!(out, "{} drivers: {}", first.display_model(), drivers.join(", "))?;

    session.commit()?;
    session.close()
}
