//! Many-to-one with the website listing its users in return.

use std::io::Write;

use crate::error::Result;
use crate::models::{User, Website};
use crate::sqlite::Database;

use super::many_to_one::{print_visit, schema};
use super::WEBSITE_URL;

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::in_memory(schema())?;
    let session = db.session();

    let mut site = Website::new(WEBSITE_URL);
    session.add(&mut site)?;

    session.add(&mut User::new("Jeff", site.id))?;
    session.add(&mut User::new("Jeruska", site.id))?;
    session.add(&mut User::new("Bongani", site.id))?;

    print_visit(out, &session, "Jeff")?;
    for user in site.users(&session)? {
        writeln!(out, "{}", user.name)?;
    }

    session.commit()?;
    session.close()
}
