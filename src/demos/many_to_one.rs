//! Many-to-one: several users share one website.

use std::io::Write;

use crate::error::{Error, Result};
use crate::models::{User, Website};
use crate::relation::Model;
use crate::schema::Schema;
use crate::session::Session;
use crate::sqlite::{Database, Query};

use super::WEBSITE_URL;

pub fn schema() -> Schema {
    Schema::new()
        .add_table(Website::definition())
        .add_table(User::definition())
}

/// Print who visited, and where to.
pub(crate) fn print_visit<W: Write>(out: &mut W, session: &Session<'_>, name: &str) -> Result<()> {
    let user: User = session.one(Query::eq("name", name))?;
    writeln!(out, "{} has been visiting", user.name)?;
    let website = user.website(session)?.ok_or(Error::NotFound {
        table: Website::TABLE,
        filter: format!("id = {:?}", user.website_id),
    })?;
    writeln!(out, "{}", website.url)?;
    Ok(())
}

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::in_memory(schema())?;
    let session = db.session();

    let mut site = Website::new(WEBSITE_URL);
    session.add(&mut site)?;

    let mut users = [
        User::new("Jeff", site.id),
        User::new("Jeruska", site.id),
        User::new("Bongani", site.id),
    ];
    session.add_all(&mut users)?;

    print_visit(out, &session, "Jeff")?;

    session.commit()?;
    session.close()
}
