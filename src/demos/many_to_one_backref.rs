//! Many-to-one where only the user side declares the link; the website's
//! user list is derived from the same key.

use std::io::Write;

use crate::error::Result;
use crate::models::{User, Website};
use crate::relation::Model;
use crate::sqlite::{Database, Query};

use super::many_to_one::{print_visit, schema};
use super::WEBSITE_URL;

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let db = Database::in_memory(schema())?;
    let session = db.session();

    session.add(&mut Website::new(WEBSITE_URL))?;
    let site: Website = session.one(Query::eq("id", 1))?;

    let mut users = [
        User::new("Jeff", site.id),
        User::new("Jeruska", site.id),
        User::new("Bongani", site.id),
    ];
    session.add_all(&mut users)?;

    print_visit(out, &session, "Jeff")?;
    for user in Website::USERS.load(&session, site.require_id()?)? {
        writeln!(out, "{}", user.name)?;
    }

    session.commit()?;
    session.close()
}
