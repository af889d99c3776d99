//! One module per relationship walkthrough. Every `run` builds its own
//! schema in a fresh database, narrates to `out`, then commits and closes.

use std::io::Write;

use crate::error::Result;
use crate::models::Human;
use crate::relation::Model;
use crate::session::Session;
use crate::sqlite::Query;

pub mod association_object;
pub mod many_to_many;
pub mod many_to_many_delete;
pub mod many_to_many_delete_all;
pub mod many_to_many_late_mapper;
pub mod many_to_one;
pub mod many_to_one_back_populates;
pub mod many_to_one_backref;
pub mod one_to_many;
pub mod one_to_many_back_populates;
pub mod one_to_many_backref;
pub mod one_to_one;
pub mod sequence;

pub(crate) const BANNER: &str = "=================++++++++++++=================";

pub(crate) const WEBSITE_URL: &str = "https://ffetish.co/no_idea_where_this_leads";

/// Re-fetch a human and list its cats between banners.
pub(crate) fn print_cats<W: Write>(out: &mut W, session: &Session<'_>, human: &Human) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "Begin query for parent and children")?;
    let human: Human = session.one(Query::eq("id", human.require_id()?))?;
    writeln!(out, "----------------------------------------------")?;
    writeln!(out, "Human: {}'s cats:", human.display_name())?;
    for cat in human.cats(session)? {
        writeln!(
            out,
            "cat_id: {} | cat_name: {}",
            cat.require_id()?,
            cat.display_name()
        )?;
    }
    writeln!(out, "{BANNER}\n")?;
    Ok(())
}

/// Dump the `hc_mapper` join table.
pub(crate) fn print_mapper<W: Write>(out: &mut W, session: &Session<'_>, count: bool) -> Result<()> {
    let pairs = Human::CATS.pairs(session)?;
    if count {
        writeln!(out, "No. of records in mapper: {}", pairs.len())?;
    }
    for (human_id, cat_id) in pairs {
        writeln!(
            out,
            "human_id: {} | cat_id: {}",
            show(human_id),
            show(cat_id)
        )?;
    }
    Ok(())
}

fn show(key: Option<i64>) -> String {
    key.map_or_else(|| "None".to_string(), |k| k.to_string())
}
