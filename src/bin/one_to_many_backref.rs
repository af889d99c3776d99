use sqlite_relationships::{demos, logging};

fn main() -> anyhow::Result<()> {
    logging::init("info")?;
    demos::one_to_many_backref::run(&mut std::io::stdout().lock())?;
    Ok(())
}
