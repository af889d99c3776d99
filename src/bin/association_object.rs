use sqlite_relationships::{demos, logging};

fn main() -> anyhow::Result<()> {
    logging::init("info")?;
    demos::association_object::run(&mut std::io::stdout().lock())?;
    Ok(())
}
