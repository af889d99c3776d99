use sqlite_relationships::{demos, logging};

fn main() -> anyhow::Result<()> {
    logging::init("info")?;
    demos::many_to_many::run(&mut std::io::stdout().lock())?;
    Ok(())
}
