use sqlite_relationships::{demos, logging};

fn main() -> anyhow::Result<()> {
    logging::init("info")?;
    demos::many_to_many_late_mapper::run(&mut std::io::stdout().lock())?;
    Ok(())
}
