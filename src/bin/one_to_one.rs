use sqlite_relationships::{demos, logging};

fn main() -> anyhow::Result<()> {
    logging::init("info")?;
    demos::one_to_one::run(&mut std::io::stdout().lock())?;
    Ok(())
}
