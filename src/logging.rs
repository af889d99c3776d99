//! Console logging for the demo binaries.
//!
//! Demo narration goes to stdout through `println!`-style writers; this
//! subscriber only carries diagnostics (statement echo, session lifecycle)
//! and writes them to stderr.
//!
//! ```text
//! RUST_LOG=sqlite_relationships=debug cargo run --bin many_to_many
//! ```

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
