use std::io;

use anyhow::Context;

use cellstock_cli::{CliConfig, Session};

fn main() -> anyhow::Result<()> {
    let (config, problems) = CliConfig::from_env();
    cellstock_observability::init(config.log_format);
    for problem in &problems {
        tracing::warn!(%problem, "ignoring invalid configuration value");
    }

    let stdin = io::stdin();
    let mut session = Session::new(config);
    session
        .run(stdin.lock(), io::stdout().lock(), io::stderr())
        .context("failed to process commands")?;

    Ok(())
}
