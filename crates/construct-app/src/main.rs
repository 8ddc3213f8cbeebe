#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> anyhow::Result<()> {
    let args = construct_app::cli::Cli::parse();
    let configuration =
        construct_app::configuration::get_configuration().context("failed to read configuration")?;

    if let Err(e) = construct_app::tracing::init(&args, &configuration.tracing.default_directive) {
        eprintln!("Failed to start tracing: {e}");
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to create Runtime")?;
    rt.block_on(construct_app::run(args, configuration))
}
