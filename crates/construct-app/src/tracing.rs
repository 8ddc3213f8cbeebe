#[cfg(not(target_arch = "wasm32"))]
pub fn init(cli: &super::cli::Cli, default_directive: &str) -> anyhow::Result<()> {
    use construct_shared::telemetry::{init_tracing, TraceTarget};

    let target = if cli.is_to_std_out {
        TraceTarget::Stdout
    } else {
        TraceTarget::File
    };
    if let Some(filename) = init_tracing("construct_app", target, default_directive)? {
        eprintln!("Tracing started to file {filename:?}");
    }
    Ok(())
}
