//! Tracing setup for native binaries
//!
//! Traces go to a Bunyan formatted file under `traces/` unless stdout is
//! requested or the file cannot be created.

use anyhow::Context;
use std::{
    fs::{create_dir_all, File},
    path::PathBuf,
};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

const TRACE_FOLDER: &str = "traces";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceTarget {
    File,
    Stdout,
}

/// Compose the layers used for file output into one subscriber.
///
/// For details acceptable Filter Directives see <https://docs.rs/tracing-subscriber/0.3.19/tracing_subscriber/filter/struct.EnvFilter.html#directives>
/// `RUST_LOG` takes precedence over `default_env_filter_directive`.
pub fn get_subscriber<Sink, S>(
    name: String,
    default_env_filter_directive: S,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    S: AsRef<str>,
{
    Registry::default()
        .with(env_filter(default_env_filter_directive))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to set logger")?;
    set_global_default(subscriber).context("Failed to set subscriber")?;
    Ok(())
}

/// Starts tracing for the whole process
///
/// Returns the path of the trace file when tracing to a file. A failure to
/// trace to a file is reported on stderr and falls back to stdout.
pub fn init_tracing(
    app_name: &str,
    target: TraceTarget,
    default_env_filter_directive: &str,
) -> anyhow::Result<Option<PathBuf>> {
    if target == TraceTarget::File {
        match init_to_file(app_name, default_env_filter_directive) {
            Ok(path) => return Ok(Some(path)),
            Err(e) => eprintln!("Failed to start logging to file: {e:#}"),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_env_filter_directive))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to start tracing. Error: {e}"))?;
    Ok(None)
}

fn init_to_file(app_name: &str, default_env_filter_directive: &str) -> anyhow::Result<PathBuf> {
    let (file, path) = create_trace_file(app_name)?;
    let subscriber = get_subscriber(app_name.into(), default_env_filter_directive, file);
    init_subscriber(subscriber).context("Failed to start tracing to file")?;
    Ok(path)
}

fn env_filter<S: AsRef<str>>(default_directive: S) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Returns a handle to the file created and the file path
pub fn create_trace_file(app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    let log_folder = PathBuf::from(TRACE_FOLDER);
    create_dir_all(&log_folder).context("Failed to create logging folder")?;

    let filename = format!(
        "{}_{app_name}.log",
        chrono::Local::now().format("%Y-%m-%dT%H-%M-%S")
    );
    let file_path = log_folder.join(&filename);
    let file = File::create(&file_path)
        .with_context(|| format!("Failed to create log file: {filename:?}"))?;
    Ok((file, file_path))
}
