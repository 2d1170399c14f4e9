use std::{panic::PanicHookInfo, sync::Once};

use eyre::WrapErr;
use tracing_subscriber::{filter::FilterFn, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. Only events from this workspace's crates are kept.
/// Safe to call more than once; later calls do nothing.
#[uniffi::export]
pub fn init_logging() {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| match setup_logging() {
        Ok(()) => std::panic::set_hook(Box::new(panic_hook)),
        Err(error) => eprintln!("failed to set up logging: {error:?}"),
    })
}

fn crate_filter() -> FilterFn<impl Fn(&tracing::Metadata<'_>) -> bool> {
    FilterFn::new(|metadata| {
        metadata
            .module_path()
            .unwrap_or_default()
            .starts_with("tilepad")
    })
}

#[cfg(target_os = "android")]
fn setup_logging() -> eyre::Result<()> {
    use tracing_logcat::{LogcatMakeWriter, LogcatTag};
    use tracing_subscriber::fmt::format::Format;

    let tag = LogcatTag::Fixed("Tilepad-Rust".to_owned());
    let writer = LogcatMakeWriter::new(tag).wrap_err("failed to initialize logcat writer")?;
    let layer = tracing_subscriber::fmt::layer()
        .event_format(Format::default().with_level(false).without_time())
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(layer)
        .with(crate_filter())
        .try_init()
        .wrap_err("a global subscriber is already installed")
}

#[cfg(not(target_os = "android"))]
fn setup_logging() -> eyre::Result<()> {
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer)
        .with(crate_filter())
        .try_init()
        .wrap_err("a global subscriber is already installed")
}

fn panic_hook(info: &PanicHookInfo) {
    tracing::error!("{info}")
}
