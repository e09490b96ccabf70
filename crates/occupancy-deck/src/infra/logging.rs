//! Tracing subscriber setup.

use tracing::Level;

/// Install the global fmt subscriber; `debug` when verbose, `info` otherwise.
///
/// Logs go to stderr so stdout carries only the program's own messages.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let result = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
