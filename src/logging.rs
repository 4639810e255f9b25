//! Logging setup helpers.

use tracing::Level;

/// Install a global `tracing` subscriber writing to stderr.
///
/// Safe to call more than once; later calls are no-ops.
pub fn setup_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
