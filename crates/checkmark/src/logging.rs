//! Harness logging
//!
//! Logs go to stderr through `tracing-subscriber` and are only enabled when
//! `CHECKMARK_LOG` is set, so the default output of a test executable is
//! exactly its banners and diagnostics.

use crate::config::Config;
use std::io;
use tracing_subscriber::EnvFilter;

/// Filter used when `CHECKMARK_LOG` holds directives that do not parse
const FALLBACK_FILTER: &str = "checkmark=warn";

/// Install the stderr subscriber if logging is configured.
///
/// Returns whether a subscriber was installed by this call.
pub fn init(config: &Config) -> bool {
    let Some(directives) = config.log_filter.as_deref() else {
        return false;
    };

    let filter = EnvFilter::try_new(directives).unwrap_or_else(|err| {
        eprintln!("Ignoring invalid log filter \"{}\": {}", directives, err);
        EnvFilter::new(FALLBACK_FILTER)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(true)
        .without_time()
        .try_init()
        .is_ok()
}
