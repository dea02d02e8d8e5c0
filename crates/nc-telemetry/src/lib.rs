//! # NC Telemetry
//!
//! Structured logging setup for processes hosting a notification center.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//!     // notification_center logs are now emitted
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NC_SERVICE_NAME` | `notification-center` | Service name attached to startup log |
//! | `NC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `NC_JSON_LOGS` | `false` | JSON formatted output |
//! | `NC_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, LoggingGuard};

use thiserror::Error;

#[doc(hidden)]
pub use tracing;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Span carrying the center label, for hosts that run several centers.
///
/// # Example
///
/// ```rust,ignore
/// let _span = nc_telemetry::center_span!("ui", phase = "startup");
/// ```
#[macro_export]
macro_rules! center_span {
    ($label:expr $(, $($field:tt)*)?) => {
        $crate::tracing::info_span!("center", center = $label $(, $($field)*)?)
    };
}
