//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Profile::Development),
            "prod" | "production" | "json" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!(
                "unknown log profile '{}' (expected development or production)",
                other
            )),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Default filter when `RUST_LOG` is unset
fn default_filter(profile: Profile) -> &'static str {
    match profile {
        Profile::Development => "crm=debug",
        Profile::Production | Profile::Test => "crm=info",
    }
}

/// Initialize the logging facility
///
/// Only the first call has any effect. `RUST_LOG` overrides the profile's
/// default filter. Logs go to stderr so stdout stays free for command output.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `crm=debug`
/// - **Production**: JSON structured logs, `crm=info`
/// - **Test**: No output; use `init_test_capture()` to collect events
///
/// # Example
///
/// ```
/// use crm_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(profile)));

        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Test => {
                tracing_subscriber::registry().init();
            }
        }
    });
}
