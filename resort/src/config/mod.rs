//! Layered configuration.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`RESORT_*`)
//! 3. Local site config (`resort.local.yaml`)
//! 4. Site config (`resort.yaml`)
//! 5. User config (`<data_dir>/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use resort::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/resort"))
//!     .build()
//!     .unwrap();
//! println!("uploads capped at {} bytes", config.max_upload_bytes());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    Config, NotificationsConfig, OutputFormat, UploadsConfig, DEFAULT_LOCK_WAIT_SECONDS,
    DEFAULT_RESORT_NAME,
};
pub use validator::{ConfigValidator, MAX_UPLOAD_LIMIT};
