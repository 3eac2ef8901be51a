mod logging;
mod settings;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use settings::{EnvironmentProvider, Settings, SettingsError, SystemEnvironment};

#[cfg(test)]
pub use settings::MockEnvironment;
