mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, ClientSettings, LogSettings, Settings};

/// Environment prefix, e.g. `CARLOC_BROKER__HOST=10.0.0.5`.
const ENV_PREFIX: &str = "CARLOC";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the broker, client and log configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    let broker = partial.broker.as_ref();
    let client = partial.client.as_ref();

    Ok(Settings {
        broker: BrokerSettings {
            host: broker
                .and_then(|b| b.host.clone())
                .unwrap_or(default.broker.host),
            port: broker.and_then(|b| b.port).unwrap_or(default.broker.port),
            keepalive_secs: broker
                .and_then(|b| b.keepalive_secs)
                .unwrap_or(default.broker.keepalive_secs),
        },
        client: ClientSettings {
            connect_timeout_secs: client
                .and_then(|c| c.connect_timeout_secs)
                .unwrap_or(default.client.connect_timeout_secs),
            poll_interval_secs: client
                .and_then(|c| c.poll_interval_secs)
                .unwrap_or(default.client.poll_interval_secs),
            publish_interval_secs: client
                .and_then(|c| c.publish_interval_secs)
                .unwrap_or(default.client.publish_interval_secs),
            clean_session: client
                .and_then(|c| c.clean_session)
                .unwrap_or(default.client.clean_session),
        },
        log: LogSettings {
            level: partial
                .log
                .and_then(|l| l.level)
                .unwrap_or(default.log.level),
        },
    })
}
