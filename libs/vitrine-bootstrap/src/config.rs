use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main application configuration with strongly-typed global sections and a
/// flexible per-remote bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Shell behavior (default tenant/module, simulated switch latency).
    pub shell: ShellConfig,
    /// Remote discovery and load bounds.
    pub loader: LoaderConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Per-remote delivery overrides: remote name -> entry.
    #[serde(default)]
    pub remotes: HashMap<String, RemoteEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    pub default_tenant: String,
    pub default_module: String,
    #[serde(default = "default_switch_latency_ms")]
    pub tenant_switch_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    pub max_attempts: u32,
    pub interval_ms: u64,
    pub init_timeout_ms: u64,
}

/// Per-remote delivery tuning. A disabled remote never registers, which is
/// how the failure boundary can be demonstrated end to end.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteEntry {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit
/// subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Section {
    pub console_level: String, // "trace" | "debug" | "info" | "warn" | "error" | "off"
}

fn default_true() -> bool {
    true
}

fn default_switch_latency_ms() -> u64 {
    500
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_tenant: "electronics-hub".to_string(),
            default_module: "storefront".to_string(),
            tenant_switch_latency_ms: default_switch_latency_ms(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval_ms: 250,
            init_timeout_ms: 5000,
        }
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shell: ShellConfig::default(),
            loader: LoaderConfig::default(),
            logging: Some(default_logging_config()),
            remotes: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults -> YAML file ->
    /// environment variables (`VITRINE__SHELL__DEFAULT_TENANT=...`).
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        // Optional sections start as None so they stay None unless the
        // YAML/env layers provide them.
        let base = AppConfig {
            shell: ShellConfig::default(),
            loader: LoaderConfig::default(),
            logging: None,
            remotes: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            .merge(Env::prefixed("VITRINE__").split("__"));

        let config: AppConfig = figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())?;

        Ok(config)
    }

    /// Load configuration from file or create with default values.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(tenant) = &args.tenant {
            self.shell.default_tenant = tenant.clone();
        }

        // Verbose flags raise the "default" console level.
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            default_section.console_level = match args.verbose {
                0 => default_section.console_level.clone(), // keep
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
        }
    }

    /// Effective delivery delay for a remote, falling back to `default_ms`.
    pub fn remote_delay_ms(&self, name: &str, default_ms: u64) -> u64 {
        self.remotes
            .get(name)
            .and_then(|e| e.delay_ms)
            .unwrap_or(default_ms)
    }

    /// Whether a remote's delivery should be spawned at all.
    pub fn remote_enabled(&self, name: &str) -> bool {
        self.remotes.get(name).map(|e| e.enabled).unwrap_or(true)
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub tenant: Option<String>,
    pub print_config: bool,
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_discovery_and_routing() {
        let config = AppConfig::default();
        assert_eq!(config.shell.default_tenant, "electronics-hub");
        assert_eq!(config.loader.max_attempts, 20);
        assert_eq!(config.loader.interval_ms, 250);
        assert!(config.remote_enabled("storefront"));
        assert_eq!(config.remote_delay_ms("storefront", 150), 150);
    }

    #[test]
    fn yaml_roundtrip_preserves_sections() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("default_tenant"));
        assert!(yaml.contains("max_attempts"));
    }

    #[test]
    fn cli_overrides_tenant_and_verbosity() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliArgs {
            tenant: Some("book-corner".to_string()),
            verbose: 2,
            ..CliArgs::default()
        });
        assert_eq!(config.shell.default_tenant, "book-corner");
        assert_eq!(
            config.logging.unwrap().get("default").unwrap().console_level,
            "trace"
        );
    }

    #[test]
    fn remote_entries_gate_and_tune_delivery() {
        let mut config = AppConfig::default();
        config.remotes.insert(
            "analytics".to_string(),
            RemoteEntry {
                enabled: false,
                delay_ms: Some(900),
            },
        );
        assert!(!config.remote_enabled("analytics"));
        assert_eq!(config.remote_delay_ms("analytics", 150), 900);
        assert!(config.remote_enabled("orders"));
    }

    #[test]
    fn remote_entry_defaults_from_partial_yaml() {
        let entry: RemoteEntry = serde_yaml::from_str("delay_ms: 40").unwrap();
        assert!(entry.enabled);
        assert_eq!(entry.delay_ms, Some(40));
    }
}
