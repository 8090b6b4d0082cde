//! Tracing / logging initialisation.

use std::collections::BTreeMap;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level per component.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    pub level: String,
    /// Override per component: component_name → level
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// CLI defaults: `info`, or `debug` for the logscope crates when verbose.
    pub fn for_cli(verbose: bool, json: bool) -> Self {
        let mut config = Self {
            json,
            ..Self::default()
        };
        if verbose {
            for component in ["logscope-pipeline", "logscope-evm", "logscope-rpc"] {
                config.components.insert(component.into(), "debug".into());
            }
        }
        config
    }

    /// Filter directives, e.g. `"info,logscope_pipeline=debug"`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Initialise tracing once at startup. `RUST_LOG`, when set, replaces the
/// configured directives. Output goes to stderr.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives() {
        assert_eq!(LogConfig::default().directives(), "info");
    }

    #[test]
    fn verbose_enables_debug_for_logscope_crates() {
        let d = LogConfig::for_cli(true, false).directives();
        assert_eq!(
            d,
            "info,logscope_evm=debug,logscope_pipeline=debug,logscope_rpc=debug"
        );
        assert!(EnvFilter::try_new(&d).is_ok());
    }
}
