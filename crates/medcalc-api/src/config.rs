use std::net::SocketAddr;

use medcalc_calculators::form::{FormOptions, ValidationMode};
use medcalc_core::validate::TrimPolicy;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Service configuration, read from `MEDCALC_*` environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub form_options: FormOptions,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Unset variables
    /// take their defaults; set but unparseable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind = lookup("MEDCALC_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|e| eyre::eyre!("invalid MEDCALC_BIND '{bind}': {e}"))?;

        let trim = match lookup("MEDCALC_TRIM_INPUT").as_deref() {
            None | Some("true") | Some("1") => TrimPolicy::Trim,
            Some("false") | Some("0") => TrimPolicy::Preserve,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid MEDCALC_TRIM_INPUT '{other}' (expected true or false)"
                ));
            }
        };

        let validation_mode = match lookup("MEDCALC_VALIDATION_MODE").as_deref() {
            None | Some("on_submit") => ValidationMode::OnSubmit,
            Some("on_change") => ValidationMode::OnChange,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid MEDCALC_VALIDATION_MODE '{other}' (expected on_submit or on_change)"
                ));
            }
        };

        let log_format = match lookup("MEDCALC_LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid MEDCALC_LOG_FORMAT '{other}' (expected json or pretty)"
                ));
            }
        };

        Ok(Self {
            bind_addr,
            form_options: FormOptions {
                validation_mode,
                trim,
            },
            log_format,
        })
    }
}
