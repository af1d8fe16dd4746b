use std::fmt;

use bon::Builder;
use tracing::warn;

use crate::error::{HpkpError, Result};
use crate::pin::Pin;

/// Default `max-age`, 60 days in seconds.
pub const DEFAULT_MAX_AGE: u64 = 5_184_000;

/// HPKP needs a backup pin besides the one in use.
pub const MIN_PINS: usize = 2;

pub const PUBLIC_KEY_PINS: &str = "Public-Key-Pins";
pub const PUBLIC_KEY_PINS_REPORT_ONLY: &str = "Public-Key-Pins-Report-Only";

/// How the assembled header is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The raw `Public-Key-Pins: ...` header line.
    #[default]
    Plain,
    /// An nginx `add_header` directive.
    Nginx,
    /// An Apache `Header always set` directive.
    Apache,
}

/// Everything needed to build and present one header.
///
/// Built once, from the command line or by a library caller, and never
/// mutated afterwards.
///
/// # Fields
/// * `max_age` - Seconds clients should remember the pins.
/// * `include_subdomains` - Emit `includeSubDomains`.
/// * `report_uri` - Destination for pin validation failure reports.
/// * `report_only` - Use `Public-Key-Pins-Report-Only` instead of enforcing.
/// * `pins` - The pins, in the order their files were supplied.
/// * `output_mode` - Plain, nginx or Apache rendering.
/// * `quiet` - Print only the rendered line.
#[derive(Clone, Debug, Builder)]
pub struct HeaderConfig {
    #[builder(default = DEFAULT_MAX_AGE)]
    pub max_age: u64,
    #[builder(default)]
    pub include_subdomains: bool,
    pub report_uri: Option<String>,
    #[builder(default)]
    pub report_only: bool,
    #[builder(default)]
    pub pins: Vec<Pin>,
    #[builder(default)]
    pub output_mode: OutputMode,
    #[builder(default)]
    pub quiet: bool,
}

/// An assembled header: its name and the `;`-separated directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderValue {
    name: &'static str,
    directives: String,
}

impl HeaderValue {
    /// Assembles the header from its configuration.
    ///
    /// Directives appear as: every `pin-sha256` in order, `max-age`, then
    /// `includeSubDomains` and `report-uri` when configured. The report URI is
    /// quoted verbatim.
    ///
    /// # Errors
    /// [`HpkpError::InsufficientPins`] when fewer than [`MIN_PINS`] pins are configured.
    pub fn assemble(config: &HeaderConfig) -> Result<Self> {
        if config.pins.len() < MIN_PINS {
            return Err(HpkpError::InsufficientPins {
                found: config.pins.len(),
            });
        }
        if config.pins.iter().all(|pin| *pin == config.pins[0]) {
            warn!("all pins are identical, the header carries no usable backup pin");
        }

        let mut directives: Vec<String> = config
            .pins
            .iter()
            .map(|pin| format!("pin-sha256=\"{pin}\""))
            .collect();
        directives.push(format!("max-age={}", config.max_age));
        if config.include_subdomains {
            directives.push("includeSubDomains".to_string());
        }
        if let Some(report_uri) = &config.report_uri {
            directives.push(format!("report-uri=\"{report_uri}\""));
        }

        let name = if config.report_only {
            if config.report_uri.is_none() {
                warn!("{PUBLIC_KEY_PINS_REPORT_ONLY} without report-uri has no effect");
            }
            PUBLIC_KEY_PINS_REPORT_ONLY
        } else {
            PUBLIC_KEY_PINS
        };

        Ok(Self {
            name,
            directives: directives.join("; "),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(name: &'static str, directives: &str) -> Self {
        Self {
            name,
            directives: directives.to_string(),
        }
    }

    /// The header field name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// The header field value, without the name.
    pub fn directives(&self) -> &str {
        &self.directives
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.directives)
    }
}
