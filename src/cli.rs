//! CLI argument definitions for hpkpkit
//!
//! Uses clap for argument parsing. The short flags are the ones existing
//! HPKP helper scripts have always used.

use clap::Parser;
use std::path::PathBuf;

use hpkpkit::header::{DEFAULT_MAX_AGE, HeaderConfig, OutputMode};
use hpkpkit::pin::Pin;

/// hpkpkit - Generate an HTTP Public Key Pinning header
///
/// Computes a pin-sha256 value for every certificate (.crt, .cert, .pem),
/// certificate signing request (.csr) or private key (.key) given, and
/// prints the resulting Public-Key-Pins header. At least two files are
/// required so that the header carries a backup pin.
#[derive(Parser, Debug)]
#[command(name = "hpkpkit")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Pin the live certificate and an offline backup CSR
    hpkpkit site.crt backup.csr

    # nginx configuration line, one month, covering subdomains
    hpkpkit -n -s -m 2592000 site.crt backup.key

    # Apache configuration line with a report URI, line only
    hpkpkit -a -q -r https://example.com/hpkp-report site.crt backup.key")]
pub struct Cli {
    /// Seconds clients remember the pins (max-age)
    #[arg(short = 'm', long = "max-age", value_name = "SECONDS", default_value_t = DEFAULT_MAX_AGE)]
    pub max_age: u64,

    /// Print an nginx add_header directive
    #[arg(short = 'n', long, conflicts_with = "apache")]
    pub nginx: bool,

    /// Print an Apache Header directive
    #[arg(short = 'a', long)]
    pub apache: bool,

    /// Add a report-uri directive
    #[arg(short = 'r', long = "report-uri", value_name = "URI")]
    pub report_uri: Option<String>,

    /// Add the includeSubDomains directive
    #[arg(short = 's', long)]
    pub subdomains: bool,

    /// Print only the header line
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Emit Public-Key-Pins-Report-Only instead of Public-Key-Pins
    #[arg(long)]
    pub report_only: bool,

    /// Extract keys with the openssl executable instead of the built-in parser
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "openssl"
    )]
    pub openssl: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Certificates, CSRs or private keys to pin, in header order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.nginx {
            OutputMode::Nginx
        } else if self.apache {
            OutputMode::Apache
        } else {
            OutputMode::Plain
        }
    }

    /// Builds the header configuration once the pins are known.
    pub fn header_config(&self, pins: Vec<Pin>) -> HeaderConfig {
        HeaderConfig::builder()
            .pins(pins)
            .max_age(self.max_age)
            .include_subdomains(self.subdomains)
            .maybe_report_uri(self.report_uri.clone())
            .report_only(self.report_only)
            .output_mode(self.output_mode())
            .quiet(self.quiet)
            .build()
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
