//! hpkpkit CLI - HTTP Public Key Pinning header generator
//!
//! Thin command line wrapper around the hpkpkit library.

mod cli;

use clap::{CommandFactory, Parser};
use cli::Cli;
use hpkpkit::error::{HpkpError, Result};
use hpkpkit::extract::{OpensslCommand, RustCryptoExtractor, SpkiExtractor};
use hpkpkit::header::MIN_PINS;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // A lone `?` is the traditional alias for help.
    let args: Vec<_> = std::env::args_os().skip(1).collect();
    if args.len() == 1 && args[0] == "?" {
        let _ = Cli::command().print_help();
        std::process::exit(0);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are not errors.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Logs go to stderr so stdout only ever carries the header.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("hpkpkit: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.files.len() < MIN_PINS {
        return Err(HpkpError::Usage(format!(
            "at least {} files are required, got {} (see --help)",
            MIN_PINS,
            cli.files.len()
        )));
    }

    let extractor: Box<dyn SpkiExtractor> = match &cli.openssl {
        Some(program) => {
            let openssl = OpensslCommand::new(program);
            let version = openssl
                .probe()
                .map_err(|_| HpkpError::MissingDependency {
                    tool: program.display().to_string(),
                })?;
            info!("using {}", version);
            Box::new(openssl)
        }
        None => Box::new(RustCryptoExtractor),
    };

    let pins = hpkpkit::pins_for_files(extractor.as_ref(), &cli.files)?;
    let config = cli.header_config(pins);
    print!("{}", hpkpkit::generate(&config)?);
    Ok(())
}
