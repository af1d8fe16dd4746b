//! Public key extraction through an external `openssl` executable.
//!
//! Data moves through stdin/stdout pipes only; nothing is written to disk.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{Result, SpkiDer, SpkiExtractor, is_pem};
use crate::document::DocumentKind;
use crate::error::ExtractError;

/// Runs the `openssl` command line tool to extract public keys.
#[derive(Debug, Clone)]
pub struct OpensslCommand {
    program: PathBuf,
}

impl Default for OpensslCommand {
    fn default() -> Self {
        Self::new("openssl")
    }
}

impl OpensslCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Checks that the executable can be run at all.
    ///
    /// # Errors
    /// [`ExtractError::ToolUnavailable`] when the program cannot be spawned.
    pub fn probe(&self) -> Result<String> {
        let version = self.run(&["version"], &[])?;
        Ok(String::from_utf8_lossy(&version).trim().to_string())
    }

    /// Runs the tool with `input` on stdin and returns its stdout.
    fn run(&self, args: &[&str], input: &[u8]) -> Result<Vec<u8>> {
        let tool = self.program.display().to_string();
        debug!("running {} {}", tool, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExtractError::ToolUnavailable {
                tool: tool.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A tool that exits early closes its end; the exit status reports why.
            let _ = stdin.write_all(input);
        }

        let output = child
            .wait_with_output()
            .map_err(|source| ExtractError::ToolUnavailable {
                tool: tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::ToolFailed {
                tool,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl SpkiExtractor for OpensslCommand {
    fn subject_public_key_info(&self, kind: DocumentKind, bytes: &[u8]) -> Result<SpkiDer> {
        let mut args: Vec<&str> = match kind {
            DocumentKind::Certificate => vec!["x509", "-noout", "-pubkey"],
            DocumentKind::CertificateRequest => vec!["req", "-noout", "-pubkey"],
            // An empty passphrase makes encrypted keys fail instead of prompting.
            DocumentKind::PrivateKey => vec!["pkey", "-pubout", "-passin", "pass:"],
        };
        if !is_pem(bytes) {
            args.extend(["-inform", "DER"]);
        }

        let public_pem = self.run(&args, bytes)?;
        let der = self.run(&["pkey", "-pubin", "-outform", "DER"], &public_pem)?;
        Ok(der.into())
    }
}
