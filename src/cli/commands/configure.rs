//! Configure command implementation
//!
//! Prompts for an API key pair and an optional base URL, then writes the
//! per-user credential store.

use crate::config::{secret_string, ClientConfig, CredentialStore, StoredCredentials};
use clap::Args;
use std::io::{self, BufRead, Write};

/// Arguments for the configure command
#[derive(Args, Debug, Default)]
pub struct ConfigureArgs {
    /// Overwrite an existing credential file without asking
    #[arg(long)]
    pub force: bool,
}

impl ConfigureArgs {
    /// Execute the configure command on the terminal
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let store = CredentialStore::at_default_location()?;
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(&store, &mut stdin.lock(), &mut stdout)
    }

    /// Runs the prompts against arbitrary input/output streams
    pub fn run_with<R: BufRead, W: Write>(
        &self,
        store: &CredentialStore,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<i32> {
        tracing::info!(path = %store.path().display(), "Configuring credentials");

        if store.exists() && !self.force {
            let answer = prompt(
                input,
                output,
                &format!(
                    "Credential file {} already exists. Overwrite? [y/N]: ",
                    store.path().display()
                ),
            )?;
            if !answer.eq_ignore_ascii_case("y") {
                writeln!(output, "Credentials unchanged.")?;
                return Ok(0);
            }
        }

        let api_key_id = prompt(input, output, "API key id: ")?;
        if api_key_id.is_empty() {
            writeln!(output, "❌ API key id cannot be empty")?;
            return Ok(1);
        }

        let api_key_secret = prompt(input, output, "API key secret: ")?;
        if api_key_secret.is_empty() {
            writeln!(output, "❌ API key secret cannot be empty")?;
            return Ok(1);
        }

        let base_url = prompt(
            input,
            output,
            &format!("Base URL [{}]: ", crate::config::DEFAULT_BASE_URL),
        )?;
        let base_url = if base_url.is_empty() {
            None
        } else {
            let candidate = ClientConfig {
                base_url: base_url.clone(),
                ..Default::default()
            };
            if let Err(e) = candidate.validate() {
                writeln!(output, "❌ {e}")?;
                return Ok(1);
            }
            Some(base_url)
        };

        let stored = StoredCredentials {
            api_key_id,
            api_key_secret: secret_string(api_key_secret),
            base_url,
        };

        match store.save(&stored) {
            Ok(()) => {
                tracing::info!(path = %store.path().display(), "Credentials saved");
                writeln!(output, "✅ Credentials saved to {}", store.path().display())?;
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save credentials");
                writeln!(output, "❌ Failed to save credentials: {e}")?;
                Ok(5)
            }
        }
    }
}

/// Writes `label` and reads one trimmed line; end of input reads as empty
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
