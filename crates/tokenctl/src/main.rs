//! `tokenctl`: configuration-time token minting.
//!
//! Produces tokens for a deployment whose runtime secret is supplied
//! explicitly, typically while writing that deployment's static configuration.
//!
//! ```text
//! TOKEN_SECRET=... tokenctl encrypt 1rTymTXw2xXa8nm7FbN53yXSmEtvR0_UR
//! tokenctl decrypt --secret ... <TOKEN>
//! ```

mod commands;
mod telemetry;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokencrypt::{TokenCipher, TokenError};

#[derive(Parser)]
#[command(name = "tokenctl", version)]
#[command(about = "Mint and open resource tokens with an explicit secret")]
struct Cli {
    /// Secret of the deployment that will decrypt the tokens.
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true, global = true)]
    secret: Option<String>,

    /// Log level for stderr diagnostics.
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt values into tokens, one per line. Reads stdin when no values are given.
    Encrypt {
        #[arg(help = "Plaintext values (resource IDs, URLs)")]
        values: Vec<String>,
    },
    /// Decrypt tokens back to plaintext, one per line. Reads stdin when no tokens are given.
    Decrypt {
        #[arg(help = "Tokens to open")]
        tokens: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;

    let secret = cli.secret.unwrap_or_default();
    let cipher = TokenCipher::new(&secret).map_err(|e| match e {
        TokenError::MissingSecret => {
            anyhow::anyhow!("no secret supplied; pass --secret or set TOKEN_SECRET")
        }
        other => anyhow::Error::new(other),
    })?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Encrypt { values } => {
            let values = commands::collect_inputs(values, stdin.lock())?;
            commands::encrypt_all(&cipher, &values, &mut stdout)?;
        }
        Command::Decrypt { tokens } => {
            let tokens = commands::collect_inputs(tokens, stdin.lock())?;
            commands::decrypt_all(&cipher, &tokens, &mut stdout)?;
        }
    }
    stdout.flush().context("failed to flush stdout")
}
