//! `encrypt` / `decrypt` subcommands.
//!
//! The key is derived once per invocation and every value goes through the
//! same [`TokenCipher`] pipeline the server uses, so tokens minted here open
//! on any deployment configured with the same secret.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tokencrypt::TokenCipher;
use tracing::{debug, error};

/// Encrypt each value and write one token per line to `out`.
pub fn encrypt_all<W: Write>(cipher: &TokenCipher, values: &[String], out: &mut W) -> Result<()> {
    for (index, value) in values.iter().enumerate() {
        let token = cipher
            .encrypt(value)
            .with_context(|| format!("value #{} could not be sealed", index + 1))?;
        writeln!(out, "{token}")?;
    }
    debug!(count = values.len(), "tokens minted");
    Ok(())
}

/// Decrypt each token and write one plaintext per line to `out`.
///
/// Stops at the first rejected token. The error names the token's position and
/// the failure kind, never its content.
pub fn decrypt_all<W: Write>(cipher: &TokenCipher, tokens: &[String], out: &mut W) -> Result<()> {
    for (index, token) in tokens.iter().enumerate() {
        match cipher.decrypt(token.trim()) {
            Ok(plaintext) => writeln!(out, "{plaintext}")?,
            Err(e) => {
                error!(position = index + 1, kind = e.kind(), "token rejected");
                anyhow::bail!("token #{} rejected: {}", index + 1, e.kind());
            }
        }
    }
    Ok(())
}

/// Use `args` when given, otherwise read one value per line of `input`.
///
/// Line endings (`\n` or `\r\n`) are stripped and blank lines are skipped, so
/// stdin mode cannot carry an empty plaintext; pass `""` as an argument for that.
pub fn collect_inputs<R: BufRead>(args: Vec<String>, input: R) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    let mut values = Vec::new();
    for line in input.lines() {
        let mut line = line.context("failed to read stdin")?;
        if line.ends_with('\r') {
            line.pop();
        }
        if !line.is_empty() {
            values.push(line);
        }
    }
    Ok(values)
}
