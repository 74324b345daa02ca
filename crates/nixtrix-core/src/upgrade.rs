//! CLI self-upgrade: version probe and reinstall
//!
//! Entirely outside the injection engine's guarantees: probes a version
//! endpoint, compares with semver, and reinstalls through cargo when a
//! newer release exists.

use anyhow::{Context, Result};
use colored::Colorize;
use semver::Version;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use url::Url;

/// Environment variable overriding the version endpoint
pub const VERSION_URL_ENV: &str = "NIXTRIX_VERSION_URL";

/// Default endpoint serving the latest released CLI version as plain text
const DEFAULT_VERSION_URL: &str =
    "https://raw.githubusercontent.com/maietta/nixtrix/main/cli/VERSION";

/// Command used to reinstall the CLI
const INSTALL_COMMAND: &str = "cargo install nixtrix-tools --force";

/// Compare the running CLI version against the latest release
/// Returns a message when the CLI is outdated
pub fn check_compatibility(cli_version: &str, latest_version: &str) -> Option<String> {
    let cli_ver = Version::parse(cli_version).ok()?;
    let latest_ver = parse_version(latest_version).ok()?;

    if cli_ver < latest_ver {
        Some(format!(
            "A newer version is available: {} (you are running {})",
            latest_ver, cli_ver
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned)
        .with_context(|| format!("Invalid version '{}'", version_str))
}

/// Fetch the latest released version from the version endpoint
pub async fn fetch_latest_version(user_agent: &str) -> Result<Version> {
    let url_str =
        std::env::var(VERSION_URL_ENV).unwrap_or_else(|_| DEFAULT_VERSION_URL.to_string());
    let url = Url::parse(&url_str).with_context(|| format!("Invalid version URL: {}", url_str))?;

    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Failed to fetch version info from {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!(
            "Failed to fetch version info from {}: HTTP {}",
            url,
            response.status()
        );
    }

    let body = response.text().await?;
    parse_version(&body)
}

/// Run the upgrade command: probe, compare, reinstall when outdated
pub async fn run(cli_version: &str) -> Result<()> {
    println!("{}", "Checking for a newer nixtrix CLI...".cyan());

    let latest = fetch_latest_version("nixtrix").await?;

    match check_compatibility(cli_version, &latest.to_string()) {
        Some(message) => {
            println!("{}", message.yellow());
            reinstall().await
        }
        None => {
            println!(
                "{} nixtrix v{} is up to date.",
                "✓".green(),
                cli_version
            );
            Ok(())
        }
    }
}

/// Reinstall the CLI through cargo, streaming build output
async fn reinstall() -> Result<()> {
    println!();
    println!("{} {}", "Running:".dimmed(), INSTALL_COMMAND.yellow());
    println!();

    let mut child = TokioCommand::new("sh")
        .arg("-c")
        .arg(INSTALL_COMMAND)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to start cargo install")?;

    let stdout = child.stdout.take().context("Failed to capture stdout")?;
    let stderr = child.stderr.take().context("Failed to capture stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    loop {
        tokio::select! {
            line = stdout_reader.next_line() => {
                match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        break;
                    }
                }
            }
            line = stderr_reader.next_line() => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.dimmed()),
                    Ok(None) => {}
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                    }
                }
            }
        }
    }

    let status = child.wait().await.context("cargo install did not finish")?;
    if !status.success() {
        anyhow::bail!("Upgrade failed: {}", INSTALL_COMMAND);
    }

    println!();
    println!("{} Upgraded to the latest version.", "✓".green());
    println!("  Run \"nixtrix --version\" to verify.");
    Ok(())
}
