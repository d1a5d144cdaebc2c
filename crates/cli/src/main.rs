mod config;
mod error;
mod logging;
mod report;
mod scenario;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use config::Config;
use error::{Error, Result};
use report::{Report, SuiteReport};
use scenario::Suite;

const CONFIG_FILE: &str = "campus-guard.toml";

#[derive(Parser)]
#[command(name = "campus-guard")]
#[command(about = "Verify school write rules and check link safety", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./campus-guard.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rule verification scenarios
    Verify {
        /// Scenario files (defaults to every suite in the scenario directory)
        files: Vec<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify URLs as safe or unsafe to render as links
    CheckUrl {
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Verify { files, json } => cmd_verify(&config, files, json),
        Commands::CheckUrl { urls } => cmd_check_url(&urls),
    }
}

fn cmd_verify(config: &Config, files: Vec<PathBuf>, json: bool) -> Result<()> {
    let files = suite_files(config, files)?;

    let mut report = Report::default();
    for path in files {
        tracing::info!(path = %path.display(), "running suite");
        let suite = Suite::load(&path)?;
        report.suites.push(SuiteReport {
            outcomes: suite.run(),
            path,
        });
    }

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        report.write_text(&mut stdout)?;
    }

    match report.failed() {
        0 => Ok(()),
        failed => Err(Error::ScenariosFailed {
            failed,
            total: report.total(),
        }),
    }
}

/// The suites to run: `files` if given, otherwise every suite in the
/// configured scenario directory.
fn suite_files(config: &Config, files: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    if !files.is_empty() {
        return Ok(files);
    }

    let dir = &config.verify.scenario_dir;
    let found = scenario::discover(dir)?;
    if found.is_empty() {
        return Err(Error::NoScenarios { dir: dir.clone() });
    }
    Ok(found)
}

fn cmd_check_url(urls: &[String]) -> Result<()> {
    check_urls(urls, &mut io::stdout().lock())
}

/// Write one verdict line per URL. Fails with [`Error::UnsafeLinks`] if any
/// URL is unsafe, after every line is written.
fn check_urls(urls: &[String], out: &mut impl Write) -> Result<()> {
    let mut unsafe_count = 0;

    for url in urls {
        let verdict = links::classify(url);
        let label = if verdict.is_safe() {
            "SAFE  "
        } else {
            unsafe_count += 1;
            "UNSAFE"
        };
        writeln!(out, "{label}  {url}  ({verdict})")?;
    }

    match unsafe_count {
        0 => Ok(()),
        count => Err(Error::UnsafeLinks { count }),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    load_config_from(path, Path::new(CONFIG_FILE))
}

/// Load `path` if given, else `default` if it exists, else built-in defaults.
fn load_config_from(path: Option<&Path>, default: &Path) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None if default.exists() => Ok(Config::load(default)?),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, LogFormat};

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|url| url.to_string()).collect()
    }

    #[test]
    fn test_check_urls_all_safe() {
        let mut out = Vec::new();
        check_urls(&urls(&["https://example.com", "/files/a.pdf"]), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.starts_with("SAFE  ")));
        assert!(lines[0].contains("https://example.com"));
    }

    #[test]
    fn test_check_urls_counts_unsafe() {
        let mut out = Vec::new();
        let err = check_urls(
            &urls(&["javascript:alert(1)", "https://example.com", "data:text/html,x"]),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsafeLinks { count: 2 }));
        assert_eq!(err.to_string(), "2 unsafe link(s)");

        let out = String::from_utf8(out).unwrap();
        let labels: Vec<&str> = out.lines().map(|line| &line[..6]).collect();
        assert_eq!(labels, ["UNSAFE", "SAFE  ", "UNSAFE"]);
    }

    #[test]
    fn test_load_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(None, &dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.verify.scenario_dir, PathBuf::from("scenarios"));
    }

    #[test]
    fn test_load_config_reads_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join(CONFIG_FILE);
        std::fs::write(&default, "[logging]\nformat = \"json\"\n").unwrap();

        let config = load_config_from(None, &default).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join(CONFIG_FILE);
        std::fs::write(&default, "").unwrap();

        let err = load_config_from(Some(&dir.path().join("absent.toml")), &default).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Io(_))));
    }

    #[test]
    fn test_suite_files_prefers_explicit_files() {
        let config = Config::default();
        let files = suite_files(&config, vec![PathBuf::from("x.toml")]).unwrap();
        assert_eq!(files, vec![PathBuf::from("x.toml")]);
    }

    #[test]
    fn test_suite_files_discovers_scenario_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.verify.scenario_dir = dir.path().to_path_buf();

        let err = suite_files(&config, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NoScenarios { .. }));

        std::fs::write(dir.path().join("homework.toml"), "").unwrap();
        let files = suite_files(&config, Vec::new()).unwrap();
        assert_eq!(files, vec![dir.path().join("homework.toml")]);
    }
}
