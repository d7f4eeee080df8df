use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;

use lottery_core::ball::{ball_label, BallColor};
use lottery_core::config::{ConfigError, LotteryConfig};
use lottery_core::dispatch::DrawDispatcher;
use lottery_core::draw::{DrawRequest, DrawRequestError, DEFAULT_MAX_NUMBER};
use lottery_core::local::LocalDrawSource;
use lottery_core::presenter::DrawPresenter;
use lottery_core::service::{RandomService, RANDOM_ORG_ENDPOINT};

/// Extra time the CLI waits beyond the transport timeout before giving up.
const WAIT_GRACE: Duration = Duration::from_secs(5);

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "random_lottery",
    about = "Draw six unique lottery numbers from random.org or a local generator"
)]
struct Cli {
    /// Inclusive upper bound of the draw (the lower bound is always 1)
    #[arg(long, default_value_t = DEFAULT_MAX_NUMBER, value_parser = clap::value_parser!(u32).range(6..=99))]
    max: u32,
    /// Draw locally instead of calling random.org
    #[arg(long)]
    local: bool,
    /// Seed for the local generator
    #[arg(long, requires = "local")]
    seed: Option<u64>,
    /// random.org API key
    #[arg(long, env = "RANDOM_ORG_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// JSON-RPC endpoint
    #[arg(long, env = "RANDOM_LOTTERY_ENDPOINT", default_value = RANDOM_ORG_ENDPOINT)]
    endpoint: String,
    /// Request timeout in seconds
    #[arg(long, env = "RANDOM_LOTTERY_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
    /// Print the draw as JSON
    #[arg(long)]
    json: bool,
    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug)]
enum CliError {
    InvalidRequest(DrawRequestError),
    Config(ConfigError),
    DrawFailed(String),
    NoAnswer(Duration),
    Output(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidRequest(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::DrawFailed(message) => write!(f, "{message}"),
            CliError::NoAnswer(waited) => {
                write!(f, "no answer after {}s", waited.as_secs())
            }
            CliError::Output(message) => write!(f, "failed to write output: {message}"),
        }
    }
}

impl From<DrawRequestError> for CliError {
    fn from(err: DrawRequestError) -> Self {
        CliError::InvalidRequest(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

#[derive(Serialize)]
struct DrawReport<'a> {
    source: &'a str,
    min: u32,
    max: u32,
    numbers: &'a [u32],
}

// ── main ───────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let request = DrawRequest::lottery(cli.max)?;
    let service = select_service(cli)?;

    let mut presenter = DrawPresenter::default();
    let mut dispatcher = DrawDispatcher::new(service);
    dispatcher.request(&mut presenter, request);

    let waited = Duration::from_secs(cli.timeout_secs) + WAIT_GRACE;
    if !dispatcher.wait(&mut presenter, waited) {
        return Err(CliError::NoAnswer(waited));
    }
    if let Some(alert) = presenter.alert() {
        return Err(CliError::DrawFailed(alert.message.clone()));
    }

    if cli.json {
        let report = DrawReport {
            source: dispatcher.service_name(),
            min: request.min,
            max: request.max,
            numbers: presenter.numbers(),
        };
        let line =
            serde_json::to_string(&report).map_err(|err| CliError::Output(err.to_string()))?;
        println!("{line}");
    } else {
        println!("{}", render_balls(presenter.numbers(), !cli.no_color));
    }
    Ok(())
}

fn select_service(cli: &Cli) -> Result<Arc<dyn RandomService>, CliError> {
    if cli.local {
        return Ok(Arc::new(local_source(cli.seed)));
    }
    let api_key = cli.api_key.clone().unwrap_or_default();
    let config = match LotteryConfig::new(api_key) {
        Ok(config) => config,
        Err(ConfigError::MissingApiKey) => {
            eprintln!("warning: {}; drawing locally", ConfigError::MissingApiKey);
            return Ok(Arc::new(local_source(cli.seed)));
        }
        Err(err) => return Err(err.into()),
    };
    let config = config
        .with_endpoint(&cli.endpoint)?
        .with_timeout(Duration::from_secs(cli.timeout_secs))?;
    remote_service(&config)
}

#[cfg(feature = "https")]
fn remote_service(config: &LotteryConfig) -> Result<Arc<dyn RandomService>, CliError> {
    let service = lottery_core::service::RandomOrgService::from_config(config)
        .map_err(|err| CliError::DrawFailed(err.to_string()))?;
    Ok(Arc::new(service))
}

#[cfg(not(feature = "https"))]
fn remote_service(_config: &LotteryConfig) -> Result<Arc<dyn RandomService>, CliError> {
    eprintln!("warning: built without https support; drawing locally");
    Ok(Arc::new(LocalDrawSource::from_entropy()))
}

fn local_source(seed: Option<u64>) -> LocalDrawSource {
    match seed {
        Some(seed) => LocalDrawSource::seeded(seed),
        None => LocalDrawSource::from_entropy(),
    }
}

// ── rendering ──────────────────────────────────────────────────────

fn render_balls(numbers: &[u32], color: bool) -> String {
    numbers
        .iter()
        .map(|&number| render_ball(number, color))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_ball(number: u32, color: bool) -> String {
    let label = ball_label(number);
    if !color {
        return format!("[{label}]");
    }
    let [r, g, b] = BallColor::for_number(number).rgb();
    format!("\x1b[48;2;{r};{g};{b}m\x1b[30m {label} \x1b[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_pads_numbers() {
        assert_eq!(render_balls(&[1, 2, 3, 5, 7, 59], false), "[01] [02] [03] [05] [07] [59]");
        assert_eq!(render_balls(&[0, 0], false), "[??] [??]");
    }

    #[test]
    fn colored_rendering_uses_ball_palette() {
        let rendered = render_ball(23, true);
        assert!(rendered.starts_with("\x1b[48;2;255;0;204m"));
        assert!(rendered.contains(" 23 "));
        assert!(rendered.ends_with("\x1b[0m"));
    }

    #[test]
    fn max_is_bounded_by_ball_range() {
        assert!(Cli::try_parse_from(["random_lottery", "--max", "5"]).is_err());
        assert!(Cli::try_parse_from(["random_lottery", "--max", "100"]).is_err());
        let cli = Cli::try_parse_from(["random_lottery", "--max", "6", "--local"]).unwrap();
        assert_eq!(cli.max, 6);
    }

    #[test]
    fn seed_requires_local() {
        assert!(Cli::try_parse_from(["random_lottery", "--seed", "3"]).is_err());
    }

    #[test]
    fn local_run_prints_a_draw() {
        let cli = Cli::try_parse_from([
            "random_lottery",
            "--local",
            "--seed",
            "11",
            "--max",
            "59",
            "--no-color",
        ])
        .unwrap();
        assert!(run(&cli).is_ok());
    }
}
