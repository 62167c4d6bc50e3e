//! Logger initialization.
//!
//! Submissions report progress through the `log` facade; this module installs
//! `env_logger` with either a colored console line or one JSON object per line.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Installs the global logger.
///
/// `RUST_LOG` is read first, then `level` overrides it for this crate and as
/// the global default. HTTP stack modules are capped at `Info` so request
/// internals don't drown the submission progress at `debug`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Quick debugging without CLI args
/// RUST_LOG=debug result_relay probe
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=result_relay=debug,reqwest=info result_relay batch results.jsonl
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("result_relay", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    plain_line(record.level(), record.target(), &record.args().to_string())
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)
}

/// One structured log line. `msg` is JSON-escaped; the other fields never need it.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    format!(
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        ts_millis,
        level,
        target,
        serde_json::to_string(msg).unwrap_or_else(|_| "\"\"".into())
    )
}

fn plain_line(level: Level, target: &str, msg: &str) -> String {
    let (emoji, colored_level) = match level {
        Level::Error => ("❌", level.to_string().red()),
        Level::Warn => ("⚠️", level.to_string().yellow()),
        Level::Info => ("✔️", level.to_string().green()),
        Level::Debug => ("🔍", level.to_string().blue()),
        Level::Trace => ("🔬", level.to_string().purple()),
    };
    format!("{} {} [{}] {}", emoji, target.cyan(), colored_level, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(
            1_700_000_000_000,
            Level::Warn,
            "result_relay::submit::client",
            "Server error: \"LOCKED\"\nretrying",
        );
        assert_eq!(
            line,
            r#"{"ts":1700000000000,"level":"WARN","target":"result_relay::submit::client","msg":"Server error: \"LOCKED\"\nretrying"}"#
        );

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], "Server error: \"LOCKED\"\nretrying");
        assert_eq!(parsed["level"], "WARN");
    }

    #[test]
    fn test_plain_line_carries_level_target_and_message() {
        // Color codes depend on the global override, so check the pieces
        let line = plain_line(Level::Error, "result_relay::probe", "Non-200 status code");
        assert!(line.starts_with("❌ "));
        assert!(line.contains("result_relay::probe"));
        assert!(line.contains("ERROR"));
        assert!(line.ends_with("] Non-200 status code"));

        let line = plain_line(Level::Debug, "result_relay", "Following redirect");
        assert!(line.starts_with("🔍 "));
        assert!(line.contains("DEBUG"));
    }

    #[test]
    fn test_second_init_reports_logger_error() {
        let _ = env_logger::try_init();

        // A logger is installed by now, so this one must be refused rather than panic
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Plain);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
