//! Command-line argument parsing for deepresearch
//!
//! Options come first; every word from the first query word on is part of
//! the query, including words that look like flags.

use crate::cli::config::Config;
use crate::streaming::Mode;
use clap::Parser;
use std::path::PathBuf;

/// deepresearch - Ask a local deep research server a question
#[derive(Parser, Debug)]
#[command(name = "deepresearch")]
#[command(version)]
#[command(about = "Send a query to a local deep research server and print the answer", long_about = None)]
#[command(after_help = "Options are read only before the first query word. \
Use `--` to send a query that itself starts with a hyphen: deepresearch -- -x explained")]
pub struct Args {
    /// Query words, joined with single spaces
    #[arg(value_name = "QUERY", trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,

    /// Stream the answer as it is generated
    #[arg(short, long)]
    pub stream: bool,

    /// Server endpoint (overrides the configured one for the selected mode)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -v (info), -vv (debug), -vvv (trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Selected response mode
    pub fn mode(&self) -> Mode {
        if self.stream {
            Mode::Streaming
        } else {
            Mode::NonStreaming
        }
    }

    /// Endpoint to post to: `--url`, else the config's endpoint for the mode
    pub fn endpoint(&self, config: &Config) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| config.endpoint(self.mode()).to_string())
    }

    /// Log filter directive: `-v` count wins over the config level
    pub fn log_level<'a>(&self, config: &'a Config) -> &'a str {
        match self.verbose {
            0 => &config.logging.level,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::{DEFAULT_NON_STREAMING_URL, DEFAULT_STREAMING_URL};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_query_words_collected() {
        let args = parse(&["deepresearch", "what", "is", "rust"]);
        assert_eq!(args.query, vec!["what", "is", "rust"]);
        assert_eq!(args.mode(), Mode::NonStreaming);
    }

    #[test]
    fn test_no_words() {
        let args = parse(&["deepresearch"]);
        assert!(args.query.is_empty());
    }

    #[test]
    fn test_stream_flag() {
        let args = parse(&["deepresearch", "--stream", "hello", "world"]);
        assert_eq!(args.mode(), Mode::Streaming);
        assert_eq!(args.query, vec!["hello", "world"]);
    }

    #[test]
    fn test_double_dash_starts_query() {
        let args = parse(&["deepresearch", "--", "-s", "--url", "x"]);
        assert_eq!(args.mode(), Mode::NonStreaming);
        assert!(args.url.is_none());
        assert_eq!(args.query, vec!["-s", "--url", "x"]);
    }

    #[test]
    fn test_flag_like_words_after_query_stay_in_query() {
        let args = parse(&["deepresearch", "explain", "-v", "flags"]);
        assert_eq!(args.verbose, 0);
        assert_eq!(args.query, vec!["explain", "-v", "flags"]);
    }

    #[test]
    fn test_help_mentions_double_dash() {
        use clap::CommandFactory;
        let help = Args::command().render_help().to_string();
        assert!(help.contains("Use `--`"));
    }

    #[test]
    fn test_endpoint_defaults_per_mode() {
        let config = Config::default();
        assert_eq!(parse(&["deepresearch", "q"]).endpoint(&config), DEFAULT_NON_STREAMING_URL);
        assert_eq!(parse(&["deepresearch", "-s", "q"]).endpoint(&config), DEFAULT_STREAMING_URL);
    }

    #[test]
    fn test_url_override() {
        let config = Config::default();
        let args = parse(&["deepresearch", "--url", "http://host:1234/x", "q"]);
        assert_eq!(args.endpoint(&config), "http://host:1234/x");
    }

    #[test]
    fn test_log_level() {
        let config = Config::default();
        assert_eq!(parse(&["deepresearch", "q"]).log_level(&config), "warn");
        assert_eq!(parse(&["deepresearch", "-v", "q"]).log_level(&config), "info");
        assert_eq!(parse(&["deepresearch", "-vv", "q"]).log_level(&config), "debug");
        assert_eq!(parse(&["deepresearch", "-vvv", "q"]).log_level(&config), "trace");
    }
}
