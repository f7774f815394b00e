//! Command-line argument parsing for the sse-decode CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use thiserror::Error;

use crate::config::DecoderConfig;
use crate::traits::{HttpMethod, StreamRequest};

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Usage: sse-decode [OPTIONS] [URL]

Decode a text/event-stream body and print one JSON event per line.
Reads standard input when no URL is given.

Options:
  -X, --method <METHOD>  Request method (GET or POST)
  -d, --data <BODY>      Request body (implies POST)
  -H, --header <HEADER>  Extra request header, 'Name: value' (repeatable)
      --no-cr            Do not treat a bare carriage return as a line break
      --ignore-done      Keep reading after a [DONE] event
  -V, --version          Print version
  -h, --help             Print help";

/// Error type for argument parsing.
#[derive(Debug, Error, PartialEq)]
pub enum ArgsError {
    /// An option that takes a value was given without one
    #[error("Missing value for {0}")]
    MissingValue(String),

    /// Unsupported request method
    #[error("Unsupported method: {0} (expected GET or POST)")]
    InvalidMethod(String),

    /// Header without a `Name: value` shape
    #[error("Invalid header: {0} (expected 'Name: value')")]
    InvalidHeader(String),

    /// Unrecognized option
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// More than one URL
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// Request options without a URL to send them to
    #[error("{0} requires a URL")]
    RequiresUrl(String),
}

/// Where the event stream comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Read the body from standard input
    Stdin,
    /// Open an HTTP request
    Http(StreamRequest),
}

/// Options for a decode run.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeArgs {
    /// Input source
    pub source: Source,
    /// Decoder configuration
    pub config: DecoderConfig,
    /// Stop at the first `[DONE]` event
    pub stop_on_done: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Decode an event stream (default)
    Decode(DecodeArgs),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use sse_decode::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["sse-decode".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let mut url: Option<String> = None;
    let mut method: Option<HttpMethod> = None;
    let mut body: Option<String> = None;
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut config = DecoderConfig::default();
    let mut stop_on_done = true;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--no-cr" => config = config.with_allow_cr(false),
            "--ignore-done" => stop_on_done = false,
            "-X" | "--method" => {
                let value = args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                method = Some(parse_method(&value)?);
            }
            "-d" | "--data" => {
                body = Some(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?);
            }
            "-H" | "--header" => {
                let value = args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;
                headers.push(parse_header(&value)?);
            }
            "-" => {}
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(ArgsError::UnknownOption(other.to_string()));
            }
            _ => {
                if url.is_some() {
                    return Err(ArgsError::UnexpectedArgument(arg));
                }
                url = Some(arg);
            }
        }
    }

    let source = match url {
        Some(url) => {
            let method = method.unwrap_or(if body.is_some() {
                HttpMethod::Post
            } else {
                HttpMethod::Get
            });
            let mut request = StreamRequest::new(url).with_method(method);
            for (name, value) in headers {
                request = request.with_header(name, value);
            }
            if let Some(body) = body {
                request = request.with_body(body);
            }
            Source::Http(request)
        }
        None => {
            if body.is_some() {
                return Err(ArgsError::RequiresUrl("--data".to_string()));
            }
            if method.is_some() {
                return Err(ArgsError::RequiresUrl("--method".to_string()));
            }
            if !headers.is_empty() {
                return Err(ArgsError::RequiresUrl("--header".to_string()));
            }
            Source::Stdin
        }
    };

    Ok(CliCommand::Decode(DecodeArgs {
        source,
        config,
        stop_on_done,
    }))
}

fn parse_method(value: &str) -> Result<HttpMethod, ArgsError> {
    match value.to_ascii_uppercase().as_str() {
        "GET" => Ok(HttpMethod::Get),
        "POST" => Ok(HttpMethod::Post),
        _ => Err(ArgsError::InvalidMethod(value.to_string())),
    }
}

fn parse_header(value: &str) -> Result<(String, String), ArgsError> {
    match value.split_once(':') {
        Some((name, val)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), val.trim().to_string()))
        }
        _ => Err(ArgsError::InvalidHeader(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::header_value;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut full = vec!["sse-decode".to_string()];
        full.extend(args.iter().map(|a| a.to_string()));
        parse_args(full.into_iter())
    }

    fn decode_args(args: &[&str]) -> DecodeArgs {
        match parse(args) {
            Ok(CliCommand::Decode(decode)) => decode,
            other => panic!("Expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_no_args_reads_stdin() {
        let decode = decode_args(&[]);
        assert_eq!(decode.source, Source::Stdin);
        assert!(decode.config.allow_cr);
        assert!(decode.stop_on_done);
    }

    #[test]
    fn test_parse_decoder_flags() {
        let decode = decode_args(&["--no-cr", "--ignore-done"]);
        assert!(!decode.config.allow_cr);
        assert!(!decode.stop_on_done);
    }

    #[test]
    fn test_parse_url_defaults_to_get() {
        let decode = decode_args(&["https://example.com/sse"]);
        assert_eq!(
            decode.source,
            Source::Http(StreamRequest::new("https://example.com/sse"))
        );
    }

    #[test]
    fn test_parse_data_implies_post() {
        let decode = decode_args(&["-d", "{}", "-H", "Authorization: Bearer x", "https://e.com"]);
        match decode.source {
            Source::Http(request) => {
                assert_eq!(request.method, HttpMethod::Post);
                assert_eq!(request.body.as_deref(), Some("{}"));
                assert_eq!(
                    header_value(&request.headers, "authorization"),
                    Some("Bearer x")
                );
            }
            Source::Stdin => panic!("Expected HTTP source"),
        }
    }

    #[test]
    fn test_parse_explicit_method() {
        let decode = decode_args(&["-X", "post", "https://e.com"]);
        assert!(matches!(decode.source, Source::Http(r) if r.method == HttpMethod::Post));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse(&["-X"]),
            Err(ArgsError::MissingValue("-X".to_string()))
        );
        assert_eq!(
            parse(&["-X", "PUT", "u"]),
            Err(ArgsError::InvalidMethod("PUT".to_string()))
        );
        assert_eq!(
            parse(&["-H", "nocolon", "u"]),
            Err(ArgsError::InvalidHeader("nocolon".to_string()))
        );
        assert_eq!(
            parse(&["--bogus"]),
            Err(ArgsError::UnknownOption("--bogus".to_string()))
        );
        assert_eq!(
            parse(&["a", "b"]),
            Err(ArgsError::UnexpectedArgument("b".to_string()))
        );
        assert_eq!(
            parse(&["-d", "{}"]),
            Err(ArgsError::RequiresUrl("--data".to_string()))
        );
    }

    #[test]
    fn test_args_error_display() {
        assert_eq!(
            ArgsError::UnknownOption("--x".to_string()).to_string(),
            "Unknown option: --x"
        );
    }
}
