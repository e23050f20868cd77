// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Command line handling

use std::io::Write;

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::session::{LineReader, Session};

/// Exit status for a normal end of session, `--help` and `--version`
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for usage and fatal errors
pub const EXIT_FAILURE: u8 = 1;

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    /// Browse starting at this URL
    Fetch(String),
}

/// Parse the arguments after the program name.
///
/// `--help` takes precedence over `--version`, which takes precedence over a
/// missing or extra URL. `--` ends option processing.
pub fn parse_args<I, S>(program: &str, args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut help = false;
    let mut version = false;
    let mut positional = Vec::new();
    let mut options_done = false;

    for arg in args {
        let arg = arg.as_ref();

        if options_done || !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_string());
            continue;
        }

        match arg {
            "--" => options_done = true,
            "--help" | "-h" => help = true,
            "--version" | "-V" => version = true,
            option => {
                return Err(Error::usage(format!(
                    "{}: unrecognized option '{}'\nTry `{} --help' for more information.",
                    program, option, program
                )))
            }
        }
    }

    if help {
        return Ok(Command::Help);
    }
    if version {
        return Ok(Command::Version);
    }

    match <[String; 1]>::try_from(positional) {
        Ok([url]) => Ok(Command::Fetch(url)),
        Err(_) => Err(Error::usage(format!("Usage: {} [OPTION]... URL", program))),
    }
}

/// Run the program for `args` and return its exit status.
///
/// Documents and `--help`/`--version` output go to `out`; usage errors,
/// per-request errors and the final `Fatal error:` line go to `err`.
pub async fn run<A, S, R, O, E>(
    program: &str,
    args: A,
    config: HttpClientConfig,
    input: R,
    mut out: O,
    mut err: E,
) -> u8
where
    A: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: LineReader,
    O: Write,
    E: Write,
{
    let url = match parse_args(program, args) {
        Ok(Command::Help) => {
            let _ = write!(out, "{}", help(program));
            return EXIT_SUCCESS;
        }
        Ok(Command::Version) => {
            let _ = writeln!(out, "{} {}", env!("CARGO_PKG_NAME"), crate::VERSION);
            return EXIT_SUCCESS;
        }
        Ok(Command::Fetch(url)) => url,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            return EXIT_FAILURE;
        }
    };

    let result = match HttpClient::with_config(config) {
        Ok(client) => {
            let mut session = Session::new(client, input, &mut out, &mut err);
            session.run(&url).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Session ended with an error");
            let _ = out.flush();
            let _ = writeln!(err, "Fatal error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Usage text for `--help`
pub fn help(program: &str) -> String {
    format!(
        r#"Usage: {program} [OPTION]... URL
Browse the TTYML document at URL in the terminal.

Lines are printed as they arrive. When a document contains a form, each of
its prompts is read from standard input and the answers are submitted to
the form's action; the response is browsed in turn. End of input ends the
session.

OPTIONS:
    -h, --help       Display this help and exit
    -V, --version    Display version information and exit

ENVIRONMENT:
    RUST_LOG         Diagnostic log filter (default: ttyml=warn)
    HTTPS_PROXY      Proxy for HTTPS requests
    HTTP_PROXY       Proxy for HTTP requests
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args("ttyml", args)
    }

    #[test]
    fn test_url() {
        assert_eq!(
            parse(&["http://h/"]).unwrap(),
            Command::Fetch("http://h/".to_string())
        );
        assert_eq!(
            parse(&["--", "-odd"]).unwrap(),
            Command::Fetch("-odd".to_string())
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
        assert_eq!(parse(&["--version", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version", "a", "b"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_usage_errors() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Usage: ttyml [OPTION]... URL");
        assert!(matches!(parse(&["a", "b"]), Err(Error::Usage(_))));

        let err = parse(&["--bogus", "http://h/"]).unwrap_err();
        assert!(err.to_string().contains("unrecognized option '--bogus'"));
        assert!(err.to_string().contains("--help"));
    }

    #[test]
    fn test_help_text() {
        assert!(help("ttyml").starts_with("Usage: ttyml [OPTION]... URL"));
    }

    async fn run_with(args: &[&str]) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = run(
            "ttyml",
            args,
            HttpClientConfig::new().send_terminal_size(false),
            crate::session::ScriptedInput::new(Vec::<String>::new()),
            &mut out,
            &mut err,
        )
        .await;
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_run_help() {
        let (status, out, err) = run_with(&["--help"]).await;
        assert_eq!(status, EXIT_SUCCESS);
        assert!(out.starts_with("Usage: ttyml [OPTION]... URL"));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_run_version() {
        let (status, out, _) = run_with(&["--version"]).await;
        assert_eq!(status, EXIT_SUCCESS);
        assert_eq!(out, format!("ttyml {}\n", crate::VERSION));
    }

    #[tokio::test]
    async fn test_run_usage_errors() {
        let (status, out, err) = run_with(&[]).await;
        assert_eq!(status, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, "Usage: ttyml [OPTION]... URL\n");

        let (status, _, err) = run_with(&["--frobnicate", "http://h/"]).await;
        assert_eq!(status, EXIT_FAILURE);
        assert!(err.contains("Try `ttyml --help' for more information."));
    }

    #[tokio::test]
    async fn test_run_invalid_url_is_fatal() {
        let (status, _, err) = run_with(&["not a url"]).await;
        assert_eq!(status, EXIT_FAILURE);
        assert!(err.starts_with("Fatal error: Invalid URL: "), "{}", err);
    }
}
