// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! ttyml CLI - browse TTYML documents in the terminal

use std::env;
use std::io;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use ttyml::{cli, HttpClientConfig, StdinReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so they never mix with the rendered document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ttyml=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "ttyml".to_string());

    let status = cli::run(
        &program,
        args,
        HttpClientConfig::default(),
        StdinReader::new(),
        io::stdout(),
        io::stderr(),
    )
    .await;

    ExitCode::from(status)
}
