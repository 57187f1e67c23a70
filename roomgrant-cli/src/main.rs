/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

use chrono::Utc;
use clap::Parser;
use roomgrant_cli::cli_args::{Mode, Opt};
use roomgrant_cli::commands;
use tracing::level_filters::LevelFilter;

fn main() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy(),
            )
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let opt = Opt::parse();
    let output = match opt.mode {
        Mode::Issue(args) => commands::issue(&args, Utc::now())?,
        Mode::Verify(args) => commands::verify(&args, Utc::now())?,
    };
    println!("{output}");
    Ok(())
}
