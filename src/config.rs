//! Configuration module.
//!
//! This module defines the command-line interface (CLI) for the emitter using
//! `clap`. It handles parsing the output path, the embedded message, and the
//! logging level.

use clap::Parser;
use std::path::PathBuf;

/// A minimal emitter of executable x86_64 ELF binaries.
///
/// Produces a tiny statically-laid-out executable that prints a message and
/// exits. It is designed for educational purposes and currently only targets
/// x86_64 Linux.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Output file
    #[arg(short, long, default_value = "tiny-x64", help = "Path to the output executable")]
    pub output: PathBuf,

    /// Message the generated executable prints
    #[arg(
        short,
        long,
        default_value = "Hello World, this is my tiny executable",
        help = "Message embedded in the data segment"
    )]
    pub message: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: String,
}
