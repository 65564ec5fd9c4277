//! Entry point for the uelf emitter.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap`.
//! 2. Initialize logging via `tracing-subscriber`.
//! 3. Assemble the demo payload, sizing it first so the data segment's
//!    address can be computed from the real layout.
//! 4. Build the executable image and write it to disk.
//!
//! Error handling is done via `anyhow`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use uelf::builder::build_image;
use uelf::config::Config;
use uelf::layout;
use uelf::payload::hello_world_text;
use uelf::writer::write_executable;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data = config.message.into_bytes();
    // The payload encodes the message length in a single byte.
    if data.len() > u8::MAX as usize {
        anyhow::bail!("message too long: {} bytes (maximum 255)", data.len());
    }

    // The payload encoding is fixed-width, so a throwaway assembly with
    // placeholder operands gives the final text size. The message address is
    // then computed from the actual layout rather than hardcoded.
    // The legacy syscall interface only sees 32-bit registers, so the
    // address must fit the payload's 4-byte operand.
    let text_size = hello_world_text(0, 0).len() as u64;
    let message_addr = u32::try_from(layout::data_virtual_address(text_size))
        .context("data segment address exceeds the payload's 32-bit operand")?;
    let text = hello_world_text(message_addr, data.len() as u8);

    let image = build_image(&text, &data);
    write_executable(&config.output, &image)?;

    println!("Wrote binary to {}", config.output.display());
    Ok(())
}
