//! Minimal ELF Executable Emitter Library.
//!
//! This library provides the core components for `uelf`, a tool that emits
//! a directly executable x86_64 ELF64 image from raw code and data bytes.
//! It is organized into several modules:
//! - `config`: CLI configuration.
//! - `emitter`: Append-only little-endian byte emission.
//! - `layout`: Format constants and per-segment layout descriptors.
//! - `builder`: Image construction (file header + program headers + payload).
//! - `payload`: The demo machine-code sequence embedded by the CLI.
//! - `writer`: Persisting the image and marking it executable.

pub mod builder;
pub mod config;
pub mod emitter;
pub mod layout;
pub mod payload;
pub mod writer;
