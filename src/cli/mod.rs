//! # CLI Module
//!
//! Command-line surface of the `entity-typegen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! entity-typegen generate --input entities --output src/entities.ts
//! ```
//!
//! Options:
//! - `--input <DIR>` - Directory of entity units (required)
//! - `--output <FILE>` - Output file, stdout when omitted
//! - `--target <FAMILY>` - `zod`, `valibot`, `yup` or `joi`
//! - `--partial-types <true|false>` - Override the family default
//! - `--namespace <NAME>` - Container name (default: `Entities`)
//! - `--config <FILE>` - Config file, auto-detected as `entity-typegen.toml` in the input directory
//! - `--force` - Overwrite an existing output file
//! - `--dry-run` - List the declarations without writing
//!
//! ### `lint`
//!
//! ```bash
//! entity-typegen lint --input entities --fail-on-error
//! ```
//!
//! ### `graph`
//!
//! ```bash
//! entity-typegen graph --input entities --json
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use entity_typegen::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(&cli.command)?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
