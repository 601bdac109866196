//! Command-line shell
//!
//! `beacon inspect` scores a saved response offline; `beacon watch` runs the
//! suggestion engine against the polling endpoint and prints render events.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Report a command failure and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": chain.get(1..).unwrap_or_default(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
