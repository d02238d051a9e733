//! `edarun tools` — list the supported simulator backends.

use edarun_backend::{backend_for, SUPPORTED_TOOLS};

/// Runs the `edarun tools` command, printing one line per backend.
pub fn run() -> Result<i32, Box<dyn std::error::Error>> {
    for tool in SUPPORTED_TOOLS {
        let backend = backend_for(tool)?;
        println!("{:<10} {}", backend.tool_name(), backend.description());
    }
    Ok(0)
}
