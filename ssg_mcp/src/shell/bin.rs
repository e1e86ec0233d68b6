// Binary entry point for ssg_mcp
// This is a thin wrapper that delegates to the library implementation

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match ssg_mcp::shell::run().await {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("ssg_mcp fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
