//! To-do MCP Server - Main Entry Point
//!
//! This is the main entry point for the to-do MCP server application.
//! The actual implementation is in the `todo_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use todo_mcp::TodoServerHandler;
use todo_mcp::logging;

/// To-do MCP Server - category-based personal task lists via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the to-do data files
    data_dir: String,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error, off)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    logging::init_logging(&args.log_level)?;

    let handler = TodoServerHandler::new(&args.data_dir)?;
    serve_stdio(handler).await?;
    Ok(())
}
