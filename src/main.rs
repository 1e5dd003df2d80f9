//! Vibe Mode - hover-and-click element inspection for host documents
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;

use vibe_core::prelude::*;
use vibe_mode::{list_landmarks, run_demo, DemoOptions};

/// Vibe Mode - inspect elements of a sample page from the terminal
#[derive(Parser, Debug)]
#[command(name = "vibe")]
#[command(about = "Hover-and-click element inspection engine demo", long_about = None)]
struct Args {
    /// Element id to inspect (see --list)
    #[arg(value_name = "ELEMENT_ID", default_value = "pricing-card")]
    element_id: String,

    /// Analysis level: basic, detailed, or comprehensive
    #[arg(long, default_value = "detailed")]
    level: String,

    /// Emit the full state snapshot as JSON
    #[arg(long)]
    json: bool,

    /// List the sample page's inspectable elements and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = vibe_core::logging::init() {
        eprintln!("warning: logging unavailable: {e}");
    }

    if args.list {
        list_landmarks();
        return Ok(());
    }

    let options = DemoOptions {
        level: args.level,
        element_id: args.element_id,
        json: args.json,
    };

    run_demo(options).await.map_err(|e| {
        error!("demo failed: {e}");
        color_eyre::eyre::eyre!(e.to_string())
    })
}
