//! Basic logger usage example
//!
//! Demonstrates console logging at different levels, context labels and
//! structured payloads.
//!
//! Run with: cargo run --example basic_usage

use serde_json::json;
use sink_logger::prelude::*;
use sink_logger::{info, warning};

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Sink Logger - Basic Usage Example ===\n");

    let mut logger = LoggerBuilder::new("App")
        .level(LogLevel::Verbose)
        .timestamp(TimestampFormat::Utc)
        .build(ConsoleSink::with_colors(true))?;

    println!("1. Logging at different levels:");
    logger.verbose("This is a verbose message").await?;
    logger.debug("This is a debug message").await?;
    logger.info("This is an info message").await?;
    logger.warning("This is a warning message").await?;
    logger.error("This is an error message").await?;

    println!("\n2. Raising the threshold to warning:");
    logger.set_level(LogLevel::Warning);
    let outcome = logger.info("Info message (hidden)").await?;
    println!("   info returned {:?}", outcome);
    logger.warning("Warning message (visible)").await?;

    println!("\n3. Context and formatting macros:");
    logger.set_context(Some("Auth".to_string()));
    logger.set_level_named("info")?;
    info!(logger, "User {} signed in", "ann").await?;
    warning!(logger, "{} failed attempts before success", 2).await?;

    println!("\n4. Structured payload:");
    logger
        .info(json!({"event": "checkout", "items": 3, "total": 42.5}))
        .await?;

    println!("\n=== Example completed successfully! ===");
    println!("Emitted: {}", logger.metrics().emitted_count());
    println!("Suppressed: {}", logger.metrics().suppressed_count());

    Ok(())
}
