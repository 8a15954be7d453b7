//! File logging example
//!
//! Demonstrates logging to a file mirrored to the console, with a count
//! limit that evicts the oldest lines.
//!
//! Run with: cargo run --example file_logging

use sink_logger::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Sink Logger - File Logging Example ===\n");

    let file = FileSink::new("application.log").await?;
    let mut logger = LoggerBuilder::new("App")
        .level(LogLevel::Debug)
        .max_logs(8)
        .build(MirrorSink::new(file))?;

    println!("1. Logging to both console and file:");

    logger.info("Application started").await?;
    logger.debug("Loading configuration...").await?;
    logger.info("Configuration loaded successfully").await?;
    logger.warning("Using default settings for some options").await?;
    logger.info("Connecting to database...").await?;
    logger.info("Database connection established").await?;
    logger.error("Failed to load optional plugin").await?;
    logger.info("Application initialization complete").await?;

    println!("\n2. Performing some operations (oldest lines are evicted):");

    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i)).await?;
        if i == 3 {
            logger.warning("Item 3 took longer than expected").await?;
        }
    }

    logger.info("All operations completed").await?;
    logger.flush().await?;

    let file = logger.sink().primary();
    println!("\n=== Example completed successfully! ===");
    println!(
        "'{}' keeps {} lines ({} bytes); {} evicted",
        file.path().display(),
        file.line_count(),
        file.current_size(),
        logger.metrics().evicted_count()
    );

    Ok(())
}
