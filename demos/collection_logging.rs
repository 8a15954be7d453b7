//! Collection logging example
//!
//! Demonstrates document-per-record logging into an in-memory collection,
//! key sanitization of structured payloads, and configuration from JSON.
//!
//! Run with: cargo run --example collection_logging

use serde_json::json;
use sink_logger::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Sink Logger - Collection Logging Example ===\n");

    let config = LoggerConfig::from_json_str(
        r#"{
            "name": "Orders",
            "level": "debug",
            "context": "Checkout",
            "timestamp": {"state": true, "format": "numeric"},
            "maxlogs": 3
        }"#,
    )?;

    let collection = MemoryCollection::new();
    let mut logger = Logger::new(config, CollectionSink::new(collection.clone()))?;

    println!("1. Structured payloads are stored natively, with reserved key characters removed:");
    logger
        .info(json!({
            "_id": {"$oid": "507f1f77bcf86cd799439011"},
            "customer.email": "ann@example.com",
            "$total": 42.5
        }))
        .await?;

    println!("2. Only the three most recent records are retained:");
    for step in ["validated", "charged", "shipped", "delivered"] {
        logger.debug(format!("order {}", step)).await?;
    }

    for document in collection.documents() {
        println!("   {}", serde_json::Value::Object(document));
    }

    logger.clear().await?;
    println!("\nAfter clear: {} documents", collection.len());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
