//! Service configuration check command

use anyhow::Result;
use bankscan_core::extract::{ExtractionBackend, ExtractionClient, DEFAULT_HOST, DEFAULT_MODEL};

/// Check extraction service configuration and availability
pub async fn cmd_check() -> Result<()> {
    println!("🔍 Checking extraction service configuration...\n");

    match std::env::var("GEMINI_API_KEY") {
        Ok(_) => println!("  GEMINI_API_KEY: set"),
        Err(_) => println!("  ⚠️  GEMINI_API_KEY not set"),
    }
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    println!("  GEMINI_MODEL: {}", model);
    let host = std::env::var("GEMINI_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    println!("  GEMINI_HOST: {}", host);
    let backend = std::env::var("BANKSCAN_BACKEND").unwrap_or_else(|_| "gemini".to_string());
    println!("  BANKSCAN_BACKEND: {}\n", backend);

    let client = match ExtractionClient::from_env() {
        Some(client) => client,
        None => {
            println!("❌ Extraction service not configured");
            println!("\nTo set up extraction:");
            println!("  1. Create an API key in Google AI Studio");
            println!("  2. Set environment variable: export GEMINI_API_KEY=your-key");
            println!("  3. Optionally pick a model: export GEMINI_MODEL={}", DEFAULT_MODEL);
            return Ok(());
        }
    };

    print!("Checking service availability... ");
    if client.health_check().await {
        println!("✅ Connected");
        println!("\n  Host:  {}", client.host());
        println!("  Model: {}", client.model());
    } else {
        println!("❌ Failed");
        println!("\n⚠️  Could not reach {}", client.host());
        println!("   Check your network and the GEMINI_HOST setting.");
    }

    Ok(())
}
