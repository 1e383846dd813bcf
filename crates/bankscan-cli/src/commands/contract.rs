//! Extraction contract inspection command

use anyhow::Result;
use bankscan_core::extract::contract::{response_schema, SYSTEM_INSTRUCTION};

/// Print the fixed contract sent with every extraction request
pub fn cmd_contract() -> Result<()> {
    println!("📋 System instruction:\n");
    println!("{}", SYSTEM_INSTRUCTION);
    println!();
    println!("📐 Response schema:\n");
    println!("{}", serde_json::to_string_pretty(&response_schema())?);
    Ok(())
}
