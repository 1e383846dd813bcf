//! Statement extraction command

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use bankscan_core::extract::{ExtractionBackend, ExtractionClient};
use bankscan_core::{export, intake, session::UploadSession};
use chrono::Utc;

use crate::clipboard;
use crate::render;

/// Extract transactions from a bank statement and export them as CSV
pub async fn cmd_extract(
    files: &[PathBuf],
    output: Option<&Path>,
    copy: bool,
    model: Option<&str>,
) -> Result<()> {
    let client = ExtractionClient::from_env().ok_or_else(|| {
        anyhow!("Extraction service not configured. Set the GEMINI_API_KEY environment variable.")
    })?;
    let client = match model {
        Some(model) => client.with_model(model),
        None => client,
    };

    run_extract(&client, files, output, copy).await
}

/// The upload cycle with an already-configured client
pub(crate) async fn run_extract(
    client: &ExtractionClient,
    files: &[PathBuf],
    output: Option<&Path>,
    copy: bool,
) -> Result<()> {
    let file = intake::select_statement(files)?;
    let (data, mime_type) = intake::read_statement(file)?;

    println!("📄 {} ({}, {} bytes)", file.display(), mime_type, data.len());
    println!("⏳ Extracting transactions via {}...", client.model());

    let mut session = UploadSession::new();
    let token = session.begin();
    let outcome = client.extract_statement(&data, mime_type).await;
    session.complete(token, outcome);

    let result = match session.result() {
        Some(result) => result,
        None => {
            println!();
            println!("❌ {}", session.error().unwrap_or("Extraction failed"));
            print!("{}", render::empty_state());
            // Already rendered above; the Err sets the exit status
            anyhow::bail!("Extraction failed");
        }
    };

    println!();
    print!("{}", render::summary_cards(result));
    println!();
    print!("{}", render::transaction_table(&result.transactions));

    let csv = export::to_csv(&result.transactions);
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(export::export_filename(Utc::now().date_naive())),
    };
    export::save_csv(&csv, &path)?;

    println!();
    println!(
        "✅ Exported {} transactions to {}",
        result.transactions.len(),
        path.display()
    );

    if copy {
        match clipboard::copy_to_clipboard(&csv) {
            Ok(()) => println!("📋 CSV copied to clipboard"),
            Err(e) => tracing::warn!("Clipboard copy failed: {}", e),
        }
    }

    Ok(())
}
