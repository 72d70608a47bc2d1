//! Render a quote to PDF and "share" it from a terminal.
//!
//! The terminal has no native share sheet, so the flow falls back to saving
//! the file and printing the messaging deep link.
//!
//! Run with: `cargo run --example export_quote --features pdf`

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use quotekit::core::*;
use quotekit::export::*;
use quotekit::pdf::PdfRenderer;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Writes artifacts into a directory and prints links instead of opening them.
struct DirectoryDelivery {
    dir: PathBuf,
}

impl DeliveryHost for DirectoryDelivery {
    fn save_file(&self, artifact: &PdfArtifact) {
        let path = self.dir.join(&artifact.file_name);
        match std::fs::write(&path, &artifact.bytes) {
            Ok(()) => println!("saved {}", path.display()),
            Err(e) => eprintln!("could not write {}: {e}", path.display()),
        }
    }

    fn open_link(&self, url: &Url) {
        println!("open: {url}");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let quote = QuoteBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .client_name("José Pérez")
        .location("Cusco")
        .document_number("COT-2024-042")
        .add_line(
            LineItemBuilder::new(dec!(6), Unit::LinearMetre, dec!(45))
                .description("Aluminium rail")
                .build(),
        )
        .add_line(
            LineItemBuilder::new(dec!(1), Unit::Lot, dec!(120))
                .description("Installation")
                .taxable(false)
                .build(),
        )
        .build()
        .unwrap();

    let settings = ExportSettings {
        document_label: "Cotizacion".into(),
        fallback_link_delay_ms: 200,
        ..ExportSettings::default()
    };
    let hosts = ExportHosts::new(
        Arc::new(PdfRenderer::with_label("Cotización")),
        Arc::new(NoNativeShare),
        Arc::new(DirectoryDelivery {
            dir: std::env::temp_dir(),
        }),
        Arc::new(LogNotifier),
    );
    let orchestrator = ExportOrchestrator::new(hosts, settings).unwrap();

    match orchestrator.share(&quote).await {
        Ok(ExportOutcome::SharedViaFallback { file_name, link }) => {
            println!("{file_name} ready, deep link: {link}");
        }
        Ok(other) => println!("{other:?}"),
        Err(e) => eprintln!("export failed: {e}"),
    }

    // Let the delayed link opener run before the runtime shuts down.
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
}
