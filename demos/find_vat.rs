use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use vat_finder::{PdfTextSource, VatFinder, VatRecord, ViesClient};

/// Print one block per record, with the authority's answer when present.
fn print_records(records: &[VatRecord]) {
    for record in records {
        println!("\nVAT information for {}", record.candidate);
        println!("\tCountry code: {}", record.country_code());
        println!("\tVAT code: {}", record.vat_number());

        if let Some(v) = &record.verification {
            println!("\tIs valid?: {}", v.valid);
            if v.valid {
                println!("\tCompany name: {}", v.name.as_deref().unwrap_or_default());
                println!("\tCompany address: {}", v.address.as_deref().unwrap_or_default());
            }
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("\n\tUsage: find_vat <PATH> [--no-verify]\n");
        std::process::exit(2);
    };
    let verify = !std::env::args().any(|a| a == "--no-verify");

    let finder = VatFinder::new(PdfTextSource::new()).with_verifier(ViesClient::new()?);
    println!("file = {}", path.display());

    let records = finder.process_document(&path, verify).await?;
    print_records(&records);
    Ok(())
}
