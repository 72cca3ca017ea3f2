use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use shared::{Config, DailyContent, Sources};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(name = "daily-print")]
#[command(about = "Generate a single-page daily newspaper PDF and send it to the printer")]
struct Args {
    /// Generate for a specific date (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<String>,

    /// Open the PDF in a viewer instead of printing
    #[arg(long, conflicts_with = "save")]
    preview: bool,

    /// Save the PDF to a file instead of printing
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Skip AI curation and use raw Guardian articles
    #[arg(long)]
    no_ai: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let target_date = match &args.date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| {
            format!("Invalid date format '{raw}'. Expected YYYY-MM-DD (e.g. 2025-12-30)")
        })?,
        None => Local::now().date_naive(),
    };

    // Configuration errors abort here, before any network call
    let config = Config::from_env()?;
    let sources = Sources::from_config(&config, !args.no_ai)?;

    println!(
        "Generating daily print for {}...",
        target_date.format("%A %-d %B %Y")
    );
    if !sources.curation_enabled() {
        println!("  (AI curation disabled, using raw Guardian articles)");
    }
    if !sources.highlights_enabled() {
        println!("  (no Readwise token, highlight section omitted)");
    }

    println!("\n\u{1F4E1} Fetching content...");
    let content = sources.collect(target_date).await?;
    report(&content);

    println!("\n\u{1F4C4} Rendering PDF...");
    let pdf_bytes = shared::render_pdf(&content)?;
    println!("\u{2713} {} bytes", pdf_bytes.len());

    deliver(&args, &pdf_bytes)?;

    println!("\nDone!");
    Ok(())
}

/// Echo what made it into the edition, one line per source.
fn report(content: &DailyContent) {
    println!("\u{2713} News: {} articles", content.articles.len());

    match &content.weather {
        Some(weather) => println!(
            "\u{2713} Weather: {}\u{00b0}C, {}",
            weather.temperature, weather.condition
        ),
        None => println!("\u{2717} Weather unavailable"),
    }

    match &content.readings {
        Some(readings) => {
            let valid: Vec<&str> = [
                readings.old_testament.as_str(),
                readings.psalm.as_str(),
                readings.new_testament.as_str(),
            ]
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect();
            if valid.is_empty() {
                println!("\u{2713} Readings: end of reading plan");
            } else {
                println!("\u{2713} Readings: {}", valid.join(", "));
            }
        }
        None => println!("- No readings (weekend)"),
    }

    println!("\u{2713} Verse: {}", content.verse.reference);

    match &content.highlight {
        Some(highlight) => println!("\u{2713} Highlight from: {}", highlight.title),
        None => println!("- No highlight"),
    }
}

fn deliver(args: &Args, pdf_bytes: &[u8]) -> Result<()> {
    if let Some(path) = &args.save {
        fs::write(path, pdf_bytes)
            .with_context(|| format!("Failed to save PDF to {}", path.display()))?;
        println!("Saved to {}", path.display());
        return Ok(());
    }

    if args.preview {
        // Keep the temp file around so the viewer can open it
        let (mut file, path) = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .context("Failed to create temporary PDF file")?
            .keep()
            .context("Failed to keep temporary PDF file")?;
        file.write_all(pdf_bytes)
            .context("Failed to write temporary PDF file")?;
        drop(file);

        println!("Opening {} in the viewer...", path.display());
        let status = Command::new("open")
            .arg(&path)
            .status()
            .context("Failed to launch the PDF viewer")?;
        if !status.success() {
            anyhow::bail!("PDF viewer exited with {status}");
        }
        return Ok(());
    }

    // Default: send to the system printer
    println!("\u{1F5A8} Sending to printer...");
    let mut file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .context("Failed to create temporary PDF file")?;
    file.write_all(pdf_bytes)
        .context("Failed to write temporary PDF file")?;

    let output = Command::new("lp")
        .arg(file.path())
        .output()
        .context("Failed to run lp; is a printer configured?")?;

    if !output.status.success() {
        anyhow::bail!(
            "Print failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    println!("Printed: {}", String::from_utf8_lossy(&output.stdout).trim());
    Ok(())
}
