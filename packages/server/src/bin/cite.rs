//! Find citations and quotations in a text file and print lookup prompts.
//!
//! ```text
//! cite article.txt
//! cat draft.md | cite --format text
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ingestion::citations::{analyze_text, Analysis};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cite", about = "Citation and quotation analysis")]
struct Args {
    /// Input file, or `-` for stdin
    #[arg(default_value = "-")]
    source: String,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
}

fn render_text(analysis: &Analysis) -> String {
    let mut out = String::new();
    for citation in &analysis.citations {
        out.push_str(&format!("Citation: {}\n  Context: {}\n", citation.text, citation.context));
    }
    for quotation in &analysis.quotations {
        out.push_str(&format!("Quotation: \"{}\"\n  Context: {}\n", quotation.text, quotation.context));
    }
    if !analysis.prompts.is_empty() {
        out.push_str("\nPrompts:\n");
        for prompt in &analysis.prompts {
            out.push_str(&format!("[{}] {}\n\n", prompt.target.as_str(), prompt.prompt));
        }
    }
    if out.is_empty() {
        out.push_str("No citations or quotations found.\n");
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    let text = read_source(&args.source)?;
    let analysis = analyze_text(&text);

    match args.format {
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&analysis).context("Failed to serialize analysis")?
        ),
        Format::Text => print!("{}", render_text(&analysis)),
    }
    Ok(())
}
