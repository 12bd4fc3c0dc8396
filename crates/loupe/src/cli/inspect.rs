//! The `loupe inspect` command for extracting and displaying metadata.

use clap::{Args, ValueEnum};
use loupe_core::pipeline::{extract_all, Inspector, ParameterSet};
use loupe_core::render::{self, FieldLayout, Presentation};
use loupe_core::types::{ExtractedText, Schema, TextOrigin};
use loupe_core::Config;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Arguments for the `inspect` command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image files or URLs to inspect
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Print the combined raw text instead of parsed fields
    #[arg(long)]
    pub raw: bool,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory for files written when text is too long to print
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum concurrent fetches (overrides config)
    #[arg(short, long)]
    pub parallel: Option<usize>,
}

/// Output format for inspection results.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable field listing
    Text,
    /// One JSON record per input
    Json,
}

/// Execute the inspect command.
pub async fn execute(args: InspectArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(parallel) = args.parallel {
        config.extraction.parallel_fetches = parallel.max(1);
    }

    let (sources, labels) = super::build_sources(&args.inputs, &config);
    let inspector = Inspector::new(&config);

    tracing::info!("Inspecting {} input(s)", sources.len());
    let results = extract_all(&inspector, sources).await;

    if results.is_empty() {
        println!("No image generation data found.");
        return Ok(());
    }

    if args.raw {
        return render_raw(&results, &args.output_dir);
    }

    match resolve_format(args.format, &config) {
        OutputFormat::Text => render_text(&results, &labels),
        OutputFormat::Json => render_json(&results, &labels, config.output.pretty)?,
    }
    Ok(())
}

/// Print every result's raw text as one combined block, falling back to a
/// file when it would not fit inline.
fn render_raw(results: &BTreeMap<usize, ExtractedText>, output_dir: &Path) -> anyhow::Result<()> {
    let combined = render::combine_texts(results);
    match Presentation::for_text(&combined) {
        Presentation::Inline(rendered) => println!("{rendered}"),
        Presentation::Attachment { filename, contents } => {
            let path = output_dir.join(filename);
            std::fs::write(&path, contents)?;
            println!(
                "Combined text exceeds the inline limit; written to {}",
                path.display()
            );
        }
    }
    Ok(())
}

fn render_text(results: &BTreeMap<usize, ExtractedText>, labels: &[String]) {
    for (index, extracted) in results {
        println!("=== {} ===", labels[*index]);
        if extracted.is_standard() {
            let params = ParameterSet::parse(&extracted.text);
            for (name, value) in params.iter() {
                match render::field_layout(name) {
                    FieldLayout::Block => println!("{name}:\n{value}"),
                    FieldLayout::Inline => println!("{name}: {value}"),
                }
            }
        } else {
            println!("[{}]", render::schema_title(extracted.schema));
            println!("{}", extracted.text);
        }
        println!();
    }
}

/// One inspected input, as serialized in `--format json` output.
#[derive(Serialize)]
struct InspectRecord<'a> {
    input: &'a str,
    index: usize,
    schema: Schema,
    origin: TextOrigin,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<ParameterSet>,
}

fn render_json(
    results: &BTreeMap<usize, ExtractedText>,
    labels: &[String],
    pretty: bool,
) -> anyhow::Result<()> {
    let records: Vec<InspectRecord> = results
        .iter()
        .map(|(index, extracted)| InspectRecord {
            input: &labels[*index],
            index: *index,
            schema: extracted.schema,
            origin: extracted.origin,
            text: &extracted.text,
            parameters: extracted
                .is_standard()
                .then(|| ParameterSet::parse(&extracted.text)),
        })
        .collect();

    let json = if pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{json}");
    Ok(())
}

fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    match flag {
        Some(format) => format,
        None if config.output.format == "json" => OutputFormat::Json,
        None => OutputFormat::Text,
    }
}
