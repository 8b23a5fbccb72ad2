//! Taxotag CLI: tag filings from a reference filing's lookups.
//!
//! Usage:
//!   taxotag tag --target <html> --reference <html> [--fact NAME]... [--taxonomy path]
//!   taxotag inline --document <html> [--taxonomy path]
//!   taxotag lookup --reference <html> [--fact NAME]...

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use taxotag::{
    ExtractParser, InlineExtractParser, InlineTagger, LookupIndex, LookupTagger, MarkupParser,
    OutputFormat, TagCollection, TaggerConfig, TaggerError, TaggerResult, TaxonomyCatalog,
};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "taxotag",
    version,
    about = "Taxonomy-grounded fuzzy tagging of financial filings"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tag a target document using a reference filing
    Tag {
        /// Untagged document to tag
        #[arg(long)]
        target: PathBuf,
        /// Inline-XBRL filing to learn lookups from
        #[arg(long)]
        reference: PathBuf,
        /// Concept metadata: JSON/YAML catalog or folder of XSD files
        #[arg(long)]
        taxonomy: Option<PathBuf>,
        /// Firm-specific fact to match by value (repeatable)
        #[arg(long = "fact")]
        facts: Vec<String>,
        /// Ignore dimensionally-qualified reference facts
        #[arg(long)]
        non_dimensional: bool,
        /// Minimum match score (0-100)
        #[arg(long)]
        threshold: Option<f64>,
        /// Config file (defaults to the user config dir)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write tags here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// One JSON object per line
        #[arg(long)]
        jsonl: bool,
    },
    /// List the facts an inline-XBRL document already carries
    Inline {
        #[arg(long)]
        document: PathBuf,
        #[arg(long)]
        taxonomy: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        jsonl: bool,
    },
    /// Print the lookups built from a reference filing
    Lookup {
        #[arg(long)]
        reference: PathBuf,
        #[arg(long = "fact")]
        facts: Vec<String>,
        #[arg(long)]
        non_dimensional: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> TaggerResult<TaggerConfig> {
    match path {
        Some(path) => TaggerConfig::load(path),
        None => TaggerConfig::load_default(),
    }
}

fn load_catalog(path: Option<&Path>) -> TaggerResult<TaxonomyCatalog> {
    match path {
        Some(path) => TaxonomyCatalog::from_path(path),
        None => Ok(TaxonomyCatalog::empty()),
    }
}

fn write_tags(tags: &TagCollection, format: OutputFormat, output: Option<&Path>) -> TaggerResult<()> {
    let rendered = match format {
        OutputFormat::Json => tags.to_json_pretty()? + "\n",
        OutputFormat::JsonLines => tags.to_json_lines()?,
    };
    match output {
        Some(path) => std::fs::write(path, rendered).map_err(|e| TaggerError::io(path, e)),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_tag(
    target: &Path,
    reference: &Path,
    taxonomy: Option<&Path>,
    facts: Vec<String>,
    non_dimensional: bool,
    threshold: Option<f64>,
    config: Option<&Path>,
    output: Option<&Path>,
    jsonl: bool,
) -> TaggerResult<()> {
    let mut config = load_config(config)?;
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    if !facts.is_empty() {
        config.selected_facts = facts;
    }
    if non_dimensional {
        config.non_dimensional = true;
    }
    if let Some(taxonomy) = taxonomy {
        config.taxonomy = Some(taxonomy.to_path_buf());
    }
    if jsonl {
        config.output = OutputFormat::JsonLines;
    }
    config.validate()?;

    let store = load_catalog(config.taxonomy.as_deref())?;
    let tags = LookupTagger::new(&store)
        .with_threshold(config.threshold)
        .tag_files(target, reference, &config)?;
    write_tags(&tags, config.output, output)
}

fn cmd_inline(
    document: &Path,
    taxonomy: Option<&Path>,
    output: Option<&Path>,
    jsonl: bool,
) -> TaggerResult<()> {
    let store = load_catalog(taxonomy)?;
    let doc = MarkupParser::new().parse_file(document)?;
    let tags = InlineTagger::new(&store).list_tags(&doc);
    let format = if jsonl {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Json
    };
    write_tags(&tags, format, output)
}

fn cmd_lookup(reference: &Path, facts: &[String], non_dimensional: bool) -> TaggerResult<()> {
    let doc = MarkupParser::new()
        .parse_file(reference)
        .map_err(|e| TaggerError::ReferenceDocument(e.to_string()))?;
    let extract = InlineExtractParser::new()
        .non_dimensional(non_dimensional)
        .extract(&doc, facts);
    let index = LookupIndex::build(&doc, Some(&extract), facts);
    println!("{}", serde_json::to_string_pretty(&index)?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let result = match cli.command {
        Commands::Tag {
            target,
            reference,
            taxonomy,
            facts,
            non_dimensional,
            threshold,
            config,
            output,
            jsonl,
        } => cmd_tag(
            &target,
            &reference,
            taxonomy.as_deref(),
            facts,
            non_dimensional,
            threshold,
            config.as_deref(),
            output.as_deref(),
            jsonl,
        ),
        Commands::Inline {
            document,
            taxonomy,
            output,
            jsonl,
        } => cmd_inline(&document, taxonomy.as_deref(), output.as_deref(), jsonl),
        Commands::Lookup {
            reference,
            facts,
            non_dimensional,
        } => cmd_lookup(&reference, &facts, non_dimensional),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
