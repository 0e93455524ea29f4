use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bibtex2html::{Bibliography, RenderConfig, Template, render};

/// Convert a BibTeX file to an HTML reference list.
///
/// The template must contain the placeholder tokens
/// <!--NUMBER_OF_REFERENCES-->, <!--NEWER-->, <!--OLDER-->, <!--DATE-->,
/// and <!--LIST_OF_REFERENCES-->, which are replaced in the output.
#[derive(Debug, Parser)]
#[command(name = "bibtex2html", version, about)]
struct Cli {
    /// BibTeX file to convert
    bib_file: PathBuf,

    /// HTML template file containing the placeholder tokens
    template_file: PathBuf,

    /// Write the result here instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text for the <!--NEWER--> navigation placeholder
    #[arg(long)]
    newer: Option<String>,

    /// Text for the <!--OLDER--> navigation placeholder
    #[arg(long)]
    older: Option<String>,

    /// Print the parsed bibliography as JSON instead of rendering
    #[arg(long)]
    dump_json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // logs go to stderr; stdout carries the rendered document
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let bib_source = fs::read_to_string(&cli.bib_file)
        .with_context(|| format!("failed to read bibliography file '{}'", cli.bib_file.display()))?;
    let bib: Bibliography = bib_source
        .parse()
        .with_context(|| format!("failed to parse '{}'", cli.bib_file.display()))?;
    tracing::debug!(
        entries = bib.len(),
        file = %cli.bib_file.display(),
        "parsed bibliography"
    );

    let output = if cli.dump_json {
        let mut json =
            serde_json::to_string_pretty(&bib).context("failed to serialize bibliography")?;
        json.push('\n');
        json
    } else {
        let template_source = fs::read_to_string(&cli.template_file).with_context(|| {
            format!(
                "failed to read template file '{}'",
                cli.template_file.display()
            )
        })?;
        let template = Template::new(template_source)?;
        let config = RenderConfig {
            newer: cli.newer,
            older: cli.older,
            date: None,
        };
        render(&bib, &template, &config)
    };

    match &cli.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write output file '{}'", path.display()))?,
        None => print!("{output}"),
    }
    Ok(())
}
