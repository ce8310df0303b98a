//! mindmapify CLI: text or PDF → mind map.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use mindmapify::MindMapError;
use mindmapify::config::MindMapConfig;
use mindmapify::document::{self, DocumentError};
use mindmapify::nlp;
use mindmapify::render::{self, Part};

#[derive(Parser)]
#[command(name = "mindmapify", version, about = "Extract mind maps from text and PDFs")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Supplementary lexicon TOML (overrides `nlp.lexicon_path`).
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a mind map from text, a text file, a PDF, or stdin.
    Extract {
        /// Input text. Read from stdin when no input is given.
        text: Option<String>,

        /// Read input text from a file.
        #[arg(long, conflicts_with_all = ["text", "pdf"])]
        file: Option<PathBuf>,

        /// Extract input text from a PDF.
        #[arg(long, conflicts_with = "text")]
        pdf: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Node to render with `--format mermaid` ("all" for every node).
        #[arg(long, default_value = "all")]
        part: Part,
    },

    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Mermaid,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = MindMapConfig::load_or_default(cli.config.as_deref())?;
    if let Some(lexicon) = cli.lexicon {
        config.nlp.lexicon_path = Some(lexicon);
    }

    match cli.command {
        Commands::Extract {
            text,
            file,
            pdf,
            format,
            part,
        } => {
            let input = match (text, file, pdf) {
                (Some(text), _, _) => text,
                (None, Some(path), _) => read_file(&path)?,
                (None, None, Some(path)) => read_pdf(&path)?,
                (None, None, None) => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
                    buf
                }
            };

            let model = nlp::load_model(&config.nlp)?;
            let map = config.extractor().extract_text(&model, &input)?;

            match format {
                Format::Json => {
                    println!("{}", serde_json::to_string_pretty(&map).into_diagnostic()?);
                }
                Format::Mermaid => {
                    let diagram = render::mermaid(&map, &part);
                    if diagram.is_empty() {
                        eprintln!("No nodes; nothing to render.");
                    } else {
                        println!("{diagram}");
                    }
                }
            }
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String, MindMapError> {
    std::fs::read_to_string(path).map_err(|e| MindMapError::Input {
        path: path.display().to_string(),
        source: e,
    })
}

fn read_pdf(path: &Path) -> Result<String, MindMapError> {
    let data = std::fs::read(path).map_err(|e| MindMapError::Input {
        path: path.display().to_string(),
        source: e,
    })?;
    let extractor = document::pdf_extractor().ok_or(DocumentError::Unavailable)?;
    Ok(extractor.extract(&data)?)
}
