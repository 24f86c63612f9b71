use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use styledown::{Config, Error, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Svg,
    Typst,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Svg => "svg",
            Format::Typst => "typ",
            Format::Json => "json",
        }
    }
}

#[derive(Parser)]
#[command(name = "styledown")]
#[command(about = "Render quotes, bullet points and inline code as styled text")]
struct Cli {
    /// Input markdown file
    input: PathBuf,

    /// Output file (defaults to input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("styledown=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let markdown = fs::read_to_string(&cli.input).map_err(|e| Error::Io {
        path: cli.input.clone(),
        source: e,
    })?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension(cli.format.extension()));

    match cli.format {
        Format::Pdf => write(&output, styledown::markdown_to_pdf_with_config(&markdown, &config)?)?,
        Format::Typst => write(
            &output,
            styledown::markdown_to_typst_with_config(&markdown, &config),
        )?,
        Format::Json => {
            let styled = styledown::markdown_to_styled(&markdown, &config);
            write(&output, serde_json::to_string_pretty(&styled)?)?
        }
        Format::Svg => {
            let doc = styledown::markdown_to_svg_with_config(&markdown, &config)?;
            if doc.pages.len() == 1 {
                write(&output, &doc.pages[0].markup)?;
            } else {
                let stem = output.with_extension("");
                for (i, page) in doc.pages.iter().enumerate() {
                    let path = PathBuf::from(format!("{}-{}.svg", stem.display(), i + 1));
                    write(&path, &page.markup)?;
                    println!("Created {}", path.display());
                }
                return Ok(());
            }
        }
    }

    println!("Created {}", output.display());
    Ok(())
}

fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}
