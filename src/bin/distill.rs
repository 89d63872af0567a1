//! Command-line front end: reads a page from stdin, a file or a URL and
//! prints the distilled JSON record to stdout.
//!
//! Logs go to stderr (`RUST_LOG`, default `info`). On failure the error kind
//! and message are printed to stderr and the process exits non-zero.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rs_distiller::{
    Distiller, Error, ErrorKind, ModelRegistry, ModelSource, Options, PageSource, ResultRecord,
};

#[derive(Parser)]
#[command(name = "distill", version, about = "Extract main content and named entities from a web page")]
struct Cli {
    /// Fetch the page from this http(s) URL
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Read HTML from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Character encoding of the input (label or Content-Type value).
    /// Fetched pages use the response charset instead.
    #[arg(short, long, conflicts_with = "url")]
    encoding: Option<String>,

    /// Directory holding the model files (default: bundled, or DISTILLER_MODEL_DIR)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Pretty-print the JSON record
    #[arg(short, long)]
    pretty: bool,

    /// Run entity recognizers one category at a time
    #[arg(long)]
    sequential: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).and_then(|record| render(&record, cli.pretty)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {err}", err.kind());
            ExitCode::from(exit_code(err.kind()))
        }
    }
}

fn run(cli: &Cli) -> Result<ResultRecord, Error> {
    let source = match &cli.model_dir {
        Some(dir) => ModelSource::Directory(dir.clone()),
        None => ModelSource::from_env(),
    };
    let registry = Arc::new(ModelRegistry::load(&source)?);

    let options = Options {
        parallel_recognition: !cli.sequential,
        ..Options::default()
    };
    let distiller = Distiller::new(registry).with_options(options);

    let page = match (&cli.url, &cli.file) {
        (Some(url), _) => PageSource::url(url.clone()),
        (None, Some(path)) => PageSource::Html {
            bytes: std::fs::read(path).map_err(|err| {
                Error::MalformedInput(format!("cannot read {}: {err}", path.display()))
            })?,
            encoding: cli.encoding.clone(),
        },
        (None, None) => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|err| Error::MalformedInput(format!("cannot read stdin: {err}")))?;
            PageSource::Html {
                bytes,
                encoding: cli.encoding.clone(),
            }
        }
    };

    distiller.run(&page)
}

fn render(record: &ResultRecord, pretty: bool) -> Result<String, Error> {
    let json = if pretty {
        record.to_json_pretty()
    } else {
        record.to_json()
    };
    json.map_err(|err| Error::Extraction(format!("cannot serialize record: {err}")))
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::MalformedInput => 2,
        ErrorKind::Extraction => 3,
        ErrorKind::ModelUnavailable => 4,
        ErrorKind::SourceUnreachable => 5,
        ErrorKind::Cancelled => 6,
    }
}
