//! CLI tool to preview the components of a URL.
//!
//! Usage:
//!   url-peek <text>
//!   pbpaste | url-peek
//!   url-peek <text> --format json
//!   url-peek <text> --locale fr-FR --settings ~/.config/url-peek.json
//!
//! The text goes through the same decode/parse/fallback flow as a paste in
//! the web UI. Text that is not a URL prints the fallback URL and a note on
//! stderr.

use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use url_peek::{
    ClipboardError, Component, FileStore, LocaleCatalog, LocaleResolver, MemoryStore,
    PasteController, PasteOutcome, PreviewConfig, ResolvedLocale, SettingsStore, StructuredUrl,
};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Show the scheme, host, port, path, query and fragment of a URL.
#[derive(Parser)]
#[command(name = "url-peek")]
struct Cli {
    /// Text to inspect (read from stdin when omitted)
    text: Option<String>,

    /// Locale for labels; remembered when a settings file is given
    #[arg(short, long)]
    locale: Option<String>,

    /// JSON file holding the remembered locale
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log state transitions on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let lang = std::env::var("LANG").ok();
    let preferred = preferred_languages(lang.as_deref());
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let result = match cli.settings.clone() {
        Some(path) => run(&cli, FileStore::new(path), &preferred, &mut out, &mut err),
        None => run(&cli, MemoryStore::new(), &preferred, &mut out, &mut err),
    };

    if let Err(e) = result {
        eprintln!("Error writing output: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolve the locale, run the text through the paste flow and print the
/// breakdown. A fallback only adds a localized note on `err`; the error
/// itself is logged by the controller.
fn run<S: SettingsStore>(
    cli: &Cli,
    store: S,
    preferred: &[String],
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    let config = PreviewConfig::default();
    let mut resolver = LocaleResolver::new(LocaleCatalog::builtin(), store, &config);
    let locale = match &cli.locale {
        Some(id) => resolver.select(id),
        None => resolver.startup(preferred),
    };

    let read = match &cli.text {
        Some(text) => Ok(text.clone()),
        None => read_stdin(),
    };

    let mut controller = PasteController::new(&config);
    if let Some(ticket) = controller.begin() {
        let settled = controller.settle(ticket, read);
        controller.release(settled.release);
        if let PasteOutcome::Fallback(_) = settled.outcome {
            writeln!(err, "{}", locale.message("cli.fallbackNote"))?;
        }
    }

    match cli.format {
        Format::Text => write_text(out, controller.url(), &locale),
        Format::Json => {
            let json = serde_json::to_string_pretty(&controller.url().parts())?;
            writeln!(out, "{json}")
        }
    }
}

fn read_stdin() -> Result<String, ClipboardError> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| ClipboardError::Io(e.to_string()))?;
    Ok(text)
}

/// Languages from a `LANG` value, e.g. `fr_FR.UTF-8` becomes `fr-FR`.
fn preferred_languages(lang: Option<&str>) -> Vec<String> {
    lang.and_then(|lang| {
        let tag = lang.split(['.', '@']).next()?.replace('_', "-");
        (!tag.is_empty() && tag != "C" && tag != "POSIX").then_some(tag)
    })
    .into_iter()
    .collect()
}

fn write_text(out: &mut impl Write, url: &StructuredUrl, locale: &ResolvedLocale) -> io::Result<()> {
    let empty = locale.message("urlPreview.empty");
    let mut rows: Vec<(&str, String)> = vec![(locale.message("urlPreview.href"), url.href().to_string())];
    rows.extend(
        Component::ALL
            .iter()
            .map(|&c| (locale.message(c.message_key()), url.component(c))),
    );

    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, value) in &rows {
        let value = if value.is_empty() { empty } else { value.as_str() };
        let pad = width - label.chars().count();
        writeln!(out, "{label}{}  {value}", " ".repeat(pad))?;
    }

    let params = url.query_params();
    if !params.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", locale.message("urlPreview.params"))?;
        for (name, value) in params {
            writeln!(out, "  {name} = {value}")?;
        }
    }
    Ok(())
}
