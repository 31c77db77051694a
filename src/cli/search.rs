use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::ChordCatalog;
use crate::cli::OutputFormat;
use crate::core::instrument::InstrumentRegistry;
use crate::matching::engine::{SearchConfig, SearchEngine, SearchResults};

/// Base URL used for chord links printed by the CLI
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Args)]
pub struct SearchArgs {
    /// Instrument name (e.g. "guitar")
    #[arg(required = true)]
    pub instrument: String,

    /// Fingering query such as "b2g2", a full key, or "all"
    #[arg(required = true)]
    pub query: String,

    /// Number of chords to show (all by default)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Base URL for chord links
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Run the search command
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the instrument is unknown.
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = ChordCatalog::load(args.catalog.as_deref())?;
    if verbose {
        eprintln!("Loaded catalog with {} chords", catalog.len());
    }

    let registry = InstrumentRegistry::builtin();
    let config = SearchConfig { limit: args.limit };
    let engine = SearchEngine::with_config(registry, &catalog, config);
    let results = engine.find_chords(&args.instrument, &args.query)?;

    match format {
        OutputFormat::Text => print_text_results(&results, verbose),
        OutputFormat::Json => {
            let views: Vec<_> = results
                .fingerings()
                .map(|f| f.to_view(&args.base_url))
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(results: &SearchResults, verbose: bool) {
    let strings = &results.profile.strings;

    if results.filter.is_empty() {
        println!("All {} chords ({} found)\n", results.profile.name, results.chords.len());
    } else {
        let query: Vec<String> = results
            .filter
            .iter()
            .map(|(string, fret)| format!("{string}{fret}"))
            .collect();
        println!(
            "{} chords matching {} ({} found)\n",
            results.profile.name,
            query.join(" "),
            results.chords.len()
        );
    }

    if results.chords.is_empty() {
        return;
    }

    let name_width = results
        .fingerings()
        .map(|f| f.name().len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut header = format!("{:<name_width$}", "Chord");
    for string in strings {
        header.push_str(&format!(" {string:>3}"));
    }
    header.push_str("  Distance");
    if verbose {
        header.push_str("  Obscurity  Key");
    }
    println!("{header}");
    println!("{}", "-".repeat(header.len()));

    for ranked in &results.chords {
        let fingering = &ranked.fingering;
        let mut line = format!("{:<name_width$}", fingering.name());
        for string in strings {
            line.push_str(&format!(" {:>3}", fingering.fret(string)));
        }
        line.push_str(&format!("  {:>8}", ranked.rank.distance));
        if verbose {
            line.push_str(&format!("  {:>9}  {}", ranked.rank.obscurity, fingering.key()));
        }
        println!("{line}");
    }
}

fn print_tsv_results(results: &SearchResults) {
    let strings = &results.profile.strings;
    println!("chord\tmodifier\t{}\tdistance\tobscurity\tkey", strings.join("\t"));
    for ranked in &results.chords {
        let fingering = &ranked.fingering;
        let frets: Vec<&str> = strings.iter().map(|s| fingering.fret(s)).collect();
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            fingering.chord(),
            fingering.modifier(),
            frets.join("\t"),
            ranked.rank.distance,
            ranked.rank.obscurity,
            fingering.key()
        );
    }
}
