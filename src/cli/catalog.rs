use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::ChordCatalog;
use crate::cli::OutputFormat;
use crate::core::fingering::{ChordRecord, Fingering};
use crate::core::instrument::InstrumentRegistry;
use crate::matching::engine::insert_chord;
use crate::parsing::key::parse_frets;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List chords in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list chords for this instrument
        #[arg(long)]
        instrument: Option<String>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Add a chord to a catalog file
    Add {
        /// Catalog file to update (created from the embedded catalog if missing)
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// Instrument name (e.g. "guitar")
        #[arg(long, required = true)]
        instrument: String,

        /// Chord root (e.g. "A")
        #[arg(long, required = true)]
        chord: String,

        /// Chord modifier (e.g. "major", "m7")
        #[arg(long, required = true)]
        modifier: String,

        /// Frets as string/fret pairs (e.g. "e0b2g2D2A0E0"); unset strings are open
        #[arg(long, default_value = "")]
        frets: String,
    },
}

/// Run a catalog subcommand
///
/// # Errors
///
/// Returns an error if a catalog cannot be read or written, or an added
/// chord names an unknown instrument.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            instrument,
        } => run_list(catalog, instrument.as_deref(), format, verbose),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
        CatalogCommands::Add {
            catalog,
            instrument,
            chord,
            modifier,
            frets,
        } => run_add(catalog, &instrument, chord, modifier, &frets, format),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    instrument_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = ChordCatalog::load(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} chords", catalog.len());
    }

    let registry = InstrumentRegistry::builtin();
    let instruments: Vec<&str> = catalog
        .instrument_names()
        .filter(|name| instrument_filter.is_none_or(|f| f == *name))
        .collect();

    // Stored collections for unregistered instruments are listed but cannot be searched
    let mut fingerings: Vec<Fingering> = Vec::new();
    for instrument in &instruments {
        match registry.get(instrument) {
            Some(profile) => fingerings.extend(
                catalog
                    .records(instrument)
                    .iter()
                    .map(|r| Fingering::construct(profile, r)),
            ),
            None => tracing::warn!(instrument = %instrument, "Catalog has chords for an unknown instrument"),
        }
    }

    match format {
        OutputFormat::Text => {
            let name_width = fingerings
                .iter()
                .map(|f| f.name().len())
                .max()
                .unwrap_or(5)
                .max(5);
            println!("Chord Catalog ({} chords)\n", fingerings.len());
            println!("{:<12} {:<name_width$} Key", "Instrument", "Chord");
            println!("{}", "-".repeat(12 + name_width + 24));
            for fingering in &fingerings {
                println!(
                    "{:<12} {:<name_width$} {}",
                    fingering.instrument(),
                    fingering.name(),
                    fingering.key()
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = fingerings
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "instrument": f.instrument(),
                        "chord": f.chord(),
                        "modifier": f.modifier(),
                        "key": f.key(),
                        "tones": f.frets(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("instrument\tchord\tmodifier\tkey");
            for f in &fingerings {
                println!(
                    "{}\t{}\t{}\t{}",
                    f.instrument(),
                    f.chord(),
                    f.modifier(),
                    f.key()
                );
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = ChordCatalog::load(catalog_path.as_deref())?;
    catalog.save_to_file(&output)?;

    println!(
        "Exported {} chords to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}

fn run_add(
    catalog_path: PathBuf,
    instrument: &str,
    chord: String,
    modifier: String,
    frets: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut catalog = if catalog_path.exists() {
        ChordCatalog::load_from_file(&catalog_path)?
    } else {
        ChordCatalog::load_embedded()?
    };

    let registry = InstrumentRegistry::builtin();
    let profile = registry.lookup(instrument)?;
    let parsed = parse_frets(frets);
    for (string, _) in parsed.iter() {
        if !profile.has_string(string) {
            anyhow::bail!(
                "Unknown string '{string}' for {instrument} (strings: {})",
                profile.strings.join(" ")
            );
        }
    }

    let record = ChordRecord {
        chord,
        modifier,
        frets: parsed
            .iter()
            .map(|(s, f)| (s.to_string(), f.to_string()))
            .collect(),
    };
    let fingering = Fingering::construct(profile, &record);

    insert_chord(registry, &mut catalog, instrument, record)?;
    catalog.save_to_file(&catalog_path)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "instrument": instrument,
                "key": fingering.key(),
                "chords": catalog.records(instrument).len(),
            }))?
        ),
        OutputFormat::Text | OutputFormat::Tsv => println!(
            "Added {} {} to {}",
            instrument,
            fingering.key(),
            catalog_path.display()
        ),
    }

    Ok(())
}
