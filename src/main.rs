//! AluRegions CLI entry point
//!
//! Classifies gene regions by Alu content and exports CCDS introns.

use alu_regions::core::{ccds_introns, create_output, DedupContext};
use alu_regions::formats::{bed, gff, table};
use alu_regions::{classify_transcripts, ClassifyConfig, MissingContextPolicy, RegionOrder};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

/// Region ordering policy (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum RegionOrderArg {
    /// Trust annotation order; reverse '-' strand lists
    #[default]
    #[value(name = "as-listed")]
    AsListed,
    /// Sort every region list by coordinate
    #[value(name = "sorted")]
    Sorted,
}

impl From<RegionOrderArg> for RegionOrder {
    fn from(arg: RegionOrderArg) -> Self {
        match arg {
            RegionOrderArg::AsListed => RegionOrder::AsListed,
            RegionOrderArg::Sorted => RegionOrder::Sorted,
        }
    }
}

/// Policy for region records seen before their transcript (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum MissingContextArg {
    /// Abort with an error
    #[default]
    #[value(name = "fail")]
    Fail,
    /// Drop the record with a warning
    #[value(name = "discard")]
    Discard,
}

impl From<MissingContextArg> for MissingContextPolicy {
    fn from(arg: MissingContextArg) -> Self {
        match arg {
            MissingContextArg::Fail => MissingContextPolicy::Fail,
            MissingContextArg::Discard => MissingContextPolicy::Discard,
        }
    }
}

#[derive(Parser)]
#[command(name = "alu-regions")]
#[command(about = "Classify gene regions by the Alu insertions they contain")]
#[command(version)]
struct Cli {
    /// How region lists are ordered before intron derivation
    #[arg(long = "region-order", global = true, default_value = "as-listed")]
    region_order: RegionOrderArg,

    /// What to do with exon/CDS/UTR records preceding their transcript record
    #[arg(long = "missing-context", global = true, default_value = "fail")]
    missing_context: MissingContextArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count and classify Alu elements in every gene region and intron
    Classify {
        /// RepeatMasker BED file
        repeats: PathBuf,
        /// GFF3 transcript annotation
        annotation: PathBuf,
        /// Output table (gzip if ending in .gz)
        output: PathBuf,
        /// Intron BED output (optional)
        #[arg(long = "intron-bed")]
        intron_bed: Option<PathBuf>,
        /// Repeat label substring selecting target elements
        #[arg(short = 'm', long, default_value = "Alu")]
        marker: String,
        /// Number of threads
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
        /// Emit each intron only once across transcripts
        #[arg(long = "dedup-introns")]
        dedup_introns: bool,
    },
    /// Export distinct introns of protein-coding CCDS transcripts as BED
    CcdsIntrons {
        /// GFF3 transcript annotation
        annotation: PathBuf,
        /// Output BED (gzip if ending in .gz)
        output: PathBuf,
        /// Keep only introns of at most this many bases
        #[arg(long = "max-length")]
        max_length: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Classify { repeats, annotation, output, intron_bed, marker, threads, dedup_introns } => {
            let config = ClassifyConfig {
                marker,
                threads,
                region_order: cli.region_order.into(),
                missing_context: cli.missing_context.into(),
                dedup_introns,
            };

            eprintln!("Loading repeats: {:?}", repeats);
            let (index, _) = bed::load_repeat_index(&repeats, &config.marker)
                .map_err(|e| anyhow::anyhow!("Failed to load repeats: {}", e))?;

            eprintln!("Loading annotation: {:?}", annotation);
            let transcripts = gff::load_transcripts(&annotation, config.missing_context)
                .map_err(|e| anyhow::anyhow!("Failed to load annotation: {}", e))?;

            eprintln!("Classifying gene regions -> {:?}", output);
            let mut table_out = create_output(&output)?;
            table::write_header(&mut table_out)?;
            let mut bed_out = match &intron_bed {
                Some(path) => Some(create_output(path)?),
                None => None,
            };

            let mut ctx = DedupContext::new();
            let summary = classify_transcripts(&transcripts, &index, &config, &mut ctx, |record| {
                table::write_record(&mut table_out, record)?;
                if record.region.is_intron() {
                    if let Some(out) = bed_out.as_mut() {
                        bed::write_intron_bed(out, record)?;
                    }
                }
                Ok(())
            })?;
            table_out.finish()?;
            if let Some(out) = bed_out {
                out.finish()?;
            }

            eprintln!("\n=== Classification Statistics ===");
            eprintln!("Transcripts:       {}", summary.transcripts);
            eprintln!("Skipped (no repeats on chromosome): {}", summary.skipped_unindexed);
            eprintln!("Records:           {}", summary.records);
            eprintln!("Introns:           {}", summary.introns);
            if config.dedup_introns {
                eprintln!("Duplicate introns: {}", summary.duplicate_introns);
            }
            eprintln!(
                "Of {} annotated {}, {} ({:.2}%) occur in introns",
                summary.indexed_repeats,
                config.marker,
                summary.intronic_repeats,
                summary.intronic_percentage()
            );
            eprintln!("Time elapsed:      {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::CcdsIntrons { annotation, output, max_length } => {
            eprintln!("Loading annotation: {:?}", annotation);
            let transcripts = gff::load_transcripts(&annotation, cli.missing_context.into())
                .map_err(|e| anyhow::anyhow!("Failed to load annotation: {}", e))?;

            let mut ctx = DedupContext::new();
            let introns = ccds_introns(&transcripts, cli.region_order.into(), max_length, &mut ctx);

            eprintln!("Writing CCDS introns -> {:?}", output);
            let mut out = create_output(&output)?;
            for intron in &introns {
                bed::write_ccds_intron(&mut out, intron)?;
            }
            out.finish()?;

            eprintln!("\n=== CCDS Intron Statistics ===");
            eprintln!("Transcripts:     {}", transcripts.len());
            eprintln!("Distinct introns: {}", ctx.intron_count());
            eprintln!("Written:         {}", introns.len());
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
