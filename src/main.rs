use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gene_finder::align;
use gene_finder::identify::{self, FuzzyOpt, GeneIdentifier, SearchMode, DEFAULT_THRESHOLD};
use gene_finder::io::fasta::{FastaReader, QueryRecord};
use gene_finder::util::dna;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "gene-finder", author, version, about = "Identify known genes in DNA sequences, exactly or within a few point mutations", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Identify genes from a JSON dictionary in one or more sequences
    Identify {
        /// Gene dictionary JSON: {"<sequence>": "<gene id>", ...}
        #[arg(short = 'g', long = "genes")]
        genes: PathBuf,
        /// Sequences to search (read stdin, one per line, if neither these nor --fasta are given)
        sequences: Vec<String>,
        /// Query sequences in FASTA format
        #[arg(short = 'f', long = "fasta")]
        fasta: Option<PathBuf>,
        #[arg(short = 'm', long = "mode", value_enum, default_value_t = SearchMode::Exact)]
        mode: SearchMode,
        /// Fuzzy mode: a window matches when its edit distance is below this value
        #[arg(long = "threshold", default_value_t = DEFAULT_THRESHOLD)]
        threshold: usize,
        /// Fuzzy mode: also scan the window ending at the last base
        #[arg(long = "scan-final-window")]
        scan_final_window: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        /// Emit one JSON object per sequence instead of tab-separated text
        #[arg(long)]
        json: bool,
    },
    /// Print the Levenshtein distance between two sequences
    Distance { a: String, b: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("gene_finder=debug,info")
    } else {
        EnvFilter::new("gene_finder=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Identify {
            genes,
            sequences,
            fasta,
            mode,
            threshold,
            scan_final_window,
            threads,
            json,
        } => {
            let opt = FuzzyOpt {
                threshold,
                scan_final_window,
                threads,
            };
            run_identify(&genes, sequences, fasta.as_deref(), mode, opt, json)
        }
        Commands::Distance { a, b } => {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            println!("{}", align::distance(&a, &b));
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    genes: Vec<&'a str>,
}

fn run_identify(
    genes_path: &Path,
    sequences: Vec<String>,
    fasta: Option<&Path>,
    mode: SearchMode,
    opt: FuzzyOpt,
    json: bool,
) -> Result<()> {
    let identifier = identify::from_json_file_with_opt(genes_path, mode, opt)
        .with_context(|| format!("cannot build {} identifier from '{}'", mode, genes_path.display()))?;
    info!("{} genes loaded, mode {}", identifier.dictionary().len(), mode);

    let mut queries: Vec<QueryRecord> = sequences
        .into_iter()
        .enumerate()
        .map(|(i, seq)| QueryRecord { name: format!("seq{}", i + 1), seq })
        .collect();

    if let Some(path) = fasta {
        let fh = std::fs::File::open(path)
            .with_context(|| format!("cannot open query FASTA '{}'", path.display()))?;
        for rec in FastaReader::new(std::io::BufReader::new(fh)) {
            queries.push(rec.with_context(|| format!("cannot parse query FASTA '{}'", path.display()))?);
        }
    } else if queries.is_empty() {
        for line in std::io::stdin().lock().lines() {
            let line = line.context("cannot read sequences from stdin")?;
            let seq = line.trim();
            if seq.is_empty() {
                continue;
            }
            let name = format!("seq{}", queries.len() + 1);
            queries.push(QueryRecord { name, seq: seq.to_string() });
        }
    }

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    for q in &queries {
        if let Some((pos, ch)) = dna::first_non_acgt(&q.seq) {
            warn!(
                "{}: {} non-ACGT character(s), first '{}' at position {}",
                q.name,
                dna::count_non_acgt(&q.seq),
                ch,
                pos + 1
            );
        }
        write_report(&mut out, q, identifier.as_ref(), json)?;
    }
    out.flush()?;
    Ok(())
}

fn write_report<W: Write>(out: &mut W, q: &QueryRecord, identifier: &dyn GeneIdentifier, json: bool) -> Result<()> {
    let found = identifier.identify(&q.seq);
    let genes: Vec<&str> = found.iter().map(String::as_str).collect();
    if json {
        let report = Report { name: &q.name, genes };
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else if genes.is_empty() {
        writeln!(out, "{}\t*", q.name)?;
    } else {
        writeln!(out, "{}\t{}", q.name, genes.join(","))?;
    }
    Ok(())
}
