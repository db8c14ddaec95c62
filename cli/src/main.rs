use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use plotindex::scanner::decode_latin1;
use plotindex::{CorpusFormat, IndexBuilder, PlotIndex};
use tracing_subscriber::{fmt, EnvFilter};

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "plotsearch")]
#[command(about = "Boolean and phrase search over a plot.list corpus", long_about = None)]
struct Cli {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Corpus file (ISO-8859-1 plot.list)
    #[arg(long)]
    plots: PathBuf,
    /// Line that ends the corpus preamble
    #[arg(long)]
    delimiter: Option<String>,
    /// Suffix marking a withdrawn title line (matched in lowercase)
    #[arg(long)]
    marker: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries given on the command line and print matching title lines
    Query {
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Run every query in a file, optionally checking against expected results
    Run {
        /// One query per line
        #[arg(long)]
        queries: PathBuf,
        /// Blocks of a count line followed by that many expected title lines
        #[arg(long)]
        results: Option<PathBuf>,
    },
    /// Print document and vocabulary counts
    Stats {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let index = build_index(&cli.corpus)?;

    match cli.command {
        Commands::Query { queries } => {
            for query in queries {
                let hits = index.query(&query)?;
                println!("{query}: {} hits", hits.len());
                for line in hits {
                    println!("  {line}");
                }
            }
            Ok(())
        }
        Commands::Run { queries, results } => run_batch(&index, &queries, results.as_deref()),
        Commands::Stats { json } => {
            let stats = index.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("documents:           {}", stats.num_docs);
                println!("title terms:         {}", stats.title_terms);
                println!("plot terms:          {}", stats.plot_terms);
                println!("episode title terms: {}", stats.episode_title_terms);
                println!("type terms:          {}", stats.type_terms);
                println!("year terms:          {}", stats.year_terms);
            }
            Ok(())
        }
    }
}

fn build_index(args: &CorpusArgs) -> Result<PlotIndex> {
    let mut format = CorpusFormat::default();
    if let Some(delimiter) = &args.delimiter {
        format.header_delimiter = delimiter.clone();
    }
    if let Some(marker) = &args.marker {
        format.withdrawal_marker = marker.to_lowercase();
    }
    let start = Instant::now();
    let index = IndexBuilder::new(format)
        .build_path(&args.plots)
        .with_context(|| format!("building indices from {}", args.plots.display()))?;
    println!("runtime: {} nanoseconds", start.elapsed().as_nanos());
    Ok(index)
}

fn run_batch(index: &PlotIndex, queries_path: &Path, results_path: Option<&Path>) -> Result<()> {
    let queries = read_lines(queries_path)?;
    let expected = match results_path {
        Some(path) => Some(parse_expected(&read_lines(path)?).with_context(|| format!("parsing {}", path.display()))?),
        None => None,
    };

    let mut failures = 0usize;
    for (i, query) in queries.iter().enumerate() {
        let start = Instant::now();
        let actual = index.query(query)?;
        let elapsed = start.elapsed();

        println!();
        println!("query:           {query}");
        println!("runtime:         {} nanoseconds.", elapsed.as_nanos());
        let Some(expected) = &expected else {
            println!("actual result:   {:?}", actual);
            continue;
        };
        let want = expected.get(i).cloned().unwrap_or_default();
        println!("expected result: {:?}", want);
        println!("actual result:   {:?}", actual);
        if want == actual {
            println!("SUCCESS");
        } else {
            println!("FAILURE");
            failures += 1;
        }
    }

    tracing::info!(queries = queries.len(), failures, "batch finished");
    if failures > 0 {
        bail!("{failures} of {} queries failed", queries.len());
    }
    Ok(())
}

/// Read a Latin-1 text file into lines without terminators.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut lines: Vec<String> = bytes
        .split(|&b| b == b'\n')
        .map(|line| decode_latin1(line.strip_suffix(b"\r").unwrap_or(line)))
        .collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

fn parse_expected(lines: &[String]) -> Result<Vec<BTreeSet<String>>> {
    let mut blocks = Vec::new();
    let mut iter = lines.iter();
    while let Some(count) = iter.next() {
        let count: usize = count.trim().parse().with_context(|| format!("bad result count {count:?}"))?;
        let mut block = BTreeSet::new();
        for _ in 0..count {
            let Some(line) = iter.next() else {
                bail!("result block ends early, expected {count} lines");
            };
            block.insert(line.clone());
        }
        blocks.push(block);
    }
    Ok(blocks)
}
