// src/main.rs
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jokes::{JokeCollection, JokeRecord, ProfanityList};

#[derive(Parser, Debug)]
#[command(author, version, about = "Mask, export and tell jokes from a dataset", long_about = None)]
struct Args {
    /// Dataset file: comma-separated rows, or a `.json` nested mapping
    dataset: PathBuf,

    /// Newline-delimited list of banned phrases
    #[arg(short, long)]
    profanities: PathBuf,

    /// Write the XML tree document here
    #[arg(long)]
    xml: Option<PathBuf>,

    /// Write the JSON mapping document here
    #[arg(long)]
    json: Option<PathBuf>,

    /// Tell one random joke
    #[arg(long)]
    random: bool,

    /// Tell every multi-sentence joke in load order
    #[arg(long)]
    tell: bool,

    /// Pause between build-up and punch-line, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pause_ms: u64,

    /// Worker threads for record construction (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
}

fn tell(joke: &JokeRecord, pause: Duration) {
    match joke.presentation() {
        Some(p) => {
            println!("{}", p.build_up);
            thread::sleep(pause);
            println!("{}", p.punch_line);
        }
        None => println!("{}", joke),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let profanity = ProfanityList::from_path(&args.profanities)
        .with_context(|| format!("loading profanity list {}", args.profanities.display()))?;

    let load_start = Instant::now();
    let jokes = JokeCollection::from_path(&args.dataset, &profanity)
        .with_context(|| format!("loading dataset {}", args.dataset.display()))?;
    tracing::info!(
        jokes = jokes.len(),
        masked = jokes.total_profanity(),
        elapsed = ?load_start.elapsed(),
        "jokes ready"
    );

    if let Some(path) = &args.xml {
        jokes
            .save_xml(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.json {
        jokes
            .save_json(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let pause = Duration::from_millis(args.pause_ms);
    if args.random {
        tell(jokes.random_joke()?, pause);
    }
    if args.tell {
        for joke in jokes.iter().filter(|j| j.presentation().is_some()) {
            tell(joke, pause);
            println!();
        }
    }

    Ok(())
}
