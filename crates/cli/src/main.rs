use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Catalog;
use recommender::{DEFAULT_LIMIT, MovieRecommendation, RecommendError, Recommendations, Recommender};
use resolver::{DEFAULT_CUTOFF, DEFAULT_MAX_CANDIDATES};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Movie Recs - content-based movie recommender
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendations from TF-IDF similarity of genres, keywords, tagline, cast and director", long_about = None)]
struct Cli {
    /// Path to the movies CSV file
    #[arg(short, long, global = true, default_value = "data/movies.csv")]
    data_file: PathBuf,

    /// Minimum similarity (0.0 - 1.0) for a title to match the query
    #[arg(long, global = true, default_value_t = DEFAULT_CUTOFF)]
    cutoff: f64,

    /// Number of close title matches to consider
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_CANDIDATES)]
    max_matches: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to a title
    Recommend {
        /// Movie title, typos allowed
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog titles that closely match a query
    Search {
        /// Movie title to look up (fuzzy match)
        #[arg(long)]
        title: String,
    },

    /// Ask for movie names until an empty line is entered
    Interactive {
        /// Number of recommendations per answer
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Show catalog and model sizes
    Stats,

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading movies from {}...", cli.data_file.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.data_file).context("Failed to load movie catalog")?,
    );
    println!("{} Loaded {} movies in {:?}", "✓".green(), catalog.len(), start.elapsed());

    // Build the similarity matrix (this may take a moment)
    let start = Instant::now();
    let recommender = Recommender::build(catalog)
        .context("Failed to build recommender")?
        .with_cutoff(cli.cutoff)
        .context("Invalid --cutoff")?
        .with_max_candidates(cli.max_matches)
        .context("Invalid --max-matches")?;
    println!(
        "{} Built similarity matrix in {:?}",
        "✓".green(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { title, limit, json } => handle_recommend(&recommender, &title, limit, json)?,
        Commands::Search { title } => handle_search(&recommender, &title),
        Commands::Interactive { limit } => handle_interactive(&recommender, limit)?,
        Commands::Stats => handle_stats(&recommender),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(recommender, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(recommender: &Recommender, title: &str, limit: usize, json: bool) -> Result<()> {
    let result = recommender.recommend(title, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_recommendations(&result);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(recommender: &Recommender, title: &str) {
    let matches = recommender.search(title);

    println!("{}", format!("Close matches for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!(
            "  {} nothing reaches the cutoff of {}",
            "✗".red(),
            recommender.resolver().cutoff()
        );
        return;
    }
    for m in &matches {
        println!("  {:>5}: {} (ratio {:.3})", m.index, m.title, m.ratio);
    }
}

/// Handle the 'interactive' command
fn handle_interactive(recommender: &Recommender, limit: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("Enter your favourite movie name: ");
        io::stdout().flush()?;

        input.clear();
        // EOF
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            break;
        }
        let query = input.trim_end_matches(['\r', '\n']);
        if query.trim().is_empty() {
            break;
        }

        match recommender.recommend(query, limit) {
            Ok(result) => print_recommendations(&result),
            Err(e @ RecommendError::TitleNotFound { .. }) => println!("{} {}", "✗".red(), e),
            Err(e) => return Err(e.into()),
        }
        println!();
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(recommender: &Recommender) {
    let summary = recommender.summary();
    let catalog = recommender.catalog();

    println!("{}", "Catalog:".bold().blue());
    println!("{}Movies: {}", "• ".green(), summary.movies);
    println!("{}Distinct titles: {}", "• ".green(), catalog.distinct_titles());

    println!("{}", "Model:".bold().blue());
    if let Some(vocabulary_size) = summary.vocabulary_size {
        println!("{}Vocabulary size: {}", "• ".cyan(), vocabulary_size);
    }
    println!(
        "{}Similarity matrix: {} x {}",
        "• ".cyan(),
        summary.matrix_size,
        summary.matrix_size
    );
    let bytes = summary.matrix_size * summary.matrix_size * std::mem::size_of::<f32>();
    println!("{}Matrix memory: {:.1} MiB", "• ".cyan(), bytes as f64 / (1024.0 * 1024.0));
}

/// Handle the 'benchmark' command
async fn handle_benchmark(recommender: Recommender, requests: usize, concurrent: usize) -> Result<()> {
    let size = recommender.catalog().len();
    if size == 0 {
        bail!("Cannot benchmark an empty catalog");
    }
    if requests == 0 || concurrent == 0 {
        bail!("--requests and --concurrent must be greater than 0");
    }

    // Pick random catalog titles to query
    let titles: Vec<String> = (0..requests)
        .filter_map(|_| {
            let index = rand::random::<u32>() as usize % size;
            recommender.catalog().get(index).map(|movie| movie.title.clone())
        })
        .collect();

    let permits = Arc::new(Semaphore::new(concurrent));
    let wall_clock = Instant::now();

    // Queries are CPU-bound, so each runs on the blocking pool
    let mut handles = vec![];
    for title in titles {
        let recommender = recommender.clone();
        let permit = permits.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            recommender.recommend(&title, DEFAULT_LIMIT)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print a query result
fn print_recommendations(result: &Recommendations) {
    let close_matches: Vec<&str> = std::iter::once(&result.matched)
        .chain(&result.alternatives)
        .map(|m| m.title.as_str())
        .collect();
    println!("{} {}", "Close matches:".dimmed(), close_matches.join(", "));
    println!(
        "{}",
        format!("Movies suggested for '{}':", result.matched.title).bold().blue()
    );

    for MovieRecommendation { rank, title, score, .. } in &result.items {
        println!("{}. {} - Score: {:.3}", rank.to_string().green(), title, score);
    }
}
