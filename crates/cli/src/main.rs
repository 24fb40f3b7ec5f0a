use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Dataset, Movie, MovieId};
use engine::{Recommender, SimilarityCache};
use std::path::PathBuf;
use std::time::Instant;

/// CineMatch - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Item-based collaborative filtering over MovieLens ratings", long_about = None)]
struct Cli {
    /// Path to the MovieLens 100K dataset directory (u.data / u.item)
    #[arg(short, long, default_value = "data/ml-100k")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a given movie
    Recommend {
        /// Movie ID to find similar movies for
        #[arg(long, conflicts_with = "title")]
        movie_id: Option<MovieId>,

        /// Movie title to find similar movies for (case-insensitive exact match)
        #[arg(long)]
        title: Option<String>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=20))]
        limit: u8,

        /// Print recommendations as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show dataset statistics
    Stats,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the dataset snapshot (this may take a moment)
    println!("Loading MovieLens dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Dataset::load_from_files(&cli.data_dir)
        .context("Failed to load MovieLens dataset")?;
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    // The data directory identifies the snapshot for cache purposes; the
    // cache lives only for this invocation, so the key mainly documents
    // the contract.
    let snapshot_key = cli.data_dir.display().to_string();

    match cli.command {
        Commands::Recommend {
            movie_id,
            title,
            limit,
            json,
        } => handle_recommend(&dataset, &snapshot_key, movie_id, title, limit as usize, json)?,
        Commands::Search { title } => handle_search(&dataset, &title),
        Commands::Stats => handle_stats(&dataset),
    }

    Ok(())
}

/// Resolve the queried movie from either an id or an exact title
fn resolve_movie<'a>(
    dataset: &'a Dataset,
    movie_id: Option<MovieId>,
    title: Option<String>,
) -> Result<&'a Movie> {
    match (movie_id, title) {
        (Some(id), _) => dataset
            .get_movie(id)
            .ok_or_else(|| anyhow!("Movie {} not found in the catalog", id)),
        (None, Some(title)) => dataset
            .find_by_title(&title)
            .ok_or_else(|| anyhow!("No movie titled {:?} in the catalog", title)),
        (None, None) => Err(anyhow!("Pass either --movie-id or --title")),
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    dataset: &Dataset,
    snapshot_key: &str,
    movie_id: Option<MovieId>,
    title: Option<String>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let movie = resolve_movie(dataset, movie_id, title)?;

    let cache = SimilarityCache::new();
    let start = Instant::now();
    let similarity = cache
        .get_or_build(snapshot_key, dataset.ratings(), dataset.movies())
        .context("Failed to build the similarity matrix")?;
    println!(
        "{} Built {}x{} similarity matrix in {:?}",
        "✓".green(),
        similarity.num_movies(),
        similarity.num_movies(),
        start.elapsed()
    );

    let recommender = Recommender::new(similarity);
    let recommendations = recommender
        .recommend(movie.id, limit)
        .with_context(|| format!("Failed to recommend for movie {}", movie.id))?;

    if json {
        let entries: Vec<serde_json::Value> = recommendations
            .iter()
            .map(|rec| {
                serde_json::json!({
                    "movie_id": rec.movie_id,
                    "title": dataset.get_movie(rec.movie_id).map(|m| m.title.as_str()),
                    "score": rec.score,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!();
    println!("Because you liked {}:", movie.title.bold());
    if let Some(stats) = dataset.movie_stats(movie.id) {
        println!(
            "  ({} ratings, {:.1} average)",
            stats.rating_count, stats.avg_rating
        );
    }
    println!();

    if recommendations.is_empty() {
        println!("{}", "No similar movies found.".yellow());
        return Ok(());
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        let title = dataset
            .get_movie(rec.movie_id)
            .map(|m| m.title.as_str())
            .unwrap_or("<unknown title>");
        let match_pct = (rec.score * 100.0).min(99.0);
        println!(
            "  {}. {} {}",
            rank + 1,
            title.cyan(),
            format!("({:.1}% match)", match_pct).dimmed()
        );
    }

    Ok(())
}

/// Handle the 'search' command
fn handle_search(dataset: &Dataset, title: &str) {
    let matches = dataset.search_titles(title);

    if matches.is_empty() {
        println!("{}", format!("No movies matching {:?}", title).yellow());
        return;
    }

    println!("Found {} movie(s):", matches.len());
    for movie in matches {
        println!("  {:>5}  {}", movie.id, movie.title);
    }
}

/// Handle the 'stats' command
fn handle_stats(dataset: &Dataset) {
    let stats = dataset.stats();

    println!("Dataset statistics:");
    println!("  Users:   {}", stats.users);
    println!("  Movies:  {}", stats.movies);
    println!("  Ratings: {}", stats.ratings);
}
