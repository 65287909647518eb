//! Command-line front end for inspecting Flock ranking.
//!
//! Loads a JSON snapshot (viewing profile plus raw candidate records),
//! ranks it with the default or overridden weights, and prints the scored
//! feed. Meant for tuning sessions and bug reports, not production traffic.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flock_core::RankWeights;
use flock_rank::{
    decode_people, decode_posts, rank_people, rank_posts, FeedSnapshot, PeopleSnapshot,
};

#[derive(Debug, Parser)]
#[command(name = "flock")]
#[command(about = "Rank a feed or people snapshot with the Flock scorer")]
struct Cli {
    /// Optional YAML file overriding the default scoring weights.
    #[arg(long, global = true)]
    weights: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank the posts in a feed snapshot.
    RankPosts {
        /// Snapshot JSON: `{ "profile": {...}, "posts": [...] }`.
        snapshot: PathBuf,
        /// Print only the top N results.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rank the candidates in a people snapshot.
    RankPeople {
        /// Snapshot JSON: `{ "profile": {...}, "people": [...] }`.
        snapshot: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_env("FLOCK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let weights = load_weights(cli.weights.as_deref())?;
    weights.validate().context("invalid scoring weights")?;

    match cli.command {
        Commands::RankPosts { snapshot, limit } => {
            let raw = std::fs::read_to_string(&snapshot)
                .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
            let feed: FeedSnapshot =
                serde_json::from_str(&raw).context("parsing feed snapshot")?;
            let posts = decode_posts(&feed.posts);
            let ranked = rank_posts(&feed.profile, posts, Utc::now(), &weights);

            println!(
                "{:>6}  {:>6}  {:>5}  {:>5}  {:>5}  id / matched",
                "total", "inter", "goal", "engag", "recen"
            );
            for entry in ranked.iter().take(limit.unwrap_or(usize::MAX)) {
                let score = &entry.score;
                println!(
                    "{:>6.1}  {:>6.1}  {:>5.1}  {:>5.1}  {:>5.1}  {}{}",
                    score.total,
                    score.interest_match,
                    score.goal_alignment,
                    score.engagement,
                    score.recency,
                    entry.post.id,
                    format_matches(&score.matched_interests, &score.matched_goals),
                );
            }
        }
        Commands::RankPeople { snapshot, limit } => {
            let raw = std::fs::read_to_string(&snapshot)
                .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
            let people: PeopleSnapshot =
                serde_json::from_str(&raw).context("parsing people snapshot")?;
            let candidates = decode_people(&people.people);
            let ranked = rank_people(&people.profile, candidates, &weights);

            println!(
                "{:>6}  {:>6}  {:>5}  {:>5}  shared  id",
                "total", "inter", "goal", "activ"
            );
            for entry in ranked.iter().take(limit.unwrap_or(usize::MAX)) {
                let score = &entry.score;
                println!(
                    "{:>6.1}  {:>6.1}  {:>5.1}  {:>5.1}  {:>3}+{:<3} {}",
                    score.total,
                    score.interest,
                    score.goal,
                    score.activity,
                    score.shared_interests,
                    score.shared_goals,
                    entry.candidate.id,
                );
            }
        }
    }

    Ok(())
}

fn load_weights(path: Option<&std::path::Path>) -> anyhow::Result<RankWeights> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading weights {}", path.display()))?;
            serde_yaml::from_str(&raw).context("parsing weights YAML")
        }
        None => Ok(RankWeights::default()),
    }
}

fn format_matches(interests: &[String], goals: &[String]) -> String {
    if interests.is_empty() && goals.is_empty() {
        return String::new();
    }
    let mut terms: Vec<&str> = interests.iter().map(String::as_str).collect();
    terms.extend(goals.iter().map(String::as_str));
    format!("  [{}]", terms.join(", "))
}
