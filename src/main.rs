use std::path::PathBuf;

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod calibration;
mod context;
mod db;
mod explain;
mod factors;
mod interactions;
mod models;
mod report;
mod scoring;
mod settings;
mod trajectory;

#[derive(Parser)]
#[command(name = "burnout-early-warning")]
#[command(about = "Daily burnout-risk and readiness scoring engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import daily samples from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, value_enum)]
        kind: db::SampleKind,
    },
    /// Record a subjective feeling check-in
    Checkin {
        #[arg(long)]
        email: String,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
        feeling: i32,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
        stress: i32,
    },
    /// Score one person's day and store the result
    Score {
        #[arg(long)]
        email: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        email: String,
        #[arg(long, default_value_t = 30)]
        since_days: i64,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Forecast the burnout trajectory
    Predict {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool, Utc::now().date_naive()).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv, kind } => {
            let inserted = db::import_csv(&pool, &csv, kind).await?;
            println!("Upserted {inserted} samples from {}.", csv.display());
        }
        Commands::Checkin {
            email,
            feeling,
            stress,
        } => {
            let (person_id, _) = db::fetch_person(&pool, &email).await?;
            let algorithm_score = db::fetch_latest_burnout_score(&pool, person_id).await?;
            db::insert_checkin(
                &pool,
                person_id,
                Utc::now().date_naive(),
                feeling,
                stress,
                algorithm_score,
            )
            .await?;
            println!("Check-in recorded for {email}.");
        }
        Commands::Score { email, date } => {
            let day = date.unwrap_or_else(|| Utc::now().date_naive());
            let result = score_person(&pool, &email, day).await?;

            println!(
                "{email} on {day}: zone {} (burnout {:.1}, readiness {:.1})",
                result.zone.as_str(),
                result.burnout_score,
                result.readiness_score
            );
            for factor in &result.explanation.ranked_factors {
                println!(
                    "- {} ({}): {:.0}/100",
                    factor.label, factor.value, factor.score
                );
            }
            if result.triggers_alert() {
                println!(
                    "Zone transition {} -> {}: alert condition met.",
                    result
                        .previous_zone
                        .map_or("unknown", |zone| zone.as_str()),
                    result.zone.as_str()
                );
            }
        }
        Commands::Report {
            email,
            since_days,
            out,
        } => {
            let (person_id, full_name) = db::fetch_person(&pool, &email).await?;
            let tomorrow = Utc::now().date_naive() + Duration::days(1);
            let history = db::fetch_score_history(&pool, person_id, tomorrow).await?;
            let since = Utc::now().date_naive() - Duration::days(since_days.max(1));
            let windowed: Vec<_> = history.iter().filter(|p| p.day >= since).cloned().collect();
            let config = db::fetch_threshold_config(&pool, person_id).await?;
            let prediction = trajectory::predict(&windowed, &config);
            let latest = db::fetch_latest_result(&pool, person_id).await?;

            let report = report::build_report(
                &full_name,
                &email,
                since_days,
                &windowed,
                latest.as_ref(),
                &prediction,
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Predict { email } => {
            let (person_id, _) = db::fetch_person(&pool, &email).await?;
            let tomorrow = Utc::now().date_naive() + Duration::days(1);
            let history = db::fetch_score_history(&pool, person_id, tomorrow).await?;
            let config = db::fetch_threshold_config(&pool, person_id).await?;
            let prediction = trajectory::predict(&history, &config);

            if !prediction.has_prediction {
                println!(
                    "Not enough scored days for a forecast ({} of {} needed).",
                    prediction.days_analyzed,
                    trajectory::MIN_HISTORY_DAYS
                );
                return Ok(());
            }
            if let (Some(score), Some(zone)) = (prediction.current_score, prediction.current_zone) {
                println!("Current: {score:.1} ({})", zone.as_str());
            }
            if let Some(trend) = &prediction.trend {
                println!(
                    "Trend: {:?} ({:+.1}/day) over {} days",
                    trend.direction, trend.daily_change, prediction.days_analyzed
                );
            }
            if let Some(days) = prediction.days_until_red {
                println!("Projected to cross the red threshold in ~{days} days.");
            }
            for point in &prediction.forecast {
                println!(
                    "Day +{}: {:.1} ({}) at {:.0}% confidence",
                    point.day_offset,
                    point.predicted_score,
                    point.predicted_zone.as_str(),
                    point.confidence
                );
            }
        }
    }

    Ok(())
}

/// Gathers one person's inputs, runs the pure pipeline, and persists the
/// result. The write is the last step, so an interrupted run leaves nothing
/// behind and is safe to retry.
async fn score_person(
    pool: &sqlx::PgPool,
    email: &str,
    day: NaiveDate,
) -> anyhow::Result<models::ScoringResult> {
    let (person_id, _) = db::fetch_person(pool, email).await?;
    let config = db::fetch_threshold_config(pool, person_id).await?;
    let checkin_cutoff = day - Duration::days(config.calibration_window_days.max(1));

    // Independent reads, issued concurrently.
    let (health, work, baseline, preferences, life_events, checkins, history) = tokio::try_join!(
        db::fetch_health_sample(pool, person_id, day),
        db::fetch_work_sample(pool, person_id, day),
        db::fetch_baseline(pool, person_id),
        db::fetch_preferences(pool, person_id),
        db::fetch_life_events(pool, person_id),
        db::fetch_checkins(pool, person_id, checkin_cutoff),
        db::fetch_score_history(pool, person_id, day),
    )?;

    let health = health.unwrap_or_default();
    let work = work.unwrap_or_default();
    let baseline = baseline.unwrap_or_default();

    let result = scoring::score_day(&scoring::DayInputs {
        person_id,
        day,
        health: &health,
        work: &work,
        baseline: &baseline,
        preferences: preferences.as_ref(),
        life_events: &life_events,
        checkins: &checkins,
        history: &history,
        config: &config,
    });

    db::upsert_scoring_result(pool, &result).await?;
    info!(
        person = %person_id,
        day = %day,
        zone = result.zone.as_str(),
        burnout = result.burnout_score,
        "scored day"
    );
    Ok(result)
}
