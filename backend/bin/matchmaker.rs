use anyhow::Result;
use clap::{Arg, Command};
use kindred::{
    constants::{MAX_MATCHES_PER_CYCLE, MIN_MATCHABLE_SCORE, PENDING_BACKLOG_LOG_EVERY_N_ITERS},
    db::{get_db_pool, matches, profiles, DatabaseConfig},
    models::MatchStatus,
    services::{scoring, MatchService, NotificationService},
    utils::{config::Config, init_logging},
};
use rand::seq::SliceRandom;
use sqlx::PgPool;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("💘 Starting Kindred Matchmaker...");

    let args = Command::new("matchmaker")
        .about("Generates candidate matches from active profiles")
        .arg(
            Arg::new("once")
                .long("once")
                .help("Run a single generation cycle and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();
    let run_once = args.get_flag("once");

    // Load config and connect to database
    let config = Config::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let pool = get_db_pool(&db_config).await?;

    let service = MatchService::new(
        pool.clone(),
        NotificationService::new(config.notification_webhook_url.clone()),
    );

    if run_once {
        run_generation_cycle(&pool, &service).await?;
        return Ok(());
    }

    run_matchmaker(pool, service, config).await
}

async fn run_matchmaker(pool: PgPool, service: MatchService, config: Config) -> Result<()> {
    let mut interval = time::interval(Duration::from_secs(config.matchmaker_interval_secs));
    let mut iter_count: usize = 0;

    loop {
        interval.tick().await;
        iter_count += 1;

        info!("🔍 Matchmaker cycle {}", iter_count);

        if let Err(e) = run_generation_cycle(&pool, &service).await {
            error!("❌ Generation cycle failed: {}", e);
        }

        // Log the review backlog periodically (for monitoring)
        if iter_count % PENDING_BACKLOG_LOG_EVERY_N_ITERS == 0 {
            match matches::count_with_status(&pool, MatchStatus::PendingApproval).await {
                Ok(pending) => {
                    if pending > 0 {
                        info!("📊 {} matches awaiting admin review", pending);
                    }
                }
                Err(e) => {
                    error!("❌ Failed to count pending matches: {}", e);
                }
            }
        }
    }
}

async fn run_generation_cycle(pool: &PgPool, service: &MatchService) -> Result<()> {
    let active = profiles::get_active_profiles(pool).await?;
    let existing: HashSet<(i32, i32)> = matches::get_existing_pairs(pool)
        .await?
        .into_iter()
        .collect();

    let mut candidates = scoring::candidate_pairs(&active, &existing);
    // Shuffle so a cycle's output is not ordered by profile id
    candidates.shuffle(&mut rand::rng());

    let mut created = 0usize;
    for (a, b) in candidates {
        if created >= MAX_MATCHES_PER_CYCLE {
            info!("⏳ Reached per-cycle match limit, deferring remaining pairs");
            break;
        }

        let score = scoring::compatibility_score(a, b);
        if score < MIN_MATCHABLE_SCORE {
            continue;
        }

        match service.create_match(a.id, b.id, score).await {
            Ok(Some(m)) => {
                created += 1;
                info!(
                    "💘 Created match {} ({} <-> {}) with score {}",
                    m.id, m.user_id_1, m.user_id_2, m.compatibility_score
                );
            }
            Ok(None) => {
                // The pair raced into existence since the scan
            }
            Err(e) => {
                error!("❌ Failed to create match for pair ({}, {}): {}", a.id, b.id, e);
            }
        }
    }

    if created > 0 {
        info!("🎯 Generated {} candidate matches this cycle", created);
    }

    Ok(())
}
