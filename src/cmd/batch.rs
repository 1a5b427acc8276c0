use crate::reports;
use clap::Args;
use dartgust::config::Config;
use dartgust::error::DgResult;
use dartgust::geometry::Arena;
use dartgust::leaderboard::Leaderboard;
use dartgust::sim::{self, ThrowerProfile};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub profile: ThrowerProfile,

    #[arg(short = 'n', long, default_value_t = 20)]
    pub participants: usize,
}

pub fn run(args: BatchArgs, config: &Config, arena: Arc<Arena>, seed: Option<u64>) -> DgResult<()> {
    info!(
        "🔥 Simulating {} participants on {} threads",
        args.participants,
        rayon::current_num_threads()
    );
    let started = Instant::now();
    let sessions = sim::run_batch(config, arena, args.participants, args.profile, seed)?;
    info!("⏱️  Done in {:.2?}", started.elapsed());

    let stats = sim::summarize(&sessions);
    reports::print_batch_stats(&stats);

    let mut board = Leaderboard::seeded().with_capacity(config.session.leaderboard_size);
    for session in &sessions {
        board.update(session.participant(), session.score());
    }
    reports::print_leaderboard(&board, None);
    Ok(())
}
