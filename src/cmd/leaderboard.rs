use crate::reports;
use clap::Args;
use dartgust::config::Config;
use dartgust::error::DgResult;
use dartgust::leaderboard::Leaderboard;
use dartgust::session::ParticipantId;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct LeaderboardArgs {
    /// Raw participant number; normalized to three digits.
    pub participant: String,

    pub score: u32,
}

pub fn run(args: LeaderboardArgs, config: &Config) -> DgResult<()> {
    let id = ParticipantId::parse(&args.participant);
    let mut board = Leaderboard::seeded().with_capacity(config.session.leaderboard_size);
    board.update(&id, args.score);

    match board.rank_of(&id) {
        Some(rank) => info!("🏆 {} placed #{} with {}", id, rank, args.score),
        None => info!("{} did not make the top {}", id, board.capacity()),
    }
    reports::print_leaderboard(&board, Some(&id));
    Ok(())
}
