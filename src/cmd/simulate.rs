use crate::reports;
use clap::Args;
use dartgust::config::Config;
use dartgust::error::DgResult;
use dartgust::export;
use dartgust::geometry::Arena;
use dartgust::session::ParticipantId;
use dartgust::sim::{self, ThrowerProfile};
use dartgust::timeline::{Block, Timeline};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub profile: ThrowerProfile,

    /// Raw participant number; normalized to three digits.
    #[arg(short, long, default_value = "000")]
    pub participant: String,

    /// Directory for the per-trial CSV.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Only show trials from this block (practice or main). The CSV keeps every trial.
    #[arg(long)]
    pub block: Option<Block>,
}

pub fn run(
    args: SimulateArgs,
    config: &Config,
    arena: Arc<Arena>,
    seed: Option<u64>,
) -> DgResult<()> {
    let participant = ParticipantId::parse(&args.participant);
    let timeline = Timeline::standard(config);
    info!(
        "🏹 Participant {}: {} trials ({} gust)",
        participant,
        timeline.len(),
        timeline.gust_count()
    );

    let session = sim::run_session(config, arena, participant, args.profile, seed)?;

    reports::print_trial_table(&timeline, session.results(), args.block);
    reports::print_leaderboard(session.leaderboard(), Some(session.participant()));

    if let Some(dir) = args.out {
        export::write_csv_file(dir, &session, super::unix_ms())?;
    }
    Ok(())
}
