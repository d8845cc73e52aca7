//! Logging setup
//!
//! Only the primary process of a parallel launch writes log output; every
//! other rank gets logging switched off so messages are not repeated once
//! per process.

use std::env;

use tracing::level_filters::LevelFilter;

/// Environment variables through which common launchers publish the rank
const RANK_VARIABLES: [&str; 3] = ["OMPI_COMM_WORLD_RANK", "PMI_RANK", "SLURM_PROCID"];

/// Rank of this process, 0 when not started by a parallel launcher
pub fn process_rank() -> usize {
    rank_from(|name| env::var(name).ok())
}

fn rank_from<L>(lookup: L) -> usize
where
    L: Fn(&str) -> Option<String>,
{
    RANK_VARIABLES
        .iter()
        .find_map(|name| lookup(*name).and_then(|value| value.trim().parse().ok()))
        .unwrap_or(0)
}

/// Level actually used on a given rank
pub fn effective_level(requested: LevelFilter, rank: usize) -> LevelFilter {
    if rank == 0 {
        requested
    } else {
        LevelFilter::OFF
    }
}

/// Install the global fmt subscriber
///
/// Returns `false` if a subscriber was already installed.
pub fn init(requested: LevelFilter) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(effective_level(requested, process_rank()))
        .with_target(false)
        .try_init()
        .is_ok()
}
