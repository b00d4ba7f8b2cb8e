//! Batch program generation on the rayon thread pool.

use crate::{generate_program, ProgressionConfig, Result, UserPerformance, WeeklyLog};
use rayon::prelude::*;

/// One independent program to generate
#[derive(Clone, Debug)]
pub struct ProgramRequest {
    pub config: ProgressionConfig,
    pub history: Vec<UserPerformance>,
}

/// Generate many programs in parallel
///
/// Results are returned in request order. A failing request does not
/// affect the others.
pub fn generate_many(requests: &[ProgramRequest]) -> Vec<Result<Vec<WeeklyLog>>> {
    tracing::debug!("Generating {} programs in parallel", requests.len());

    requests
        .par_iter()
        .map(|req| generate_program(&req.config, &req.history))
        .collect()
}
