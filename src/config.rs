use anyhow::{Context, Result, bail};
use std::{fmt::Debug, ops::RangeBounds};

/// Simulation configuration parameters.
///
/// Built from the command line and validated before use.
#[derive(Debug, PartialEq, Clone)]
pub struct Config {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub columns: usize,

    /// Initial life points of every agent.
    pub life_points: i64,
    /// Initial certainty of every agent, row-major (`rows x columns`).
    pub certainties: Vec<f64>,

    /// Neighborhood radius agents can see.
    pub space_horizon: usize,
    /// Number of past rounds agents remember.
    pub time_horizon: usize,

    /// Number of rounds to play.
    pub rounds: usize,

    /// Seed of the random number generator (OS entropy if absent).
    pub seed: Option<u64>,
    /// Standard deviation of certainty mutation at birth.
    pub std_dev_mut: f64,
}

impl Config {
    /// Check every parameter.
    ///
    /// # Errors
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        check_num(self.rows, 1..10_000).context("invalid number of rows")?;
        check_num(self.columns, 1..10_000).context("invalid number of columns")?;

        check_num(self.life_points, 1..1_000_000_000).context("invalid life points")?;

        let n_cells = self.rows * self.columns;
        let n_cert = self.certainties.len();
        if n_cert != n_cells {
            bail!("certainty array must equal m*n ({n_cells}), but has {n_cert} elements");
        }
        for (i_cert, &cert) in self.certainties.iter().enumerate() {
            check_num(cert, 0.0..=1.0).with_context(|| format!("invalid certainty {i_cert}"))?;
        }

        check_num(self.space_horizon, 1..10_000).context("invalid space horizon")?;
        if self.space_horizon != 1 {
            log::warn!(
                "space horizon {} requested, only nearest neighbors play",
                self.space_horizon
            );
        }
        check_num(self.time_horizon, 0..10_000).context("invalid time horizon")?;

        check_num(self.std_dev_mut, 0.0..1.0).context("invalid mutation standard deviation")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
