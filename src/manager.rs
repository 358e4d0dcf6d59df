use crate::config::Config;
use crate::engine::Engine;
use crate::lattice::Lattice;
use crate::model::Player;
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::io::Write;

pub struct Manager {
    cfg: Config,
    engine: Engine<Player>,
}

impl Manager {
    pub fn new(cfg: Config) -> Result<Self> {
        cfg.validate().context("failed to validate config")?;

        let lattice = Lattice::new(cfg.columns, cfg.rows).context("failed to construct lattice")?;

        let agents = cfg
            .certainties
            .iter()
            .map(|&cert| Player::new(cfg.life_points, cert, cfg.time_horizon, cfg.std_dev_mut))
            .collect();

        let rng = match cfg.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng().context("failed to seed rng")?,
        };

        let engine = Engine::new(lattice, agents, rng).context("failed to construct engine")?;

        Ok(Self { cfg, engine })
    }

    /// Play every configured round, writing the board after each one.
    pub fn run<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        for i_round in 0..self.cfg.rounds {
            let summary = self
                .engine
                .step()
                .with_context(|| format!("failed to play round {i_round}"))?;

            writeln!(writer, "Round {i_round}: ")?;
            self.engine
                .write_board(writer)
                .context("failed to write board")?;

            log::info!(
                "round {i_round}: coop_share = {:.3}, renewed = {}, life_points = {:.2} +- {:.2}",
                summary.coop_share,
                summary.n_renewed,
                summary.life_points.mean,
                summary.life_points.std_dev,
            );
        }

        writer.flush().context("failed to flush writer stream")?;

        Ok(())
    }
}
