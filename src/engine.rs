use crate::lattice::{Direction, Lattice};
use crate::model::{Agent, Decision, Outcome};
use crate::stats::{Accumulator, AccumulatorReport};
use anyhow::{Context, Result, bail};
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::io::Write;

/// Round engine.
///
/// Owns the agent grid, the two outcome grids of the current round, and the
/// random number generator shared by every stochastic step.
pub struct Engine<A: Agent> {
    lattice: Lattice,
    agents: Vec<A>,
    /// Games between each cell (first party) and its north neighbor.
    vert: Vec<Outcome>,
    /// Games between each cell (first party) and its east neighbor.
    horiz: Vec<Outcome>,
    rng: ChaCha12Rng,
}

/// Summary of a completed round.
#[derive(Debug, Clone, Copy)]
pub struct RoundSummary {
    /// Share of agents that cooperated this round.
    pub coop_share: f64,
    /// Number of agents replaced during renewal.
    pub n_renewed: usize,
    /// Life points after renewal.
    pub life_points: AccumulatorReport,
}

impl<A: Agent> Engine<A> {
    /// Create a new `Engine` from agents laid out row-major over `lattice`.
    pub fn new(lattice: Lattice, agents: Vec<A>, rng: ChaCha12Rng) -> Result<Self> {
        let n_cells = lattice.n_cells();
        if agents.len() != n_cells {
            bail!(
                "number of agents must be {n_cells}, but is {}",
                agents.len()
            );
        }

        Ok(Self {
            lattice,
            agents,
            vert: vec![Outcome::default(); n_cells],
            horiz: vec![Outcome::default(); n_cells],
            rng,
        })
    }

    #[cfg(test)]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[cfg(test)]
    pub fn agents(&self) -> &[A] {
        &self.agents
    }

    #[cfg(test)]
    pub fn vertical_outcomes(&self) -> &[Outcome] {
        &self.vert
    }

    #[cfg(test)]
    pub fn horizontal_outcomes(&self) -> &[Outcome] {
        &self.horiz
    }

    /// Play one full round: decisions, recording, settlement and renewal.
    pub fn step(&mut self) -> Result<RoundSummary> {
        // Every decision is fixed before any game is recorded.
        for agt in &mut self.agents {
            agt.decide(&mut self.rng)
                .context("failed to fix agent decision")?;
        }
        let n_coop = self
            .agents
            .iter()
            .filter(|agt| agt.decision() == Decision::Cooperate)
            .count();

        self.record_outcomes();
        self.settle();

        let n_renewed = self.renew().context("failed to renew depleted agents")?;

        let life_points: Accumulator = self
            .agents
            .iter()
            .map(|agt| agt.life_points() as f64)
            .collect();

        Ok(RoundSummary {
            coop_share: n_coop as f64 / self.agents.len() as f64,
            n_renewed,
            life_points: life_points.report(),
        })
    }

    /// Record every pairwise game from the current decisions.
    ///
    /// Must run over the whole grid before [`Engine::settle`].
    pub fn record_outcomes(&mut self) {
        for idx in 0..self.lattice.n_cells() {
            let pos = self.lattice.pos(idx);
            let north = self.lattice.index(self.lattice.north_of(pos));
            let east = self.lattice.index(self.lattice.east_of(pos));

            let own = self.agents[idx].decision();
            self.vert[idx] = Outcome::new(own, self.agents[north].decision());
            self.horiz[idx] = Outcome::new(own, self.agents[east].decision());
        }
    }

    /// Charge every agent for its four games and push its memory signal.
    ///
    /// Reads only the outcome grids, never the agents themselves.
    pub fn settle(&mut self) {
        for idx in 0..self.lattice.n_cells() {
            let pos = self.lattice.pos(idx);
            let south = self.lattice.index(self.lattice.south_of(pos));
            let west = self.lattice.index(self.lattice.west_of(pos));

            // North and east games: first party. South and west: second party.
            let vs_north = self.vert[idx];
            let vs_south = self.vert[south];
            let vs_east = self.horiz[idx];
            let vs_west = self.horiz[west];

            let cost = vs_north.first_cost()
                + vs_south.second_cost()
                + vs_east.first_cost()
                + vs_west.second_cost();

            let signal = vs_north.first.value()
                + vs_south.second.value()
                + vs_east.first.value()
                + vs_west.second.value();

            let agt = &mut self.agents[idx];
            agt.apply_cost(cost);
            agt.push_memory(f64::from(signal));
            log::trace!("cell {pos:?} paid {cost}, signal {signal}");
        }
    }

    /// Replace every agent with non-positive life points by the offspring
    /// of a random neighbor.
    ///
    /// Parents are taken from the grid as it stood before the pass.
    /// Returns the number of replaced agents.
    pub fn renew(&mut self) -> Result<usize> {
        let mut births = Vec::new();

        for (idx, agt) in self.agents.iter().enumerate() {
            if agt.life_points() > 0 {
                continue;
            }

            let pos = self.lattice.pos(idx);
            let dir = Direction::from_unit(self.rng.random::<f64>());
            let parent = self.lattice.index(self.lattice.neighbor(pos, dir));

            let child = self.agents[parent]
                .birth(&mut self.rng)
                .with_context(|| format!("failed to give birth into cell {pos:?}"))?;
            births.push((idx, child));

            log::debug!("renewed cell {pos:?} from its {dir:?} neighbor");
        }

        let n_renewed = births.len();
        for (idx, child) in births {
            self.agents[idx] = child;
        }

        Ok(n_renewed)
    }

    /// Write the certainty and life points of every agent, one line per row.
    pub fn write_board<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "Certainties and LP of current players")?;
        writeln!(writer, "(certainties, lp):")?;

        for j in 0..self.lattice.height() {
            write!(writer, "{j}: ")?;
            for i in 0..self.lattice.width() {
                let agt = &self.agents[self.lattice.index((i, j))];
                write!(writer, "( {:?}, {}) ", agt.certainty(), agt.life_points())?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
