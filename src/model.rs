use anyhow::Result;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Normal};
use std::collections::VecDeque;

/// Per-round choice of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    #[default]
    Cooperate,
    Defect,
}

impl Decision {
    /// Numeric encoding used for memory signals.
    pub fn value(self) -> u32 {
        match self {
            Decision::Cooperate => 0,
            Decision::Defect => 1,
        }
    }
}

/// Life-point costs of a single game for both parties.
///
/// Costs are magnitudes: they are subtracted from life points.
pub fn payoff(d1: Decision, d2: Decision) -> (u32, u32) {
    use Decision::*;
    match (d1, d2) {
        (Cooperate, Cooperate) => (1, 1),
        (Defect, Defect) => (2, 2),
        (Cooperate, Defect) => (3, 0),
        (Defect, Cooperate) => (0, 3),
    }
}

/// Recorded game between a cell (first party) and its north or east neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub first: Decision,
    pub second: Decision,
}

impl Outcome {
    pub fn new(first: Decision, second: Decision) -> Self {
        Self { first, second }
    }

    pub fn first_cost(&self) -> u32 {
        payoff(self.first, self.second).0
    }

    pub fn second_cost(&self) -> u32 {
        payoff(self.first, self.second).1
    }
}

/// Capabilities the engine needs from an agent.
///
/// How an agent decides, remembers and reproduces is up to the implementor.
pub trait Agent: Sized {
    /// Fix the decision for the coming round.
    fn decide<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()>;

    fn decision(&self) -> Decision;

    fn life_points(&self) -> i64;

    /// Subtract `cost` from the life points.
    fn apply_cost(&mut self, cost: u32);

    fn push_memory(&mut self, signal: f64);

    fn certainty(&self) -> f64;

    /// Produce an offspring to take over a depleted cell.
    fn birth<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self>;
}

/// Highest memory signal an agent can receive in one round.
const MAX_SIGNAL: f64 = 4.0;

/// Default agent: sticks to its remembered disposition with probability `certainty`.
#[derive(Debug, Clone)]
pub struct Player {
    life_points: i64,
    life_points_init: i64,
    certainty: f64,
    memory: VecDeque<f64>,
    time_horizon: usize,
    std_dev_mut: f64,
    decision: Decision,
}

impl Player {
    pub fn new(life_points: i64, certainty: f64, time_horizon: usize, std_dev_mut: f64) -> Self {
        Self {
            life_points,
            life_points_init: life_points,
            certainty,
            memory: VecDeque::with_capacity(time_horizon),
            time_horizon,
            std_dev_mut,
            decision: Decision::Cooperate,
        }
    }

    fn disposition(&self) -> Decision {
        if self.memory.is_empty() {
            return Decision::Cooperate;
        }
        let mean = self.memory.iter().sum::<f64>() / self.memory.len() as f64;
        if mean <= MAX_SIGNAL / 2.0 {
            Decision::Cooperate
        } else {
            Decision::Defect
        }
    }
}

impl Agent for Player {
    fn decide<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let sure_dist = Bernoulli::new(self.certainty)?;
        self.decision = if sure_dist.sample(rng) {
            self.disposition()
        } else if rng.random::<bool>() {
            Decision::Cooperate
        } else {
            Decision::Defect
        };
        Ok(())
    }

    fn decision(&self) -> Decision {
        self.decision
    }

    fn life_points(&self) -> i64 {
        self.life_points
    }

    fn apply_cost(&mut self, cost: u32) {
        self.life_points -= i64::from(cost);
    }

    fn push_memory(&mut self, signal: f64) {
        if self.time_horizon == 0 {
            return;
        }
        if self.memory.len() == self.time_horizon {
            self.memory.pop_front();
        }
        self.memory.push_back(signal);
    }

    fn certainty(&self) -> f64 {
        self.certainty
    }

    fn birth<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self> {
        let mut certainty = self.certainty;
        if self.std_dev_mut > 0.0 {
            let mut_dist = Normal::new(0.0, self.std_dev_mut)?;
            certainty = (certainty + mut_dist.sample(rng)).clamp(0.0, 1.0);
        }
        Ok(Self::new(
            self.life_points_init,
            certainty,
            self.time_horizon,
            self.std_dev_mut,
        ))
    }
}
