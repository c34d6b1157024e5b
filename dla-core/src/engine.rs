//! Spawn / walk / freeze loop for a single-walker DLA run.
//!
//! One call to [`AggregationEngine::advance`] resolves the fate of one
//! walker:
//! 1. The walker drifts inward by `step_len` per step while its angle
//!    jitters by up to `±noise` and is clamped into `[0, sector_width]`.
//! 2. It freezes as soon as it reaches the symmetry axis
//!    (`x <= target.x + 1`) or comes within the freeze distance of any
//!    cluster member.
//! 3. A walker that freezes at or beyond `half_width` ends the run;
//!    any other walker joins the cluster and a new one is spawned.
//!
//! With [`Config::step_budget`] set, step 1 is spread over several calls
//! and the walker stays in flight between them.

use crate::{
    cluster::{Cluster, Particle},
    config::{Config, ConfigError},
    geometry::{clamp_angle, distance, from_polar, is_touching, to_polar},
    types::ParticleIndex,
};
use log::{debug, info, trace};
use rand::Rng;

/// Relative slack on the rim test so that a walker frozen at its spawn
/// point counts as reaching the edge despite `cos`/`sin` rounding.
const RIM_TOLERANCE: f32 = 1e-5;

/// Everything that changes during a run.
///
/// `current.index` is provisional: it equals `cluster.len()` at spawn time
/// and only becomes meaningful once the walker is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    pub cluster: Cluster,
    pub current: Particle,
    pub done: bool,
}

impl SimulationState {
    /// Cold-start state: empty cluster and a walker on the rim.
    pub fn new(cfg: &Config, rng: &mut impl Rng) -> Self {
        let cluster = Cluster::new();
        let current = spawn(cfg, &cluster, rng);
        Self {
            cluster,
            current,
            done: false,
        }
    }
}

/// Observable result of one [`AggregationEngine::advance`] call.
///
/// `steps` counts the walk steps taken during that call only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The run had already terminated; nothing changed.
    Idle,
    /// The walker froze inside the domain and joined the cluster.
    Deposited { index: ParticleIndex, steps: usize },
    /// The walker froze at the domain edge; the run is now done.
    Terminated { steps: usize },
    /// The step budget ran out before the walker froze.
    Walking { steps: usize },
}

/// Places a new walker on the rim at a uniformly random sector angle.
///
/// The returned particle's index is `cluster.len()`, the index it will
/// receive if accepted.
pub fn spawn(cfg: &Config, cluster: &Cluster, rng: &mut impl Rng) -> Particle {
    let angle = rng.random::<f32>() * cfg.sector_width;
    Particle {
        pos: from_polar(cfg.target, cfg.half_width, angle),
        index: cluster.next_index(),
    }
}

/// Owns the simulation state, its configuration and its random source.
#[derive(Debug)]
pub struct AggregationEngine<R: Rng> {
    cfg: Config,
    state: SimulationState,
    rng: R,
}

impl<R: Rng> AggregationEngine<R> {
    /// Creates an engine and spawns the first walker.
    ///
    /// ### Panics
    /// If `cfg` fails [`Config::validate`]. An invalid configuration is a
    /// programming error; use [`AggregationEngine::try_new`] to report it
    /// instead.
    pub fn new(cfg: Config, rng: R) -> Self {
        match Self::try_new(cfg, rng) {
            Ok(engine) => engine,
            Err(e) => panic!("invalid aggregation config: {e}"),
        }
    }

    /// Fallible variant of [`AggregationEngine::new`].
    pub fn try_new(cfg: Config, mut rng: R) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let state = SimulationState::new(&cfg, &mut rng);
        info!(
            "aggregation engine ready: half_width={}, sector={:.4} rad, noise={}, step={}",
            cfg.half_width, cfg.sector_width, cfg.noise, cfg.step_len
        );
        Ok(Self { cfg, state, rng })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn cluster(&self) -> &Cluster {
        &self.state.cluster
    }

    pub fn current(&self) -> &Particle {
        &self.state.current
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }

    /// Discards the run and starts over exactly as at construction.
    pub fn reset(&mut self) {
        info!(
            "reset: discarding {} deposited particles",
            self.state.cluster.len()
        );
        self.state = SimulationState::new(&self.cfg, &mut self.rng);
    }

    /// Whether the walker has reached the symmetry axis or the cluster.
    pub fn is_frozen(&self) -> bool {
        let pos = self.state.current.pos;
        pos.x <= self.cfg.target.x + 1.0
            || is_touching(
                pos,
                self.state.cluster.as_slice(),
                self.cfg.freeze_distance(),
            )
    }

    /// Moves the walker by one drift-plus-noise step.
    ///
    /// ### Returns
    /// The clamped angle used to place the walker.
    pub fn walk_step(&mut self) -> f32 {
        let (dist, angle) = to_polar(self.state.current.pos, self.cfg.target);

        let angle = angle + self.cfg.noise * self.rng.random_range(-1.0f32..1.0);
        let dist = dist - self.cfg.step_len;

        let angle = clamp_angle(angle, self.cfg.sector_width);
        self.state.current.pos = from_polar(self.cfg.target, dist, angle);
        angle
    }

    /// Runs the current walker until it freezes, then deposits it or ends
    /// the run. Does nothing once the run is done.
    ///
    /// Without a step budget the walk is not bounded per call: a single
    /// call may take an arbitrary number of steps.
    pub fn advance(&mut self) -> Advance {
        if self.state.done {
            return Advance::Idle;
        }

        let budget = self.cfg.step_budget.unwrap_or(usize::MAX);
        let mut steps = 0;
        while !self.is_frozen() {
            if steps == budget {
                trace!("step budget exhausted, walker still in flight");
                return Advance::Walking { steps };
            }
            self.walk_step();
            steps += 1;
        }

        self.freeze(steps)
    }

    fn freeze(&mut self, steps: usize) -> Advance {
        let pos = self.state.current.pos;
        let dist = distance(pos, self.cfg.target);

        if dist >= self.cfg.half_width * (1.0 - RIM_TOLERANCE) {
            self.state.done = true;
            info!(
                "growth reached the domain edge after {} particles",
                self.state.cluster.len()
            );
            return Advance::Terminated { steps };
        }

        let index = self.state.cluster.accept(pos);
        debug_assert_eq!(index, self.state.current.index);
        debug!("particle {index} froze at r={dist:.2} after {steps} steps");

        self.state.current = spawn(&self.cfg, &self.state.cluster, &mut self.rng);
        Advance::Deposited { index, steps }
    }
}
