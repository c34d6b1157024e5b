use glam::Vec2;
use std::f32::consts::{FRAC_PI_6, TAU};
use std::fmt;

/// Fixed geometry and colour constants for one aggregation run.
///
/// ### Fields
/// - `half_width` - Domain half-width `R`; particles spawn on this radius
///   and growth stops once a particle freezes at or beyond it.
/// - `sector_width` - Angular width `S` of the simulated wedge `[0, S]`.
/// - `noise` - Amplitude `η` of the per-step angular noise.
/// - `step_len` - Constant inward radial drift `Δ` per walk step.
/// - `particle_radius` - Draw radius; the freeze distance is twice this.
/// - `target` - Attraction center in the working frame.
/// - `base_hue` / `hue_rot_speed` - Hue of particle `i` is
///   `base_hue + i * hue_rot_speed` degrees.
/// - `step_budget` - Maximum walk steps per `advance()` call, or `None`
///   to walk each particle to completion within a single call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub half_width: f32,
    pub sector_width: f32,
    pub noise: f32,
    pub step_len: f32,
    pub particle_radius: f32,
    pub target: Vec2,
    pub base_hue: f32,
    pub hue_rot_speed: f32,
    pub step_budget: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            half_width: 400.0,
            sector_width: FRAC_PI_6,
            noise: 0.05,
            step_len: 0.5,
            particle_radius: 2.0,
            target: Vec2::ZERO,
            base_hue: 230.0,
            hue_rot_speed: -0.1,
            step_budget: None,
        }
    }
}

impl Config {
    /// Minimum center distance below which a walker freezes.
    pub fn freeze_distance(&self) -> f32 {
        2.0 * self.particle_radius
    }

    /// Checks that the configuration admits a terminating walk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("half_width", self.half_width),
            ("sector_width", self.sector_width),
            ("noise", self.noise),
            ("step_len", self.step_len),
            ("particle_radius", self.particle_radius),
            ("target.x", self.target.x),
            ("target.y", self.target.y),
            ("base_hue", self.base_hue),
            ("hue_rot_speed", self.hue_rot_speed),
        ];
        if let Some(&(name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { name, value });
        }

        if self.half_width <= 0.0 {
            return Err(ConfigError::NonPositiveHalfWidth(self.half_width));
        }
        if self.step_len <= 0.0 {
            return Err(ConfigError::NonPositiveStep(self.step_len));
        }
        if self.sector_width <= 0.0 || self.sector_width > TAU {
            return Err(ConfigError::SectorOutOfRange(self.sector_width));
        }
        if self.noise < 0.0 {
            return Err(ConfigError::NegativeNoise(self.noise));
        }
        if self.particle_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.particle_radius));
        }
        if self.step_budget == Some(0) {
            return Err(ConfigError::ZeroStepBudget);
        }
        Ok(())
    }
}

/// Reasons a [`Config`] is rejected by [`Config::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A parameter is NaN or infinite.
    NonFinite { name: &'static str, value: f32 },
    /// `half_width <= 0`: spawning on the rim would start inside the target.
    NonPositiveHalfWidth(f32),
    /// `step_len <= 0`: the walk would never reach the symmetry axis.
    NonPositiveStep(f32),
    /// Sector width outside `(0, 2π]`.
    SectorOutOfRange(f32),
    NegativeNoise(f32),
    NonPositiveRadius(f32),
    /// A budget of zero steps could never make progress.
    ZeroStepBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { name, value } => {
                write!(f, "config value `{}` must be finite, got {}", name, value)
            }
            ConfigError::NonPositiveHalfWidth(v) => {
                write!(f, "domain half-width must be positive, got {}", v)
            }
            ConfigError::NonPositiveStep(v) => {
                write!(f, "radial step must be positive, got {}", v)
            }
            ConfigError::SectorOutOfRange(v) => {
                write!(f, "sector width must lie in (0, 2π], got {}", v)
            }
            ConfigError::NegativeNoise(v) => {
                write!(f, "noise amplitude must not be negative, got {}", v)
            }
            ConfigError::NonPositiveRadius(v) => {
                write!(f, "particle radius must be positive, got {}", v)
            }
            ConfigError::ZeroStepBudget => write!(f, "step budget must be at least one step"),
        }
    }
}

impl std::error::Error for ConfigError {}
