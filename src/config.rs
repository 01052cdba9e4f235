//! Simulation configuration
//!
//! A run is described by a small document, TOML by default or JSON when
//! the file has a `.json` extension. It fixes the state and message
//! spaces, how the players perceive states, the update rule and the seed.

use std::{fs, path::Path};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    dynamics::{DynamicsKind, DynamicsRule},
    game::Game,
    matrix::Matrix,
    perception::{PerceptualSpace, PriorDistribution},
    pipeline::ConvergenceConfig,
};

/// Default rationality of quantal response
pub const DEFAULT_RATIONALITY: f64 = 20.0;

/// Complete description of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the initial strategies; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Rationality λ of quantal response
    #[serde(default = "default_rationality")]
    pub rationality: f64,

    /// Optional bound on the number of update steps
    #[serde(default)]
    pub max_iterations: Option<usize>,

    pub dynamics: DynamicsRule,

    #[serde(alias = "state space", alias = "state-space")]
    pub state_space: StateSpaceConfig,

    #[serde(alias = "message space", alias = "message-space")]
    pub message_space: MessageSpaceConfig,

    #[serde(default)]
    pub perception: PerceptionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpaceConfig {
    pub size: usize,
    #[serde(default)]
    pub priors: PriorDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSpaceConfig {
    pub size: usize,
    #[serde(default, alias = "opt-out", alias = "opt out")]
    pub opt_out: bool,
}

/// How precisely the players tell states apart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Blend strategies through the similarity kernel
    #[serde(default)]
    pub limited: bool,
    /// Width parameter of the similarity kernel; larger is sharper
    pub acuity: f64,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            limited: false,
            acuity: 1.0,
        }
    }
}

fn default_rationality() -> f64 {
    DEFAULT_RATIONALITY
}

impl SimulationConfig {
    /// Load from a file, choosing the format by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read configuration {}", path.display()),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.state_space.size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "state space size must be at least 1".to_string(),
            });
        }
        if self.message_space.size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "message space size must be at least 1".to_string(),
            });
        }
        if !(self.perception.acuity.is_finite() && self.perception.acuity > 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "perceptual acuity must be positive, got {}",
                    self.perception.acuity
                ),
            });
        }
        Ok(())
    }

    /// Build the game: utility and similarity are the Gaussian kernel,
    /// confusion is the kernel too when perception is limited.
    pub fn build_game(&self) -> Result<Game> {
        let space = PerceptualSpace::new(self.state_space.size)?;
        let priors = space.priors(self.state_space.priors)?;
        let similarity = space.similarity(self.perception.acuity)?;

        let mut game = Game::new(similarity, priors, self.message_space.size)?;
        if self.message_space.opt_out {
            game = game.with_opt_out();
        }
        if self.perception.limited {
            game = game.with_imprecision();
        }
        Ok(game)
    }

    pub fn build_dynamics(&self) -> Result<DynamicsKind> {
        DynamicsKind::new(self.dynamics, self.rationality)
    }

    pub fn convergence_config(&self) -> ConvergenceConfig {
        ConvergenceConfig {
            max_iterations: self.max_iterations,
            ..ConvergenceConfig::default()
        }
    }

    /// Random row-stochastic Sender and Receiver strategies for `game`.
    ///
    /// The same seed always yields the same pair.
    pub fn initial_strategies(&self, game: &Game) -> (Matrix, Matrix) {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let sender = Matrix::random_stochastic(game.n_states(), game.n_sender_actions(), &mut rng);
        let receiver = Matrix::random_stochastic(game.n_messages(), game.n_states(), &mut rng);
        (sender, receiver)
    }
}
