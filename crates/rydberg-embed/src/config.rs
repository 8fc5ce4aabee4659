//! JSON-loadable embedding configuration.
//!
//! Every field has a default, so `{}` is a valid config. Sizes that depend on the device
//! (`traps`, `spacing`) stay unset until [`EmbeddingConfig::greedy_placement`] resolves them.

use std::fmt;
use std::str::FromStr;

use rydberg_layout::lattice::LatticeKind;
use rydberg_layout::{
    BladeOptions, Device, GreedyOptions, GreedyPlacement, PlacementOrder, RoundSchedule,
    StepBudget,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingMethod {
    #[default]
    Greedy,
    Blade,
    GreedyBlade,
}

impl EmbeddingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddingMethod::Greedy => "greedy",
            EmbeddingMethod::Blade => "blade",
            EmbeddingMethod::GreedyBlade => "greedy-blade",
        }
    }
}

impl FromStr for EmbeddingMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "greedy" => Ok(EmbeddingMethod::Greedy),
            "blade" => Ok(EmbeddingMethod::Blade),
            "greedy-blade" => Ok(EmbeddingMethod::GreedyBlade),
            other => Err(Error::UnknownMethod {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EmbeddingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-step movement cap as written in a config: a number, or `{reserved, grow, shrink}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepBudgetConfig {
    Scalar(f64),
    Directional {
        #[serde(default)]
        reserved: f64,
        grow: f64,
        shrink: f64,
    },
}

impl From<StepBudgetConfig> for StepBudget {
    fn from(value: StepBudgetConfig) -> Self {
        match value {
            StepBudgetConfig::Scalar(cap) => StepBudget::Scalar(cap),
            StepBudgetConfig::Directional {
                reserved,
                grow,
                shrink,
            } => StepBudget::Directional {
                reserved,
                grow,
                shrink,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbeddingConfig {
    pub method: EmbeddingMethod,
    #[serde(with = "by_name")]
    pub layout: LatticeKind,
    /// Candidate sites for greedy placement. Defaults to `max(device.min_layout_traps, N)`.
    pub traps: Option<usize>,
    /// Lattice spacing. Defaults to the device minimum distance.
    pub spacing: Option<f64>,
    #[serde(with = "by_name")]
    pub placement_order: PlacementOrder,
    /// Unbounded when unset.
    pub step_budget: Option<StepBudgetConfig>,
    pub rounds: usize,
    pub min_dist: Option<f64>,
    pub max_dist: Option<f64>,
    pub enforce_min_max_dist_ratio: bool,
    pub allow_infeasible: bool,
    /// Forward intermediate frames to the caller's observer.
    pub draw_steps: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            method: EmbeddingMethod::default(),
            layout: LatticeKind::default(),
            traps: None,
            spacing: None,
            placement_order: PlacementOrder::default(),
            step_budget: None,
            rounds: 100,
            min_dist: None,
            max_dist: None,
            enforce_min_max_dist_ratio: false,
            allow_infeasible: false,
            draw_steps: false,
        }
    }
}

impl EmbeddingConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn resolved_traps(&self, device: &Device, variables: usize) -> usize {
        self.traps
            .unwrap_or_else(|| device.min_layout_traps().max(variables))
    }

    pub fn resolved_spacing(&self, device: &Device) -> f64 {
        self.spacing.unwrap_or_else(|| device.min_distance())
    }

    pub fn step_budget(&self) -> StepBudget {
        self.step_budget.map(StepBudget::from).unwrap_or_default()
    }

    pub fn greedy_placement(&self, device: &Device, variables: usize) -> GreedyPlacement {
        GreedyPlacement {
            lattice: self.layout,
            traps: self.resolved_traps(device, variables),
            spacing: self.resolved_spacing(device),
            options: GreedyOptions {
                order: self.placement_order,
                ..Default::default()
            },
        }
    }

    pub fn blade_options(&self) -> BladeOptions {
        BladeOptions {
            schedule: RoundSchedule::constant(self.rounds, self.step_budget()),
            min_dist: self.min_dist,
            max_dist: self.max_dist,
            enforce_min_max_dist_ratio: self.enforce_min_max_dist_ratio,
            allow_infeasible: self.allow_infeasible,
            ..Default::default()
        }
    }
}

/// (De)serializes a value through its `Display`/`FromStr` names.
mod by_name {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}
