use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an item for the lifetime of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Top-left corner of a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// A rectangle to be packed.
///
/// `width` and `height` always describe the current orientation; `rotated`
/// records whether that orientation is swapped relative to the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default)]
    pub rotated: bool,
    /// Display attribute only; never read by the packing algorithms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Item {
    pub fn new(id: usize, width: u32, height: u32) -> Self {
        Self {
            id: ItemId(id),
            width,
            height,
            position: None,
            rotated: false,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Ratio of the longer side to the shorter side (always >= 1).
    pub fn aspect_ratio(&self) -> f64 {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        (w / h).max(h / w)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Moves the item to `position`, swapping its sides first when `rotate` is set.
    pub fn place_at(&mut self, position: Position, rotate: bool) {
        if rotate {
            std::mem::swap(&mut self.width, &mut self.height);
            self.rotated = !self.rotated;
        }
        self.position = Some(position);
    }

    /// Forgets the current position. Orientation is kept.
    pub fn unplace(&mut self) {
        self.position = None;
    }
}

/// Item description as supplied by a caller, before identities are assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

/// Weights of the composite objective. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub boxes: f64,
    pub utilization: f64,
    pub waste: f64,
    pub overlap: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            boxes: 1.0,
            utilization: 0.5,
            waste: 0.2,
            overlap: 1000.0,
        }
    }
}

impl Weights {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("boxes", self.boxes),
            ("utilization", self.utilization),
            ("waste", self.waste),
            ("overlap", self.overlap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PackingError::InvalidWeights(format!(
                    "weight '{}' must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Ordering applied to the backlog before greedy construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    #[default]
    LargestAreaFirst,
    SmallestAreaFirst,
    LargestAspectRatioFirst,
    SmallestAspectRatioFirst,
}

/// Descending sort key used by the rule-based neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    #[default]
    HeightFirst,
    WidthFirst,
    AreaFirst,
}

/// Neighborhood selection for local search and annealing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeighborhoodConfig {
    #[default]
    Geometry,
    Rule {
        #[serde(default)]
        rule: Rule,
    },
    Overlap {
        #[serde(default = "default_initial_overlap")]
        initial_overlap: f64,
        #[serde(default = "default_decay_rate")]
        decay_rate: f64,
    },
}

fn default_initial_overlap() -> f64 {
    1.0
}

fn default_decay_rate() -> f64 {
    0.05
}

/// Start solution handed to an improvement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Seed {
    OneItemPerContainer,
    StackedInOneContainer,
    GreedyPartitions { parts: usize },
    Greedy { strategy: SortStrategy },
}

impl Seed {
    /// Seed each neighborhood starts from unless the request overrides it.
    pub fn default_for(neighborhood: &NeighborhoodConfig) -> Self {
        match neighborhood {
            NeighborhoodConfig::Geometry => Seed::GreedyPartitions { parts: 4 },
            NeighborhoodConfig::Rule { .. } => Seed::Greedy {
                strategy: SortStrategy::LargestAreaFirst,
            },
            NeighborhoodConfig::Overlap { .. } => Seed::StackedInOneContainer,
        }
    }
}

/// Which solver runs and with what parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlgorithmConfig {
    Greedy {
        #[serde(default)]
        strategy: SortStrategy,
    },
    Backtracking {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container_limit: Option<usize>,
    },
    LocalSearch {
        #[serde(default = "default_max_iterations")]
        max_iterations: u64,
        #[serde(default)]
        neighborhood: NeighborhoodConfig,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed_solution: Option<Seed>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    SimulatedAnnealing {
        #[serde(default = "default_initial_temperature")]
        initial_temperature: f64,
        #[serde(default = "default_end_temperature")]
        end_temperature: f64,
        #[serde(default = "default_cooling_rate")]
        cooling_rate: f64,
        #[serde(default = "default_iterations_per_temperature")]
        iterations_per_temperature: u64,
        #[serde(default = "default_max_time_secs")]
        max_time_secs: f64,
        #[serde(default)]
        neighborhood: NeighborhoodConfig,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed_solution: Option<Seed>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self::Greedy {
            strategy: SortStrategy::default(),
        }
    }
}

impl AlgorithmConfig {
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmConfig::Greedy { .. } => "greedy",
            AlgorithmConfig::Backtracking { .. } => "backtracking",
            AlgorithmConfig::LocalSearch { .. } => "local_search",
            AlgorithmConfig::SimulatedAnnealing { .. } => "simulated_annealing",
        }
    }
}

fn default_max_iterations() -> u64 {
    21
}

fn default_initial_temperature() -> f64 {
    1000.0
}

fn default_end_temperature() -> f64 {
    25.0
}

fn default_cooling_rate() -> f64 {
    0.95
}

fn default_iterations_per_temperature() -> u64 {
    10
}

fn default_max_time_secs() -> f64 {
    10.0
}

/// Input: what the caller provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingRequest {
    pub container_size: u32,
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub algorithm: AlgorithmConfig,
    #[serde(default)]
    pub weights: Weights,
}

/// Summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_containers: usize,
    pub total_items: usize,
    pub total_area: u64,
    pub used_area: u64,
    pub waste_area: u64,
    pub waste_percentage: f64,
    pub overlap_area: u64,
    pub score: f64,
}

/// Error type for packing
#[derive(Debug, thiserror::Error)]
pub enum PackingError {
    #[error("Item {id} ({width}x{height}) does not fit in a container of side {container_size}")]
    InfeasibleItem {
        id: ItemId,
        width: u32,
        height: u32,
        container_size: u32,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid temperature range: {0}")]
    InvalidTemperatureRange(String),

    #[error("No feasible placement for item {0}")]
    NoFeasiblePlacement(ItemId),
}

pub type Result<T> = std::result::Result<T, PackingError>;
