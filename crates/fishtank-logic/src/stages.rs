//! Fish lifecycle stages keyed by body size.
//!
//! Size is the only stored quantity; the stage is always looked up from it.
//! Stage ranges are half-open `[min_size, max_size)` except the last stage,
//! whose upper bound is inclusive because growth is capped at it. Sizes below
//! the first stage (a starving fish shrinking toward death) resolve to the
//! first stage.

use serde::{Deserialize, Serialize};

/// Stable identifier for each lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Baby,
    Juvenile,
    Adult,
    Elder,
}

impl StageKind {
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Baby => "Baby",
            StageKind::Juvenile => "Juvenile",
            StageKind::Adult => "Adult",
            StageKind::Elder => "Elder",
        }
    }
}

/// One row of the stage table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishStage {
    pub kind: StageKind,
    pub min_size: f32,
    pub max_size: f32,
    pub can_produce_eggs: bool,
    pub egg_multiplier: f32,
}

impl FishStage {
    pub const fn new(
        kind: StageKind,
        min_size: f32,
        max_size: f32,
        can_produce_eggs: bool,
        egg_multiplier: f32,
    ) -> Self {
        Self {
            kind,
            min_size,
            max_size,
            can_produce_eggs,
            egg_multiplier,
        }
    }
}

/// Returned by lookups on an empty table, which validation rejects.
const EMPTY_TABLE_STAGE: FishStage = FishStage::new(StageKind::Baby, 0.0, f32::MAX, false, 0.0);

/// Ordered stage table, smallest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageTable {
    stages: Vec<FishStage>,
}

impl StageTable {
    /// Build a table from rows; callers validate ordering through
    /// [`crate::config::SimConfig::validate`].
    pub fn new(stages: Vec<FishStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[FishStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Smallest size any stage admits.
    pub fn min_size(&self) -> f32 {
        self.stages.first().map(|s| s.min_size).unwrap_or(0.0)
    }

    /// Largest size a fish can grow to.
    pub fn max_size(&self) -> f32 {
        self.stages.last().map(|s| s.max_size).unwrap_or(0.0)
    }

    /// Stage whose range contains `size`.
    pub fn stage_for_size(&self, size: f32) -> &FishStage {
        self.stages
            .iter()
            .rev()
            .find(|s| size >= s.min_size)
            .or_else(|| self.stages.first())
            .unwrap_or(&EMPTY_TABLE_STAGE)
    }

    pub fn kind_for_size(&self, size: f32) -> StageKind {
        self.stage_for_size(size).kind
    }

    pub fn get(&self, kind: StageKind) -> Option<&FishStage> {
        self.stages.iter().find(|s| s.kind == kind)
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::new(vec![
            FishStage::new(StageKind::Baby, 0.3, 0.5, false, 0.0),
            FishStage::new(StageKind::Juvenile, 0.5, 0.8, false, 0.0),
            FishStage::new(StageKind::Adult, 0.8, 1.2, true, 1.0),
            FishStage::new(StageKind::Elder, 1.2, 1.5, true, 2.0),
        ])
    }
}
