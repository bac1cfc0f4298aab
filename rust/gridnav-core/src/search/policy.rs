use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{SearchConfig, SearchProfile};
use crate::errors::GridError;

/// Named search policies, cheapest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    StraightLine,
    OneStep,
    SimpleMaxTryNpc,
    PerfectMaxTryNpc,
    PerfectMaxTryPlayer,
}

/// What a policy actually runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    StraightLine,
    OneStep,
    Capped(SearchProfile),
}

impl Policy {
    pub const ALL: [Policy; 5] = [
        Policy::StraightLine,
        Policy::OneStep,
        Policy::SimpleMaxTryNpc,
        Policy::PerfectMaxTryNpc,
        Policy::PerfectMaxTryPlayer,
    ];

    pub const CAPPED: [Policy; 3] = [Policy::SimpleMaxTryNpc, Policy::PerfectMaxTryNpc, Policy::PerfectMaxTryPlayer];

    pub fn strategy(self, config: &SearchConfig) -> Strategy {
        match self {
            Policy::StraightLine => Strategy::StraightLine,
            Policy::OneStep => Strategy::OneStep,
            Policy::SimpleMaxTryNpc => Strategy::Capped(config.simple_npc),
            Policy::PerfectMaxTryNpc => Strategy::Capped(config.perfect_npc),
            Policy::PerfectMaxTryPlayer => Strategy::Capped(config.perfect_player),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::StraightLine => "straight_line",
            Policy::OneStep => "one_step",
            Policy::SimpleMaxTryNpc => "simple_max_try_npc",
            Policy::PerfectMaxTryNpc => "perfect_max_try_npc",
            Policy::PerfectMaxTryPlayer => "perfect_max_try_player",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = GridError;

    /// Accepts the snake_case names, kebab-case, and short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        let p = match norm.as_str() {
            "straight_line" | "straight" | "line" => Policy::StraightLine,
            "one_step" | "step" => Policy::OneStep,
            "simple_max_try_npc" | "simple_npc" | "simple" => Policy::SimpleMaxTryNpc,
            "perfect_max_try_npc" | "perfect_npc" | "npc" => Policy::PerfectMaxTryNpc,
            "perfect_max_try_player" | "perfect_player" | "player" => Policy::PerfectMaxTryPlayer,
            _ => return Err(GridError::UnknownPolicy(s.to_string())),
        };
        Ok(p)
    }
}
