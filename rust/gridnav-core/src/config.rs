use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SIMPLE_NPC_MAX_TRY: u32 = 100;
pub const DEFAULT_PERFECT_NPC_MAX_TRY: u32 = 300;
pub const DEFAULT_PERFECT_PLAYER_MAX_TRY: u32 = 1_000;
pub const DEFAULT_SIMPLE_NPC_WEIGHT: u32 = 2;

/// Expansion cap and heuristic weight for one capped policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProfile {
    pub max_expansions: u32,
    /// Multiplier on the heuristic term; 1 is plain A*, higher is greedier.
    pub heuristic_weight: u32,
}

impl SearchProfile {
    pub const fn new(max_expansions: u32, heuristic_weight: u32) -> Self {
        Self { max_expansions, heuristic_weight }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub simple_npc: SearchProfile,
    pub perfect_npc: SearchProfile,
    pub perfect_player: SearchProfile,
    pub no_corner_cutting: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simple_npc: SearchProfile::new(DEFAULT_SIMPLE_NPC_MAX_TRY, DEFAULT_SIMPLE_NPC_WEIGHT),
            perfect_npc: SearchProfile::new(DEFAULT_PERFECT_NPC_MAX_TRY, 1),
            perfect_player: SearchProfile::new(DEFAULT_PERFECT_PLAYER_MAX_TRY, 1),
            no_corner_cutting: true,
        }
    }
}

impl SearchConfig {
    /// Defaults overlaid with `GRIDNAV_*` environment variables. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(n) = env_u32("GRIDNAV_SIMPLE_MAX_TRY") {
            cfg.simple_npc.max_expansions = n;
        }
        if let Some(n) = env_u32("GRIDNAV_NPC_MAX_TRY") {
            cfg.perfect_npc.max_expansions = n;
        }
        if let Some(n) = env_u32("GRIDNAV_PLAYER_MAX_TRY") {
            cfg.perfect_player.max_expansions = n;
        }
        if let Some(b) = env::var("GRIDNAV_CORNER_CUTTING").ok().and_then(|s| parse_bool(&s)) {
            cfg.no_corner_cutting = !b;
        }
        cfg
    }
}

fn env_u32(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|s| s.trim().parse::<u32>().ok())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
