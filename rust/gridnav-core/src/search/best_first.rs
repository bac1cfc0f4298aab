//! Capped best-first search shared by the three NPC/player policies.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::trace;

use super::neighbors::{directions, heuristic, StepRules};
use super::{FailReason, SearchOutcome};
use crate::config::SearchProfile;
use crate::models::{Connectivity, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueueNode {
    f: u64,
    // Insertion counter; equal-f nodes pop first-in first-out.
    seq: u64,
    g: u32,
    index: usize,
}

impl Ord for QueueNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert for min-heap behavior
        (other.f, other.seq).cmp(&(self.f, self.seq))
    }
}

impl PartialOrd for QueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scratch buffers reused across searches. Holds no state between calls.
#[derive(Debug, Default)]
pub struct SearchContext {
    open: BinaryHeap<QueueNode>,
    g_score: FxHashMap<usize, u32>,
    came_from: FxHashMap<usize, usize>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.open.clear();
        self.g_score.clear();
        self.came_from.clear();
    }
}

/// Expands nodes in `g + weight * h` order until the goal is dequeued, the
/// open set runs dry, or `max_expansions` nodes have been expanded.
pub(crate) fn capped_search(
    rules: &StepRules<'_>,
    connectivity: Connectivity,
    start: (Tile, usize),
    goal: (Tile, usize),
    profile: SearchProfile,
    ctx: &mut SearchContext,
) -> SearchOutcome {
    ctx.reset();
    let grid = rules.grid;
    let weight = profile.heuristic_weight as u64;
    let (start_tile, start_idx) = start;
    let (goal_tile, goal_idx) = goal;

    let mut seq: u64 = 0;
    let mut expanded: u32 = 0;
    ctx.g_score.insert(start_idx, 0);
    ctx.open.push(QueueNode { f: weight * heuristic(connectivity, start_tile, goal_tile), seq, g: 0, index: start_idx });

    while let Some(node) = ctx.open.pop() {
        // Discard stale
        if ctx.g_score.get(&node.index).is_some_and(|&best| node.g > best) {
            continue;
        }
        if node.index == goal_idx {
            trace!(expanded, cost = node.g, "capped search reached goal");
            return SearchOutcome::found(reconstruct(&ctx.came_from, grid, start_idx, goal_idx), expanded);
        }
        if expanded >= profile.max_expansions {
            trace!(expanded, cap = profile.max_expansions, "capped search hit expansion cap");
            return SearchOutcome::failed(FailReason::IterationCap, expanded);
        }
        expanded += 1;

        let current = grid.tile_at(node.index);
        for &dir in directions(connectivity) {
            let Some((next, ni)) = rules.step(current, dir) else { continue };
            let tentative = node.g + dir.cost();
            if ctx.g_score.get(&ni).map_or(true, |&best| tentative < best) {
                ctx.g_score.insert(ni, tentative);
                ctx.came_from.insert(ni, node.index);
                seq += 1;
                let f = tentative as u64 + weight * heuristic(connectivity, next, goal_tile);
                ctx.open.push(QueueNode { f, seq, g: tentative, index: ni });
            }
        }
    }

    trace!(expanded, "capped search exhausted open set");
    SearchOutcome::failed(FailReason::Exhausted, expanded)
}

fn reconstruct(came_from: &FxHashMap<usize, usize>, grid: &crate::grid::ObstacleGrid, start: usize, goal: usize) -> Vec<Tile> {
    let mut out = vec![grid.tile_at(goal)];
    let mut cur = goal;
    while cur != start {
        match came_from.get(&cur) {
            Some(&prev) => {
                out.push(grid.tile_at(prev));
                cur = prev;
            }
            None => break,
        }
    }
    out.reverse();
    out
}
