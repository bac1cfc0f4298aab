//! The two cheap policies: a straight tile line and a single nudge step.

use super::neighbors::{heuristic, toward, Direction, StepRules};
use super::{FailReason, SearchOutcome};
use crate::models::{Connectivity, Tile};

/// Bresenham walk from `start` to `goal`. Every step must be legal, otherwise
/// the whole line is rejected. Under 4-connectivity a diagonal step is split
/// into its horizontal then vertical part.
pub(crate) fn straight_line(rules: &StepRules<'_>, connectivity: Connectivity, start: Tile, goal: Tile) -> SearchOutcome {
    // Error terms in i64; 2 * err can exceed i32 on wide grids.
    let dx = (goal.x as i64 - start.x as i64).abs();
    let dy = -(goal.y as i64 - start.y as i64).abs();
    let sx = goal.x.cmp(&start.x) as i32;
    let sy = goal.y.cmp(&start.y) as i32;
    let mut err = dx + dy;
    let mut cur = start;
    let mut path = vec![start];
    let mut steps = 0u32;

    while cur != goal {
        let e2 = 2 * err;
        let mut mx = 0;
        let mut my = 0;
        if e2 >= dy {
            err += dy;
            mx = sx;
        }
        if e2 <= dx {
            err += dx;
            my = sy;
        }
        let (moves, n) = if connectivity == Connectivity::Four && mx != 0 && my != 0 {
            ([(mx, 0), (0, my)], 2)
        } else {
            ([(mx, my), (0, 0)], 1)
        };
        for &(mx, my) in &moves[..n] {
            let Some(dir) = Direction::from_delta(mx, my) else {
                return SearchOutcome::failed(FailReason::LineBlocked, steps);
            };
            steps += 1;
            match rules.step(cur, dir) {
                Some((next, _)) => {
                    cur = next;
                    path.push(next);
                }
                None => return SearchOutcome::failed(FailReason::LineBlocked, steps),
            }
        }
    }
    SearchOutcome::found(path, steps)
}

/// First legal neighbor of `start` that gets strictly closer to `goal`,
/// trying the goal direction first.
pub(crate) fn one_step(rules: &StepRules<'_>, connectivity: Connectivity, start: Tile, goal: Tile) -> SearchOutcome {
    let here = heuristic(connectivity, start, goal);
    let mut tried = 0u32;
    for dir in toward(connectivity, start, goal) {
        tried += 1;
        if let Some((next, _)) = rules.step(start, dir) {
            if heuristic(connectivity, next, goal) < here {
                return SearchOutcome::found(vec![start, next], tried);
            }
        }
    }
    SearchOutcome::failed(FailReason::NoStep, tried)
}
