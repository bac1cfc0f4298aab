use gridnav_core::{
    find_path, sync_dynamic, sync_static, Connectivity, GridError, Mobility, ObstacleGrid, PathFinder, PathRequest, Plane, Policy,
    SearchConfig, Tile, OBSTACLE, TRANS,
};

// Deterministic scatter of obstacles without pulling in an RNG crate.
fn scattered_terrain(columns: usize, rows: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..columns * rows)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            match (state >> 33) % 10 {
                0 | 1 => OBSTACLE | TRANS,
                2 => TRANS,
                _ => 0,
            }
        })
        .collect()
}

fn open_grid(columns: i64, rows: i64) -> ObstacleGrid {
    let mut g = ObstacleGrid::allocate(columns, rows).unwrap();
    sync_static(&mut g, &vec![0u8; (columns * rows) as usize]);
    g
}

fn assert_valid(g: &ObstacleGrid, path: &[Tile], start: Tile, goal: Tile, conn: Connectivity) {
    if path.is_empty() {
        return;
    }
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for w in path.windows(2) {
        assert!(conn.adjacent(w[0], w[1]), "{} -> {} not adjacent under {:?}", w[0], w[1], conn);
        assert!(!g.test_soft(w[1]).unwrap(), "{} is soft blocked", w[1]);
        assert!(!g.test_dynamic(w[1]).unwrap(), "{} is occupied", w[1]);
    }
}

#[test]
fn results_are_deterministic_for_every_policy() {
    let start = Tile::new(0, 0);
    let goal = Tile::new(29, 29);
    let mut bytes = scattered_terrain(30, 30, 7);
    bytes[0] = 0;
    bytes[30 * 30 - 1] = 0;
    let mut g = ObstacleGrid::allocate(30, 30).unwrap();
    sync_static(&mut g, &bytes);
    for conn in [Connectivity::Four, Connectivity::Eight] {
        for p in Policy::ALL {
            let a = find_path(&g, start, goal, p, conn).unwrap();
            let b = find_path(&g, start, goal, p, conn).unwrap();
            assert_eq!(a, b, "{p} with {conn:?} is not deterministic");
        }
    }
}

#[test]
fn paths_are_adjacent_and_walkable_on_scattered_maps() {
    let start = Tile::new(1, 1);
    let goal = Tile::new(22, 20);
    for seed in 1..6u64 {
        let mut bytes = scattered_terrain(24, 24, seed);
        bytes[20 * 24 + 22] = 0;
        let mut g = ObstacleGrid::allocate(24, 24).unwrap();
        sync_static(&mut g, &bytes);
        sync_dynamic(&mut g, [(Tile::new(5, 5), true), (Tile::new(12, 3), true)]);
        for conn in [Connectivity::Four, Connectivity::Eight] {
            for p in Policy::ALL {
                let path = find_path(&g, start, goal, p, conn).unwrap();
                if p == Policy::OneStep {
                    assert!(path.is_empty() || path.len() == 2);
                    if let [a, b] = path.as_slice() {
                        assert!(conn.adjacent(*a, *b));
                        assert!(!g.test_soft(*b).unwrap() && !g.test_dynamic(*b).unwrap());
                    }
                    continue;
                }
                assert_valid(&g, &path, start, goal, conn);
            }
        }
    }
}

#[test]
fn blocking_the_only_route_forces_empty_or_detour() {
    // Corridor with a single gap at (4, 2).
    let mut g = open_grid(9, 5);
    let mut bytes = vec![0u8; 45];
    for y in 0..5 {
        if y != 2 {
            bytes[y * 9 + 4] = OBSTACLE;
        }
    }
    sync_static(&mut g, &bytes);
    let start = Tile::new(0, 2);
    let goal = Tile::new(8, 2);
    for p in Policy::CAPPED {
        let before = find_path(&g, start, goal, p, Connectivity::Eight).unwrap();
        assert!(before.contains(&Tile::new(4, 2)), "{p} should use the gap");
    }

    sync_dynamic(&mut g, [(Tile::new(4, 2), true)]);
    for p in Policy::ALL {
        for conn in [Connectivity::Four, Connectivity::Eight] {
            let after = find_path(&g, start, goal, p, conn).unwrap();
            assert!(!after.contains(&Tile::new(4, 2)), "{p} walked through an occupied tile");
            if p != Policy::OneStep {
                assert!(after.is_empty(), "{p} found a path through a sealed wall");
            }
        }
    }
}

#[test]
fn soft_static_block_also_invalidates_route() {
    let mut g = open_grid(5, 1);
    let before = find_path(&g, Tile::new(0, 0), Tile::new(4, 0), Policy::PerfectMaxTryPlayer, Connectivity::Four).unwrap();
    assert_eq!(before.len(), 5);
    sync_static(&mut g, &[0, 0, TRANS, 0, 0]);
    let after = find_path(&g, Tile::new(0, 0), Tile::new(4, 0), Policy::PerfectMaxTryPlayer, Connectivity::Four).unwrap();
    assert!(after.is_empty());
}

#[test]
fn syncs_touch_only_their_own_planes() {
    let mut g = ObstacleGrid::allocate(4, 4).unwrap();
    sync_static(&mut g, &scattered_terrain(4, 4, 3));
    let soft_before = g.count(Plane::SoftStatic);
    let hard_before = g.count(Plane::HardStatic);
    let snap_before = g.export_planes();

    sync_dynamic(&mut g, [(Tile::new(0, 0), true), (Tile::new(3, 3), true)]);
    assert_eq!(g.count(Plane::SoftStatic), soft_before);
    assert_eq!(g.count(Plane::HardStatic), hard_before);
    assert_eq!(g.export_planes().soft_static, snap_before.soft_static);
    assert_eq!(g.export_planes().hard_static, snap_before.hard_static);

    let dynamic_before = g.export_planes().dynamic;
    sync_static(&mut g, &[OBSTACLE; 16]);
    assert_eq!(g.export_planes().dynamic, dynamic_before);
}

#[test]
fn straight_line_diagonal_on_five_by_five() {
    let mut g = open_grid(5, 5);
    let start = Tile::new(0, 0);
    let goal = Tile::new(4, 4);
    let path = find_path(&g, start, goal, Policy::StraightLine, Connectivity::Eight).unwrap();
    assert_eq!(path, (0..5).map(|i| Tile::new(i, i)).collect::<Vec<_>>());

    for i in 1..5 {
        let mut bytes = vec![0u8; 25];
        bytes[i * 5 + i] = TRANS;
        sync_static(&mut g, &bytes);
        let blocked = find_path(&g, start, goal, Policy::StraightLine, Connectivity::Eight).unwrap();
        assert!(blocked.is_empty(), "line through blocked ({i},{i}) accepted");
    }
}

#[test]
fn capped_policies_terminate_on_enclosed_goal() {
    let mut g = open_grid(20, 20);
    let goal = Tile::new(10, 10);
    let ring: Vec<(Tile, bool)> = (9..=11)
        .flat_map(|y| (9..=11).map(move |x| Tile::new(x, y)))
        .filter(|t| *t != goal)
        .map(|t| (t, true))
        .collect();
    sync_dynamic(&mut g, ring);

    let config = SearchConfig::default();
    let mut pf = PathFinder::new(config.clone());
    for (p, cap) in [
        (Policy::SimpleMaxTryNpc, config.simple_npc.max_expansions),
        (Policy::PerfectMaxTryNpc, config.perfect_npc.max_expansions),
        (Policy::PerfectMaxTryPlayer, config.perfect_player.max_expansions),
    ] {
        for conn in [Connectivity::Four, Connectivity::Eight] {
            let req = PathRequest::new(Tile::new(0, 0), goal, p, conn);
            let out = pf.find_path_detailed(&g, &req).unwrap();
            assert!(out.path.is_empty(), "{p} reached an enclosed goal");
            assert!(out.expanded <= cap, "{p} expanded {} > cap {cap}", out.expanded);
        }
    }
}

#[test]
fn goal_one_past_the_edge_is_rejected() {
    let g = open_grid(6, 4);
    for p in Policy::ALL {
        for conn in [Connectivity::Four, Connectivity::Eight] {
            let err = find_path(&g, Tile::new(0, 0), Tile::new(6, 0), p, conn).unwrap_err();
            assert_eq!(err, GridError::OutOfBounds { x: 6, y: 0, columns: 6, rows: 4 });
        }
    }
}

#[test]
fn off_grid_occupant_is_skipped() {
    let mut g = open_grid(4, 4);
    let stats = sync_dynamic(&mut g, [(Tile::new(10, -2), true), (Tile::new(2, 1), true)]);
    assert_eq!(stats.off_grid, 1);
    assert_eq!(stats.marked, 1);
    assert_eq!(g.count(Plane::Dynamic), 1);
    assert!(g.test_dynamic(Tile::new(2, 1)).unwrap());
}

#[test]
fn four_and_eight_connectivity_differ_only_in_moves() {
    let g = open_grid(6, 6);
    let four = find_path(&g, Tile::new(0, 0), Tile::new(5, 5), Policy::PerfectMaxTryPlayer, Connectivity::Four).unwrap();
    let eight = find_path(&g, Tile::new(0, 0), Tile::new(5, 5), Policy::PerfectMaxTryPlayer, Connectivity::Eight).unwrap();
    assert_eq!(four.len(), 11);
    assert_eq!(eight.len(), 6);
}

#[test]
fn wide_grid_searches_do_not_overflow() {
    let mut g = ObstacleGrid::allocate(430_000_000, 1).unwrap();
    let start = Tile::new(0, 0);
    let goal = Tile::new(429_999_999, 0);
    let mut pf = PathFinder::default();

    let capped = pf.find_path_detailed(&g, &PathRequest::new(start, goal, Policy::PerfectMaxTryNpc, Connectivity::Four)).unwrap();
    assert!(capped.path.is_empty());
    assert_eq!(capped.reason, Some(gridnav_core::FailReason::IterationCap));

    let nudge = pf.find_path(&g, &PathRequest::new(start, goal, Policy::OneStep, Connectivity::Eight)).unwrap();
    assert_eq!(nudge, vec![start, Tile::new(1, 0)]);

    sync_dynamic(&mut g, [(Tile::new(5, 0), true)]);
    let line = pf.find_path(&g, &PathRequest::new(start, goal, Policy::StraightLine, Connectivity::Eight)).unwrap();
    assert!(line.is_empty());
}

#[test]
fn hard_terrain_stops_flyers_on_every_policy() {
    // Soft tile at x=1 is passable in the air, the hard tile at x=3 is not.
    let mut g = ObstacleGrid::allocate(5, 1).unwrap();
    sync_static(&mut g, &[0, TRANS, 0, OBSTACLE, 0]);
    let mut pf = PathFinder::default();
    let fly = |start: Tile, p: Policy| {
        PathRequest::new(start, Tile::new(4, 0), p, Connectivity::Eight).with_mobility(Mobility::Flying)
    };

    for p in Policy::ALL {
        assert!(pf.find_path(&g, &fly(Tile::new(2, 0), p)).unwrap().is_empty(), "{p} crossed hard terrain");
    }
    for p in Policy::CAPPED.into_iter().chain([Policy::StraightLine]) {
        assert!(pf.find_path(&g, &fly(Tile::new(0, 0), p)).unwrap().is_empty(), "{p} crossed hard terrain");
    }

    let over_soft = PathRequest::new(Tile::new(0, 0), Tile::new(2, 0), Policy::StraightLine, Connectivity::Eight)
        .with_mobility(Mobility::Flying);
    assert_eq!(pf.find_path(&g, &over_soft).unwrap().len(), 3);
}

#[test]
fn flyers_detour_through_soft_gap_in_hard_wall() {
    // Column 2 is hard on rows 0 and 1; row 2 holds a soft-only gap.
    let mut terrain = vec![0u8; 15];
    terrain[2] = OBSTACLE | TRANS;
    terrain[5 + 2] = OBSTACLE | TRANS;
    terrain[10 + 2] = TRANS;
    let mut g = ObstacleGrid::allocate(5, 3).unwrap();
    sync_static(&mut g, &terrain);
    let mut pf = PathFinder::default();

    for p in Policy::CAPPED {
        let ground = PathRequest::new(Tile::new(0, 1), Tile::new(4, 1), p, Connectivity::Eight);
        assert!(pf.find_path(&g, &ground).unwrap().is_empty(), "{p} walked through the wall");

        let path = pf.find_path(&g, &ground.with_mobility(Mobility::Flying)).unwrap();
        assert_eq!(path.first(), Some(&Tile::new(0, 1)));
        assert_eq!(path.last(), Some(&Tile::new(4, 1)));
        assert!(path.contains(&Tile::new(2, 2)), "{p} did not use the gap");
        for w in path.windows(2) {
            assert!(Connectivity::Eight.adjacent(w[0], w[1]));
            assert!(!g.test_hard(w[1]).unwrap(), "{} is hard blocked", w[1]);
        }
    }
}
