//! Breadth-first chase search on an open square grid.
//!
//! The search expands outward from the pursuer and stops at the first
//! dequeued cell that sits next to the target. How a direction is read off
//! that cell is controlled by [`PathPolicy`].

use std::collections::VecDeque;

use tracing::trace;

use crate::grid::{Dir, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathPolicy {
    /// Direction a mover standing on the discovered adjacent cell would take
    /// to reach the target.
    #[default]
    AdjacentCell,
    /// First hop out of the start cell along the discovered path.
    FirstStep,
}

/// Compass direction that closes the gap from `from` to `to`, comparing rows
/// before columns. `None` when the cells coincide.
pub fn heading(from: Pos, to: Pos) -> Option<Dir> {
    if from.row < to.row {
        Some(Dir::South)
    } else if from.row > to.row {
        Some(Dir::North)
    } else if from.col < to.col {
        Some(Dir::East)
    } else if from.col > to.col {
        Some(Dir::West)
    } else {
        None
    }
}

pub fn find_direction(size: usize, start: Pos, target: Pos) -> Option<Dir> {
    find_direction_with(PathPolicy::AdjacentCell, size, start, target)
}

pub fn find_direction_with(
    policy: PathPolicy,
    size: usize,
    start: Pos,
    target: Pos,
) -> Option<Dir> {
    // Every neighbour of the target would otherwise qualify.
    if start == target || !start.in_bounds(size) {
        return None;
    }

    let mut visited = vec![vec![false; size]; size];
    let mut parent: Vec<Vec<Option<Pos>>> = vec![vec![None; size]; size];
    let mut q = VecDeque::new();
    visited[start.row][start.col] = true;
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        if pos.manhattan(target) == 1 {
            trace!(?start, ?target, found = ?pos, "adjacent cell reached");
            return match policy {
                PathPolicy::AdjacentCell => heading(pos, target),
                PathPolicy::FirstStep => first_hop(&parent, start, pos, target),
            };
        }

        for (_, next) in pos.neighbors(size) {
            if !visited[next.row][next.col] {
                visited[next.row][next.col] = true;
                parent[next.row][next.col] = Some(pos);
                q.push_back(next);
            }
        }
    }

    None
}

fn first_hop(parent: &[Vec<Option<Pos>>], start: Pos, found: Pos, target: Pos) -> Option<Dir> {
    if found == start {
        return heading(start, target);
    }
    let mut cur = found;
    while let Some(prev) = parent[cur.row][cur.col] {
        if prev == start {
            return heading(start, cur);
        }
        cur = prev;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 10;

    fn apply(pos: Pos, dir: Dir) -> Pos {
        pos.step(dir, N).expect("move stays on the grid")
    }

    #[test]
    fn adjacent_target_to_the_east() {
        assert_eq!(find_direction(N, Pos::new(5, 5), Pos::new(5, 6)), Some(Dir::East));
    }

    #[test]
    fn adjacent_in_each_direction() {
        let c = Pos::new(5, 5);
        assert_eq!(find_direction(N, c, Pos::new(4, 5)), Some(Dir::North));
        assert_eq!(find_direction(N, c, Pos::new(6, 5)), Some(Dir::South));
        assert_eq!(find_direction(N, c, Pos::new(5, 4)), Some(Dir::West));
    }

    #[test]
    fn same_cell_has_no_direction() {
        for policy in [PathPolicy::AdjacentCell, PathPolicy::FirstStep] {
            let p = Pos::new(3, 3);
            assert_eq!(find_direction_with(policy, N, p, p), None);
        }
    }

    #[test]
    fn opposite_corner_resolves_from_a_cell_next_to_target() {
        let dir = find_direction(N, Pos::new(0, 0), Pos::new(9, 9));
        // Only (8,9) or (9,8) can be the discovered cell.
        assert!(matches!(dir, Some(Dir::South) | Some(Dir::East)), "{dir:?}");
    }

    #[test]
    fn repeated_calls_agree() {
        let a = find_direction(N, Pos::new(1, 8), Pos::new(7, 2));
        let b = find_direction(N, Pos::new(1, 8), Pos::new(7, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn first_step_is_a_neighbor_of_start() {
        let start = Pos::new(2, 2);
        let target = Pos::new(6, 7);
        let dir = find_direction_with(PathPolicy::FirstStep, N, start, target).unwrap();
        let next = apply(start, dir);
        assert_eq!(next.manhattan(target) + 1, start.manhattan(target));
    }

    #[test]
    fn both_policies_close_distance_on_open_grid() {
        let size = 6;
        for policy in [PathPolicy::AdjacentCell, PathPolicy::FirstStep] {
            for sr in 0..size {
                for sc in 0..size {
                    for tr in 0..size {
                        for tc in 0..size {
                            let start = Pos::new(sr, sc);
                            let target = Pos::new(tr, tc);
                            let got = find_direction_with(policy, size, start, target);
                            if start == target {
                                assert_eq!(got, None);
                                continue;
                            }
                            let dir = got.unwrap_or_else(|| {
                                panic!("{policy:?} {start:?} -> {target:?} found nothing")
                            });
                            let next = start
                                .step(dir, size)
                                .unwrap_or_else(|| panic!("{policy:?} {start:?} left grid"));
                            assert_eq!(
                                next.manhattan(target) + 1,
                                start.manhattan(target),
                                "{policy:?} {start:?} -> {target:?} went {dir:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_start_finds_nothing() {
        assert_eq!(find_direction(N, Pos::new(N, 0), Pos::new(0, 0)), None);
    }

    #[test]
    fn heading_prefers_rows() {
        assert_eq!(heading(Pos::new(0, 0), Pos::new(3, 3)), Some(Dir::South));
        assert_eq!(heading(Pos::new(3, 0), Pos::new(3, 3)), Some(Dir::East));
        assert_eq!(heading(Pos::new(3, 3), Pos::new(3, 3)), None);
    }
}
