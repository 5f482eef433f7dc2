//! Bounded breadth-first reachability over a walkable mask.

use std::collections::VecDeque;

use digblast_core::enums::Direction;
use digblast_core::types::TileCoord;

use crate::mask::TileMask;

/// Every walkable tile reachable from `start` in at most `max_dist`
/// four-connected steps. A non-walkable or out-of-bounds start reaches
/// nothing.
pub fn flood_fill(walkable: &TileMask, start: TileCoord, max_dist: u32) -> TileMask {
    let mut reached = TileMask::new(walkable.width(), walkable.height());
    if !walkable.get(start) {
        return reached;
    }

    reached.set(start, true);
    let mut queue = VecDeque::from([(start, 0u32)]);

    while let Some((tile, dist)) = queue.pop_front() {
        if dist >= max_dist {
            continue;
        }
        for dir in Direction::ALL {
            let next = tile + dir.offset();
            if walkable.get(next) && !reached.get(next) {
                reached.set(next, true);
                queue.push_back((next, dist + 1));
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn open_mask(width: u32, height: u32) -> TileMask {
        let mut mask = TileMask::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                mask.set(IVec2::new(x, y), true);
            }
        }
        mask
    }

    #[test]
    fn test_distance_bound_is_manhattan_diamond() {
        let mask = open_mask(11, 11);
        let filled = flood_fill(&mask, IVec2::new(5, 5), 2);
        // 1 + 4 + 8 tiles within two steps.
        assert_eq!(filled.count(), 13);
        assert!(filled.get(IVec2::new(7, 5)));
        assert!(filled.get(IVec2::new(6, 6)));
        assert!(!filled.get(IVec2::new(7, 6)));
    }

    #[test]
    fn test_walls_stop_the_fill() {
        let mut mask = open_mask(7, 3);
        for y in 0..3 {
            mask.set(IVec2::new(3, y), false);
        }
        let filled = flood_fill(&mask, IVec2::new(1, 1), 8);
        assert_eq!(filled.count(), 9);
        assert!(!filled.get(IVec2::new(4, 1)));
    }

    #[test]
    fn test_blocked_start_reaches_nothing() {
        let mut mask = open_mask(3, 3);
        mask.set(IVec2::new(1, 1), false);
        assert!(flood_fill(&mask, IVec2::new(1, 1), 5).is_empty());
        assert!(flood_fill(&mask, IVec2::new(-1, 1), 5).is_empty());
    }

    #[test]
    fn test_zero_distance_is_start_only() {
        let mask = open_mask(3, 3);
        let filled = flood_fill(&mask, IVec2::new(0, 0), 0);
        assert_eq!(filled.iter().collect::<Vec<_>>(), vec![IVec2::new(0, 0)]);
    }
}
