//! Directional cone areas for flamethrowers and extinguishers.

use glam::IVec2;

use digblast_core::enums::Direction;
use digblast_core::types::TileCoord;

use crate::flood::flood_fill;
use crate::mask::TileMask;

/// Tiles reached by a 90-degree cone fired from `origin` towards `dir`.
///
/// The cone's apex is the anchor tile one step ahead of `origin`. A tile
/// belongs to the cone when it is flood-reachable from the anchor within
/// `max_dist` steps and its sideways offset from the firing axis does not
/// exceed its forward offset. The anchor itself is always included while
/// it is inside the grid; an anchor outside the grid yields nothing.
pub fn cone_area(
    walkable: &TileMask,
    origin: TileCoord,
    dir: Direction,
    max_dist: u32,
) -> TileMask {
    let anchor = origin + dir.offset();
    if !walkable.in_bounds(anchor) {
        return TileMask::new(walkable.width(), walkable.height());
    }

    let reach = flood_fill(walkable, anchor, max_dist);
    let aim = wedge(walkable.width(), walkable.height(), anchor, dir.offset());
    let mut area = reach.intersect(&aim);
    area.set(anchor, true);
    area
}

/// Every tile whose sideways offset from the `axis` ray out of `apex` is
/// no larger than its forward offset.
fn wedge(width: u32, height: u32, apex: TileCoord, axis: IVec2) -> TileMask {
    let mut mask = TileMask::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let tile = IVec2::new(x, y);
            let rel = tile - apex;
            let forward = rel.dot(axis);
            let sideways = (rel.x * axis.y - rel.y * axis.x).abs();
            if forward >= 0 && sideways <= forward {
                mask.set(tile, true);
            }
        }
    }
    mask
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
    fn test_cone_widens_with_distance() {
        let mask = open_mask(12, 12);
        let area = cone_area(&mask, IVec2::new(2, 6), Direction::Right, 3);
        assert!(area.get(IVec2::new(3, 6)));
        assert!(!area.get(IVec2::new(3, 7)));
        assert!(area.get(IVec2::new(4, 5)));
        assert!(area.get(IVec2::new(4, 7)));
        assert!(!area.get(IVec2::new(4, 8)));
        // Behind the origin and the origin itself stay untouched.
        assert!(!area.get(IVec2::new(2, 6)));
        assert!(!area.get(IVec2::new(1, 6)));
    }

    #[test]
    fn test_cone_respects_flood_distance() {
        let mask = open_mask(12, 12);
        let area = cone_area(&mask, IVec2::new(5, 10), Direction::Up, 2);
        assert!(area.get(IVec2::new(5, 7)));
        assert!(!area.get(IVec2::new(5, 6)));
        // Diagonal edge tile needs two steps: (6,8) from anchor (5,9).
        assert!(area.get(IVec2::new(6, 8)));
    }

    #[test]
    fn test_cone_blocked_by_walls() {
        let mut mask = open_mask(10, 5);
        for y in 0..5 {
            mask.set(IVec2::new(5, y), false);
        }
        let area = cone_area(&mask, IVec2::new(2, 2), Direction::Right, 6);
        assert!(area.iter().all(|t| t.x < 5));
    }

    #[test]
    fn test_wedge_ignores_walls() {
        let aim = wedge(8, 8, IVec2::new(1, 4), IVec2::new(1, 0));
        assert!(aim.get(IVec2::new(1, 4)));
        assert!(aim.get(IVec2::new(4, 1)));
        assert!(!aim.get(IVec2::new(3, 1)));
        assert!(!aim.get(IVec2::new(0, 4)));
    }

    #[test]
    fn test_anchor_out_of_bounds_is_empty() {
        let mask = open_mask(4, 4);
        assert!(cone_area(&mask, IVec2::new(0, 2), Direction::Left, 6).is_empty());
    }

    #[test]
    fn test_solid_anchor_still_included() {
        let mut mask = open_mask(6, 6);
        mask.set(IVec2::new(3, 3), false);
        let area = cone_area(&mask, IVec2::new(2, 3), Direction::Right, 4);
        assert_eq!(area.iter().collect::<Vec<_>>(), vec![IVec2::new(3, 3)]);
    }
}
