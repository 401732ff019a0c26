//! Finding the windows that share an edge with another window.
use crate::models::{Direction, Handle, WindowHandle, Xyhw};

/// Returns the candidates whose `direction.opposite()` edge lies within `epsilon` pixels of the
/// target's `direction` edge and which overlap the target across that edge.
///
/// The candidates keep their order.
pub fn find_adjacent<H: Handle>(
    target: &Xyhw,
    direction: Direction,
    candidates: &[(WindowHandle<H>, Xyhw)],
    epsilon: i32,
) -> Vec<WindowHandle<H>> {
    let edge = target.edge_pos(direction);
    candidates
        .iter()
        .filter(|(_, geometry)| {
            (geometry.edge_pos(direction.opposite()) - edge).abs() <= epsilon
                && target.overlaps_across(geometry, direction)
        })
        .map(|(handle, _)| *handle)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    fn candidates(geometries: &[Xyhw]) -> Vec<(WindowHandle<MockHandle>, Xyhw)> {
        geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (WindowHandle(i as MockHandle), *g))
            .collect()
    }

    #[test]
    fn touching_window_is_adjacent() {
        let target = Xyhw::new(0, 0, 100, 100);
        let list = candidates(&[Xyhw::new(100, 0, 50, 100)]);
        assert_eq!(
            find_adjacent(&target, Direction::Right, &list, 2),
            vec![WindowHandle(0)]
        );
    }

    #[test]
    fn window_beyond_epsilon_is_not_adjacent() {
        let target = Xyhw::new(0, 0, 100, 100);
        let list = candidates(&[Xyhw::new(103, 0, 50, 100)]);
        assert!(find_adjacent(&target, Direction::Right, &list, 2).is_empty());
    }

    #[test]
    fn window_without_overlap_is_not_adjacent() {
        let target = Xyhw::new(0, 0, 100, 100);
        let list = candidates(&[Xyhw::new(100, 200, 50, 100)]);
        assert!(find_adjacent(&target, Direction::Right, &list, 2).is_empty());
        assert!(find_adjacent(&target, Direction::Right, &list, 1000).is_empty());
    }

    #[test]
    fn gaps_and_overlaps_within_epsilon_count() {
        let target = Xyhw::new(0, 0, 100, 100);
        let list = candidates(&[
            Xyhw::new(0, 102, 100, 50),
            Xyhw::new(50, 98, 100, 50),
            Xyhw::new(0, 0, 100, 50),
        ]);
        assert_eq!(
            find_adjacent(&target, Direction::Bottom, &list, 2),
            vec![WindowHandle(0), WindowHandle(1)]
        );
    }

    #[test]
    fn every_direction_looks_at_the_opposite_edge() {
        let target = Xyhw::new(100, 100, 100, 100);
        let list = candidates(&[
            Xyhw::new(100, 0, 100, 100),
            Xyhw::new(200, 100, 100, 100),
            Xyhw::new(100, 200, 100, 100),
            Xyhw::new(0, 100, 100, 100),
        ]);
        for (i, dir) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(
                find_adjacent(&target, dir, &list, 0),
                vec![WindowHandle(i as MockHandle)]
            );
        }
    }
}
