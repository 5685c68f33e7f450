//! Shape overlap tests and frame-to-frame contact tracking.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::shared::*;

pub fn overlaps(a: Shape, a_pos: Vec2, b: Shape, b_pos: Vec2) -> bool {
    match (a, b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            a_pos.distance_squared(b_pos) <= (ra + rb) * (ra + rb)
        }
        (Shape::Rect { half: ha }, Shape::Rect { half: hb }) => {
            let gap = (a_pos - b_pos).abs();
            gap.x <= ha.x + hb.x && gap.y <= ha.y + hb.y
        }
        (Shape::Circle { radius }, Shape::Rect { half }) => circle_rect(a_pos, radius, b_pos, half),
        (Shape::Rect { half }, Shape::Circle { radius }) => circle_rect(b_pos, radius, a_pos, half),
    }
}

fn circle_rect(center: Vec2, radius: f32, rect_pos: Vec2, half: Vec2) -> bool {
    let closest = center.clamp(rect_pos - half, rect_pos + half);
    center.distance_squared(closest) <= radius * radius
}

/// Remembers which pairs overlapped last frame so each frame's contacts can
/// be flagged as new or sustained.
#[derive(Resource, Debug, Default)]
pub struct ContactTracker {
    previous: HashSet<(Entity, Entity)>,
}

impl ContactTracker {
    /// Replaces last frame's overlaps with `current` and returns one event per
    /// pair. Pairs that stopped overlapping are forgotten.
    pub fn observe(&mut self, current: Vec<(ContactKind, Entity, Entity)>) -> Vec<ContactEvent> {
        let mut seen = HashSet::with_capacity(current.len());
        let events = current
            .into_iter()
            .map(|(kind, first, second)| {
                seen.insert((first, second));
                ContactEvent {
                    kind,
                    first,
                    second,
                    started: !self.previous.contains(&(first, second)),
                }
            })
            .collect();
        self.previous = seen;
        events
    }

    pub fn clear(&mut self) {
        self.previous.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_overlap_is_inclusive_at_touching() {
        let a = Shape::Circle { radius: 10.0 };
        let b = Shape::Circle { radius: 5.0 };
        assert!(overlaps(a, Vec2::ZERO, b, Vec2::new(15.0, 0.0)));
        assert!(!overlaps(a, Vec2::ZERO, b, Vec2::new(15.1, 0.0)));
    }

    #[test]
    fn test_rect_overlap() {
        let boss = Shape::Rect { half: Vec2::new(40.0, 80.0) };
        let bullet = Shape::Rect { half: Vec2::new(12.0, 4.0) };
        assert!(overlaps(boss, Vec2::ZERO, bullet, Vec2::new(50.0, 70.0)));
        assert!(!overlaps(boss, Vec2::ZERO, bullet, Vec2::new(53.0, 0.0)));
    }

    #[test]
    fn test_circle_against_rect_corner() {
        let rect = Shape::Rect { half: Vec2::splat(10.0) };
        let circle = Shape::Circle { radius: 5.0 };
        // Inside the bounding box but outside the rounded corner.
        assert!(!overlaps(circle, Vec2::new(14.0, 14.0), rect, Vec2::ZERO));
        assert!(overlaps(rect, Vec2::ZERO, circle, Vec2::new(13.0, 13.0)));
        assert!(overlaps(circle, Vec2::new(14.0, 0.0), rect, Vec2::ZERO));
    }

    #[test]
    fn test_tracker_flags_only_new_pairs_as_started() {
        let mut tracker = ContactTracker::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let c = Entity::from_raw(3);

        let first = tracker.observe(vec![(ContactKind::PlayerEnemy, a, b)]);
        assert!(first[0].started);

        let second = tracker.observe(vec![
            (ContactKind::PlayerEnemy, a, b),
            (ContactKind::PlayerEnemy, a, c),
        ]);
        assert!(!second[0].started);
        assert!(second[1].started);

        // Separating and touching again is a fresh contact.
        tracker.observe(vec![]);
        let third = tracker.observe(vec![(ContactKind::PlayerEnemy, a, b)]);
        assert!(third[0].started);
    }
}
