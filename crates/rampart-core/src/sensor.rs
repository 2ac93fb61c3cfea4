//! Detection volumes and the per-tower membership set of sensed units.
//!
//! The set is generic over the unit handle so it can be exercised with
//! plain integers; the sim crate instantiates it with `hecs::Entity`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::SENSOR_BOX_HEIGHT;
use crate::enums::SensorShape;

/// Detection volume attached to a tower origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SensorVolume {
    /// Axis-aligned box around `origin + center_offset`.
    Box {
        half_extents: Vec3,
        center_offset: Vec3,
    },
    /// Sphere of `radius` around the origin.
    Sphere { radius: f32 },
}

impl SensorVolume {
    /// Builds a volume that covers `range` units in every horizontal
    /// direction. Boxes are `2 * range` wide and deep, a fixed height tall,
    /// and rest on the ground.
    pub fn for_range(shape: SensorShape, range: f32) -> Self {
        match shape {
            SensorShape::Box => SensorVolume::Box {
                half_extents: Vec3::new(range, SENSOR_BOX_HEIGHT / 2.0, range),
                center_offset: Vec3::new(0.0, SENSOR_BOX_HEIGHT / 2.0, 0.0),
            },
            SensorShape::Sphere => SensorVolume::Sphere { radius: range },
        }
    }

    /// Whether `point` lies inside the volume anchored at `origin`.
    pub fn contains(&self, origin: Vec3, point: Vec3) -> bool {
        match *self {
            SensorVolume::Box {
                half_extents,
                center_offset,
            } => {
                let d = (point - (origin + center_offset)).abs();
                d.x <= half_extents.x && d.y <= half_extents.y && d.z <= half_extents.z
            }
            SensorVolume::Sphere { radius } => origin.distance_squared(point) <= radius * radius,
        }
    }
}

/// Live set of units currently overlapping a tower's detection volume.
///
/// Membership is driven by enter/exit notifications. Units that are
/// destroyed while inside never produce an exit, so queries evict stale
/// entries as they find them.
#[derive(Debug, Clone, PartialEq)]
pub struct Targeter<T> {
    volume: SensorVolume,
    members: Vec<T>,
}

impl<T: Copy + PartialEq> Targeter<T> {
    pub fn new(volume: SensorVolume) -> Self {
        Self {
            volume,
            members: Vec::new(),
        }
    }

    pub fn volume(&self) -> &SensorVolume {
        &self.volume
    }

    /// Raw membership in entry order, stale entries included.
    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn contains(&self, unit: T) -> bool {
        self.members.contains(&unit)
    }

    /// Adds `unit` unless it is already a member.
    pub fn on_enter(&mut self, unit: T) {
        if !self.members.contains(&unit) {
            self.members.push(unit);
        }
    }

    /// Removes `unit` if it is a member. Entry order of the rest is kept.
    pub fn on_exit(&mut self, unit: T) {
        if let Some(index) = self.members.iter().position(|m| *m == unit) {
            self.members.remove(index);
        }
    }

    /// Evicts stale members, then reports whether any remain.
    pub fn any_targets_available<F>(&mut self, mut is_live: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        self.members.retain(|m| is_live(*m));
        !self.members.is_empty()
    }

    /// Nearest live member to `point`.
    ///
    /// `locate` returns the position of a live unit, or `None` for a unit
    /// that was destroyed or is dead; those are removed from the set. Ties
    /// keep the member that entered first.
    pub fn closest<F>(&mut self, point: Vec3, mut locate: F) -> Option<T>
    where
        F: FnMut(T) -> Option<Vec3>,
    {
        let mut lowest = f32::INFINITY;
        let mut best = None;
        self.members.retain(|m| match locate(*m) {
            Some(position) => {
                let dist = point.distance(position);
                if dist < lowest {
                    lowest = dist;
                    best = Some(*m);
                }
                true
            }
            None => false,
        });
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(radius: f32) -> Targeter<u32> {
        Targeter::new(SensorVolume::Sphere { radius })
    }

    #[test]
    fn enter_is_idempotent_and_exit_removes() {
        let mut t = sphere(10.0);
        t.on_enter(1);
        t.on_enter(1);
        t.on_enter(2);
        assert_eq!(t.members(), &[1, 2]);

        t.on_exit(1);
        t.on_exit(7);
        assert_eq!(t.members(), &[2]);
    }

    #[test]
    fn closest_evicts_stale_and_picks_nearest() {
        let mut t = sphere(100.0);
        for id in [1, 2, 3, 4] {
            t.on_enter(id);
        }
        // 2 is dead, 4 was destroyed
        let found = t.closest(Vec3::ZERO, |id| match id {
            1 => Some(Vec3::new(9.0, 0.0, 0.0)),
            3 => Some(Vec3::new(0.0, 0.0, 4.0)),
            _ => None,
        });
        assert_eq!(found, Some(3));
        assert_eq!(t.members(), &[1, 3]);
    }

    #[test]
    fn closest_tie_keeps_first_entered() {
        let mut t = sphere(100.0);
        t.on_enter(5);
        t.on_enter(6);
        let found = t.closest(Vec3::ZERO, |id| match id {
            5 => Some(Vec3::new(3.0, 0.0, 0.0)),
            _ => Some(Vec3::new(0.0, 0.0, -3.0)),
        });
        assert_eq!(found, Some(5));
    }

    #[test]
    fn fully_stale_set_yields_none_and_empties() {
        let mut t = sphere(100.0);
        t.on_enter(1);
        t.on_enter(2);
        assert_eq!(t.closest(Vec3::ZERO, |_| None), None);
        assert!(t.members().is_empty());
    }

    #[test]
    fn availability_reflects_live_members_only() {
        let mut t = sphere(100.0);
        assert!(!t.any_targets_available(|_| true));
        t.on_enter(1);
        t.on_enter(2);
        assert!(t.any_targets_available(|id| id == 2));
        assert_eq!(t.members(), &[2]);
        assert!(!t.any_targets_available(|_| false));
    }

    #[test]
    fn box_volume_covers_range_and_height() {
        let volume = SensorVolume::for_range(SensorShape::Box, 20.0);
        let origin = Vec3::ZERO;
        assert!(volume.contains(origin, Vec3::new(20.0, 0.0, -20.0)));
        assert!(volume.contains(origin, Vec3::new(0.0, 30.0, 0.0)));
        assert!(!volume.contains(origin, Vec3::new(20.5, 0.0, 0.0)));
        assert!(!volume.contains(origin, Vec3::new(0.0, -0.5, 0.0)));
    }

    #[test]
    fn sphere_volume_uses_radius() {
        let volume = SensorVolume::for_range(SensorShape::Sphere, 10.0);
        assert!(volume.contains(Vec3::ZERO, Vec3::new(6.0, 0.0, 8.0)));
        assert!(!volume.contains(Vec3::ZERO, Vec3::new(6.0, 0.1, 8.0)));
    }
}
