//! Height-shaping curve for arcing projectiles.
//!
//! Maps the fraction of the flight completed (0 at launch, 1 on arrival)
//! to an interpolation factor between launch height and ground height.
//! Values below zero lift the shell above its launch height.

use serde::{Deserialize, Serialize};

/// One keyframe of an [`ArcCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear curve. Clamps to the first/last key outside its range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcCurve {
    pub keys: Vec<CurveKey>,
}

impl Default for ArcCurve {
    fn default() -> Self {
        Self {
            keys: vec![
                CurveKey {
                    time: 0.0,
                    value: 0.0,
                },
                CurveKey {
                    time: 0.45,
                    value: -0.6,
                },
                CurveKey {
                    time: 1.0,
                    value: 1.0,
                },
            ],
        }
    }
}

impl ArcCurve {
    /// Straight descent from launch height to the ground.
    pub fn linear() -> Self {
        Self {
            keys: vec![
                CurveKey {
                    time: 0.0,
                    value: 0.0,
                },
                CurveKey {
                    time: 1.0,
                    value: 1.0,
                },
            ],
        }
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return t.clamp(0.0, 1.0),
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return b.value;
                }
                return a.value + (b.value - a.value) * (t - a.time) / span;
            }
        }
        last.value
    }

    /// A usable curve has ascending keys and ends at exactly 1, so that a
    /// shell that has arrived horizontally also sits on the ground.
    pub fn is_well_formed(&self) -> bool {
        let ascending = self.keys.windows(2).all(|w| w[0].time <= w[1].time);
        ascending && self.keys.last().is_some_and(|k| k.value == 1.0)
    }
}
