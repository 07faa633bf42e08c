//! One evaluated sample of an item.
//!
//! Units are those of the file: km and km/day for bodies, radians and
//! radians/day for orientation items, seconds for TT−TDB.

use nalgebra::Vector3;
use smallvec::SmallVec;

/// Values of every component of an item; never more than three.
pub type Components = SmallVec<[f64; 3]>;

/// Result of interpolating one item at one Julian Date.
///
/// Fields
/// -----------------
/// * `jd` — Julian Date the sample was evaluated at.
/// * `position` — One value per component, in file order.
/// * `velocity` — Time derivative of each component (per day); `None` for
///   items without a derivative.
#[derive(Debug, PartialEq, Clone)]
pub struct InterpResult {
    pub jd: f64,
    pub position: Components,
    pub velocity: Option<Components>,
}

impl InterpResult {
    pub fn component_count(&self) -> usize {
        self.position.len()
    }

    /// Position as a 3-vector, for three-component items only.
    ///
    /// ```rust
    /// use smallvec::smallvec;
    /// use uephem::jpl_ephem::horizon::interpolation_result::InterpResult;
    ///
    /// let sample = InterpResult { jd: 2451545.0, position: smallvec![1.0, 2.0, 3.0], velocity: None };
    /// assert_eq!(sample.position_vector3().unwrap().y, 2.0);
    /// assert!(sample.velocity_vector3().is_none());
    /// ```
    pub fn position_vector3(&self) -> Option<Vector3<f64>> {
        to_vector3(&self.position)
    }

    pub fn velocity_vector3(&self) -> Option<Vector3<f64>> {
        self.velocity.as_ref().and_then(|v| to_vector3(v))
    }
}

fn to_vector3(values: &[f64]) -> Option<Vector3<f64>> {
    match values {
        [x, y, z] => Some(Vector3::new(*x, *y, *z)),
        _ => None,
    }
}

#[cfg(test)]
mod test_interpolation_result {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_vector_views() {
        let sample = InterpResult {
            jd: 2440500.0,
            position: smallvec![1.0, -2.0, 3.0],
            velocity: Some(smallvec![0.1, 0.2, 0.3]),
        };
        assert_eq!(sample.component_count(), 3);
        assert_eq!(sample.position_vector3(), Some(Vector3::new(1.0, -2.0, 3.0)));
        assert_eq!(sample.velocity_vector3(), Some(Vector3::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_non_vector_items() {
        let nutations = InterpResult {
            jd: 2440500.0,
            position: smallvec![1e-5, 2e-5],
            velocity: Some(smallvec![0.0, 0.0]),
        };
        assert!(nutations.position_vector3().is_none());
        assert!(nutations.velocity_vector3().is_none());

        let tt_tdb = InterpResult {
            jd: 2440500.0,
            position: smallvec![0.0016],
            velocity: None,
        };
        assert_eq!(tt_tdb.component_count(), 1);
        assert!(tt_tdb.position_vector3().is_none());
    }
}
