//! Unit tests for gsim-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u64::MAX);
        assert_eq!(EdgeId::INVALID.0, u64::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{normalize_angle, Point, Vec2};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_distance() {
        let p = Point::new(3.0, -4.0);
        assert!(p.distance(p) < 1e-9);
    }

    #[test]
    fn unit_grid_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = Point::new(0.0, 0.0);
        assert!((origin.bearing_to(Point::new(1.0, 0.0))).abs() < 1e-9);
        assert!((origin.bearing_to(Point::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn vec2_normalize_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn vec2_compose_identity() {
        // composing with the unit-x vector is the identity rotation.
        let v = Vec2::new(-0.98, 0.02);
        let composed = v.compose(Vec2::UNIT_X);
        assert!((composed.x - v.x).abs() < 1e-9);
        assert!((composed.y - v.y).abs() < 1e-9);
    }

    #[test]
    fn vec2_compose_quarter_turns() {
        // i * i == -1: two quarter turns compose into a half turn.
        let quarter = Vec2::new(0.0, 1.0);
        let half = quarter.compose(quarter);
        assert!((half.x - (-1.0)).abs() < 1e-9);
        assert!(half.y.abs() < 1e-9);
    }

    #[test]
    fn angle_normalization_wraps_into_range() {
        // 3π normalizes to π (the upper bound of the half-open range is inclusive).
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-9);
        // -π wraps up to π, not down to -3π.
        assert!((normalize_angle(-PI) - PI).abs() < 1e-9);
        // a value already in range is left untouched.
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-9);
    }
}

#[cfg(test)]
mod time {
    use crate::MonotonicClock;

    #[test]
    fn strictly_increasing_even_under_rapid_calls() {
        let mut clock = MonotonicClock::new();
        let mut last = clock.next();
        for _ in 0..10_000 {
            let next = clock.next();
            assert!(next > last, "{next:?} did not exceed {last:?}");
            last = next;
        }
    }
}

#[cfg(test)]
mod value {
    use crate::Value;
    use indexmap::IndexMap;

    #[test]
    fn scalar_conversions() {
        assert_eq!(Value::from(3i64).as_int(), Some(3));
        assert_eq!(Value::from("x").as_str(), Some("x"));
    }

    #[test]
    fn nested_map_preserves_insertion_order() {
        let mut m = IndexMap::new();
        m.insert("a".to_string(), Value::Int(1));
        m.insert("b".to_string(), Value::Int(2));
        let v = Value::Map(m);
        if let Value::Map(inner) = &v {
            let keys: Vec<_> = inner.keys().collect();
            assert_eq!(keys, vec!["a", "b"]);
        } else {
            panic!("expected map");
        }
    }
}
