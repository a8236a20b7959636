use crate::point::PointMass;
use crate::vector::Vector2D;

/// Generates `n` unit-mass points drawn uniformly from `[0, side) x [0, side)`.
/// - Ids are sequential, `0..n`.
/// - With a seed the distribution is reproducible; without one a fresh
///   entropy-seeded generator is used.
pub fn uniform_square(n: usize, side: f64, seed: Option<u64>) -> Vec<PointMass> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    (0..n)
        .map(|id| {
            // Draw x before y so a seed maps to one fixed layout
            let x = rng.f64() * side;
            let y = rng.f64() * side;
            PointMass::new(id, Vector2D::new(x, y), 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_square_bounds_and_ids() {
        let points = uniform_square(500, 20.0, Some(1));
        assert_eq!(points.len(), 500);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.id, i);
            assert_eq!(p.mass, 1.0);
            assert!((0.0..20.0).contains(&p.position.x()));
            assert!((0.0..20.0).contains(&p.position.y()));
        }
    }

    #[test]
    fn test_uniform_square_seeded_is_reproducible() {
        assert_eq!(uniform_square(64, 600.0, Some(9)), uniform_square(64, 600.0, Some(9)));
        assert_ne!(uniform_square(64, 600.0, Some(9)), uniform_square(64, 600.0, Some(10)));
    }

    #[test]
    fn test_uniform_square_empty() {
        assert!(uniform_square(0, 1.0, None).is_empty());
    }
}
