//! Shape descriptors and generation
//!
//! Generation is split in two: the random draws (kind, vertex count, spawn
//! position, fill color) and [`build_shape`], a pure function that lays out
//! the geometry and computes the surface area.

use std::f32::consts::PI;
use std::f64::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// Polygon vertex count range (inclusive)
pub const MIN_POLYGON_VERTICES: u32 = 3;
pub const MAX_POLYGON_VERTICES: u32 = 6;

/// Shape variant, with the polygon's vertex count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    Polygon { vertices: u32 },
    Circle,
    Ellipse,
}

impl ShapeKind {
    /// Map a six-sided die roll: 1-4 polygon, 5 circle, 6 ellipse
    pub fn from_roll(roll: u32, vertices: u32) -> Self {
        match roll {
            5 => ShapeKind::Circle,
            6 => ShapeKind::Ellipse,
            _ => ShapeKind::Polygon { vertices },
        }
    }

    /// Roll a kind; polygons are four times as likely as either circle or ellipse
    pub fn roll(rng: &mut impl Rng) -> Self {
        let roll = rng.random_range(1..=6);
        if roll <= 4 {
            let vertices = rng.random_range(MIN_POLYGON_VERTICES..=MAX_POLYGON_VERTICES);
            ShapeKind::Polygon { vertices }
        } else {
            ShapeKind::from_roll(roll, MIN_POLYGON_VERTICES)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Polygon { .. } => "polygon",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
        }
    }
}

/// A generated shape, handed to the world on spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Center of the shape
    pub position: Vec2,
    /// Base size unit the geometry was built from
    pub radius: f32,
    /// Absolute polygon vertices (empty for circle and ellipse)
    pub points: Vec<Vec2>,
    /// Surface area, fixed at creation
    pub area: f32,
    /// Owned by the world's physics step after spawn
    pub velocity_y: f32,
    /// Fill color as 0xRRGGBB
    pub color: u32,
}

impl Shape {
    /// Semi-axes (x, y) of the bounding ellipse
    pub fn semi_axes(&self) -> Vec2 {
        match self.kind {
            ShapeKind::Ellipse => Vec2::new(self.radius, self.radius / 2.0),
            _ => Vec2::splat(self.radius),
        }
    }

    /// Fill color as normalized RGBA
    pub fn rgba(&self) -> [f32; 4] {
        let channel = |shift: u32| ((self.color >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0), 1.0]
    }
}

/// Build a shape from its kind, center and radius
pub fn build_shape(kind: ShapeKind, position: Vec2, radius: f32, color: u32) -> Shape {
    let (points, area) = match kind {
        ShapeKind::Circle => (Vec::new(), PI * radius * radius),
        ShapeKind::Ellipse => (Vec::new(), PI * radius * radius / 2.0),
        ShapeKind::Polygon { vertices } => {
            let points = polygon_points(position, radius, vertices);
            let area = polygon_area(&points, radius);
            (points, area)
        }
    };

    Shape {
        kind,
        position,
        radius,
        points,
        area,
        velocity_y: 0.0,
        color,
    }
}

/// Vertices on a circle of `radius` around `center`.
///
/// The `180 * n` term is added to a radian angle, so it only rotates the
/// starting vertex. Kept for output compatibility with existing layouts.
/// Angles reach ~1080 rad, so they are reduced in f64 before the f32 trig.
pub fn polygon_points(center: Vec2, radius: f32, vertices: u32) -> Vec<Vec2> {
    let n = vertices as f64;
    let offset = 360.0 / 2.0 * n;
    (0..vertices)
        .map(|i| {
            let theta = (offset + TAU * i as f64 / n).rem_euclid(TAU);
            center + polar_to_cartesian(radius, theta as f32)
        })
        .collect()
}

/// `½ · r · n · edge`, with the edge measured between the first two vertices
pub fn polygon_area(points: &[Vec2], radius: f32) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let edge = points[0].distance(points[1]);
    0.5 * radius * points.len() as f32 * edge
}

/// Default spawn point: random x inside the viewport margins, just above the top edge.
///
/// A viewport narrower than two radii has no valid range; the shape is
/// centered horizontally instead.
pub fn spawn_position(rng: &mut impl Rng, viewport_width: f32, radius: f32) -> Vec2 {
    let min_x = radius;
    let max_x = viewport_width - radius;
    let x = if max_x >= min_x {
        rng.random_range(min_x..=max_x)
    } else {
        log::debug!(
            "Viewport width {} is narrower than two radii ({}), centering spawn",
            viewport_width,
            2.0 * radius
        );
        viewport_width / 2.0
    };
    Vec2::new(x, -radius)
}

/// Random opaque fill color
pub fn random_color(rng: &mut impl Rng) -> u32 {
    rng.random_range(0..=0xFF_FFFF)
}

/// Draw kind and color, then build the shape at `position`
pub fn generate_shape(rng: &mut impl Rng, position: Vec2, radius: f32) -> Shape {
    let kind = ShapeKind::roll(rng);
    let color = random_color(rng);
    build_shape(kind, position, radius, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_circle_and_ellipse_area() {
        let circle = build_shape(ShapeKind::Circle, Vec2::new(200.0, -60.0), 60.0, 0);
        assert!((circle.area - 11309.73).abs() < 0.01);
        assert!(circle.points.is_empty());

        let ellipse = build_shape(ShapeKind::Ellipse, Vec2::new(200.0, -60.0), 60.0, 0);
        assert!((ellipse.area - 5654.87).abs() < 0.01);
        assert_eq!(ellipse.semi_axes(), Vec2::new(60.0, 30.0));
    }

    #[test]
    fn test_triangle_area_uses_edge_approximation() {
        let r = 10.0;
        let shape = build_shape(ShapeKind::Polygon { vertices: 3 }, Vec2::ZERO, r, 0);
        assert_eq!(shape.points.len(), 3);
        // Chord between adjacent vertices is 2r·sin(π/3) = r√3
        let expected = 0.5 * r * 3.0 * r * 3.0_f32.sqrt();
        assert!((shape.area - expected).abs() < 0.01);
    }

    #[test]
    fn test_polygon_points_lie_on_circle() {
        let center = Vec2::new(120.0, -40.0);
        for n in MIN_POLYGON_VERTICES..=MAX_POLYGON_VERTICES {
            let points = polygon_points(center, 40.0, n);
            assert_eq!(points.len(), n as usize);
            for p in &points {
                assert!((p.distance(center) - 40.0).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_polygon_offset_matches_wide_precision() {
        // n = 6: offset 1080 rad, reduced before the f32 trig
        let points = polygon_points(Vec2::ZERO, 60.0, 6);
        for (i, p) in points.iter().enumerate() {
            let theta = 1080.0_f64 + TAU * i as f64 / 6.0;
            let expected = (60.0 * theta.cos(), 60.0 * theta.sin());
            assert!((p.x as f64 - expected.0).abs() < 1e-4, "x{i}: {}", p.x);
            assert!((p.y as f64 - expected.1).abs() < 1e-4, "y{i}: {}", p.y);
        }
    }

    #[test]
    fn test_new_shape_is_at_rest() {
        let shape = build_shape(ShapeKind::Polygon { vertices: 5 }, Vec2::ZERO, 60.0, 0xFF8000);
        assert_eq!(shape.velocity_y, 0.0);
        assert_eq!(shape.rgba(), [1.0, 128.0 / 255.0, 0.0, 1.0]);
    }

    #[test]
    fn test_from_roll_mapping() {
        for roll in 1..=4 {
            assert_eq!(
                ShapeKind::from_roll(roll, 4),
                ShapeKind::Polygon { vertices: 4 }
            );
        }
        assert_eq!(ShapeKind::from_roll(5, 4), ShapeKind::Circle);
        assert_eq!(ShapeKind::from_roll(6, 4), ShapeKind::Ellipse);
    }

    #[test]
    fn test_roll_distribution_favors_polygons() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 3];
        for _ in 0..6000 {
            match ShapeKind::roll(&mut rng) {
                ShapeKind::Polygon { vertices } => {
                    assert!((MIN_POLYGON_VERTICES..=MAX_POLYGON_VERTICES).contains(&vertices));
                    counts[0] += 1;
                }
                ShapeKind::Circle => counts[1] += 1,
                ShapeKind::Ellipse => counts[2] += 1,
            }
        }
        assert!((3800..=4200).contains(&counts[0]), "polygons: {}", counts[0]);
        assert!((800..=1200).contains(&counts[1]), "circles: {}", counts[1]);
        assert!((800..=1200).contains(&counts[2]), "ellipses: {}", counts[2]);
    }

    #[test]
    fn test_spawn_position_narrow_viewport_centers() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pos = spawn_position(&mut rng, 100.0, 60.0);
        assert_eq!(pos, Vec2::new(50.0, -60.0));
    }

    #[test]
    fn test_spawn_position_exact_fit() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pos = spawn_position(&mut rng, 120.0, 60.0);
        assert_eq!(pos, Vec2::new(60.0, -60.0));
    }

    proptest! {
        #[test]
        fn prop_spawn_position_within_margins(seed in any::<u64>(), width in 120.0f32..4000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let pos = spawn_position(&mut rng, width, 60.0);
            prop_assert!(pos.x >= 60.0 && pos.x <= width - 60.0);
            prop_assert_eq!(pos.y, -60.0);
        }

        #[test]
        fn prop_polygon_area_formula(vertices in 3u32..=6, radius in 1.0f32..200.0) {
            let shape = build_shape(ShapeKind::Polygon { vertices }, Vec2::new(300.0, -radius), radius, 0);
            let edge = shape.points[0].distance(shape.points[1]);
            let expected = 0.5 * radius * vertices as f32 * edge;
            prop_assert!((shape.area - expected).abs() <= expected * 1e-5);
            prop_assert!(shape.area > 0.0);
        }

        #[test]
        fn prop_generated_shape_area_positive(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let shape = generate_shape(&mut rng, Vec2::new(200.0, -60.0), 60.0);
            prop_assert!(shape.area > 0.0);
            prop_assert!(shape.color <= 0xFF_FFFF);
        }
    }
}
