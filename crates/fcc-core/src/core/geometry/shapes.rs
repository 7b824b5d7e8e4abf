use super::Point;
use super::error::{GeometryError, require_positive};
use nalgebra::Vector3;
use std::f64::consts::SQRT_2;

/// Relative slack applied to every boundary test, scaled by the shape's own size.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// A bounded region of ambient space.
///
/// Containment is boundary-inclusive: points lying on a face (up to a tolerance that
/// scales with the shape's size) are considered inside.
pub trait Shape: std::fmt::Debug + Send + Sync {
    /// Returns `true` if `point` lies inside or on the boundary of the shape.
    fn contains(&self, point: &Point) -> bool;

    /// Returns the axis-aligned box `(min, max)` that encloses the shape.
    fn bounding_box(&self) -> (Point, Point);
}

/// An axis-aligned cube given by its bottom-back-left corner and its edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    corner: Point,
    edge_length: f64,
}

impl Cube {
    pub fn new(edge_length: f64, corner: Point) -> Result<Self, GeometryError> {
        if !corner.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("cube corner"));
        }
        Ok(Self {
            corner,
            edge_length: require_positive("cube edge length", edge_length)?,
        })
    }

    /// Builds the cube of the given edge length centered on `center`.
    pub fn centered(edge_length: f64, center: Point) -> Result<Self, GeometryError> {
        let half = Vector3::repeat(edge_length * 0.5);
        Self::new(edge_length, center - half)
    }

    pub fn unit() -> Self {
        Self {
            corner: Point::origin(),
            edge_length: 1.0,
        }
    }

    pub fn corner(&self) -> &Point {
        &self.corner
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }
}

impl Shape for Cube {
    fn contains(&self, point: &Point) -> bool {
        let tol = BOUNDARY_TOLERANCE * self.edge_length;
        (0..3).all(|i| {
            let lo = self.corner[i];
            let hi = lo + self.edge_length;
            point[i] >= lo - tol && point[i] <= hi + tol
        })
    }

    fn bounding_box(&self) -> (Point, Point) {
        (
            self.corner,
            self.corner + Vector3::repeat(self.edge_length),
        )
    }
}

/// A cuboctahedron centered on `center`, with its square faces normal to the axes.
///
/// With `a = edge_length / sqrt(2)`, the twelve vertices are the permutations of
/// `(±a, ±a, 0)` around the center. This is the outline of a complete FCC coordination
/// shell when `edge_length` equals the interatomic distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboctahedron {
    center: Point,
    edge_length: f64,
}

impl Cuboctahedron {
    pub fn new(edge_length: f64, center: Point) -> Result<Self, GeometryError> {
        if !center.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("cuboctahedron center"));
        }
        Ok(Self {
            center,
            edge_length: require_positive("cuboctahedron edge length", edge_length)?,
        })
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Distance from the center to each square face.
    pub fn half_width(&self) -> f64 {
        self.edge_length / SQRT_2
    }

    pub fn vertices(&self) -> Vec<Point> {
        let a = self.half_width();
        let mut vertices = Vec::with_capacity(12);
        for &(s1, s2) in &[(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            vertices.push(self.center + Vector3::new(s1 * a, s2 * a, 0.0));
            vertices.push(self.center + Vector3::new(s1 * a, 0.0, s2 * a));
            vertices.push(self.center + Vector3::new(0.0, s1 * a, s2 * a));
        }
        vertices
    }
}

impl Shape for Cuboctahedron {
    fn contains(&self, point: &Point) -> bool {
        let a = self.half_width();
        let tol = BOUNDARY_TOLERANCE * self.edge_length;
        let d = (point - self.center).abs();
        d.iter().all(|&c| c <= a + tol) && d.sum() <= 2.0 * a + tol
    }

    fn bounding_box(&self) -> (Point, Point) {
        let a = Vector3::repeat(self.half_width());
        (self.center - a, self.center + a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    pub fn new(radius: f64, center: Point) -> Result<Self, GeometryError> {
        if !center.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("sphere center"));
        }
        Ok(Self {
            center,
            radius: require_positive("sphere radius", radius)?,
        })
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Sphere {
    fn contains(&self, point: &Point) -> bool {
        (point - self.center).norm() <= self.radius * (1.0 + BOUNDARY_TOLERANCE)
    }

    fn bounding_box(&self) -> (Point, Point) {
        let r = Vector3::repeat(self.radius);
        (self.center - r, self.center + r)
    }
}
