use super::Point;
use super::error::GeometryError;
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

/// Relative tolerance under which per-axis scale factors count as equal.
const ISOMETRY_TOLERANCE: f64 = 1e-12;

/// An affine map `p -> linear * p + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMap {
    pub linear: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Default for AffineMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMap {
    pub fn identity() -> Self {
        Self {
            linear: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    #[inline]
    pub fn apply(&self, point: &Point) -> Point {
        Point::from(self.linear * point.coords + self.translation)
    }

    /// Applies only the linear part, as appropriate for displacement vectors.
    #[inline]
    pub fn apply_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.linear * vector
    }

    /// Returns the map that applies `self` first and `next` afterwards.
    pub fn then(&self, next: &AffineMap) -> AffineMap {
        AffineMap {
            linear: next.linear * self.linear,
            translation: next.linear * self.translation + next.translation,
        }
    }

    /// Returns the inverse map, or `None` if the linear part is singular.
    pub fn inverse(&self) -> Option<AffineMap> {
        let linear = self.linear.try_inverse()?;
        Some(AffineMap {
            linear,
            translation: -(linear * self.translation),
        })
    }

    pub fn is_finite(&self) -> bool {
        self.linear.iter().all(|v| v.is_finite()) && self.translation.iter().all(|v| v.is_finite())
    }
}

/// Per-axis scaling about an origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFunc {
    factors: Vector3<f64>,
    origin: Point,
}

impl ScaleFunc {
    pub fn isometric(factor: f64) -> Result<Self, GeometryError> {
        Self::new(Vector3::repeat(factor))
    }

    pub fn new(factors: Vector3<f64>) -> Result<Self, GeometryError> {
        Self::about(factors, Point::origin())
    }

    pub fn about(factors: Vector3<f64>, origin: Point) -> Result<Self, GeometryError> {
        if factors.iter().any(|f| !f.is_finite() || *f == 0.0) {
            return Err(GeometryError::InvalidScale {
                factors: [factors.x, factors.y, factors.z],
            });
        }
        if !origin.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("scale origin"));
        }
        Ok(Self { factors, origin })
    }

    pub fn factors(&self) -> &Vector3<f64> {
        &self.factors
    }

    pub fn origin(&self) -> &Point {
        &self.origin
    }

    /// Returns `true` if all three factors are equal.
    pub fn is_isometric(&self) -> bool {
        let reference = self.factors.x;
        let tol = ISOMETRY_TOLERANCE * reference.abs();
        self.factors.iter().all(|f| (f - reference).abs() <= tol)
    }

    pub fn to_affine(&self) -> AffineMap {
        let linear = Matrix3::from_diagonal(&self.factors);
        AffineMap {
            linear,
            translation: self.origin.coords - linear * self.origin.coords,
        }
    }
}

/// A rotation about the ambient origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateFunc {
    rotation: Rotation3<f64>,
}

impl RotateFunc {
    pub fn new(rotation: Rotation3<f64>) -> Self {
        Self { rotation }
    }

    pub fn from_axis_angle(axis: &Vector3<f64>, angle_radians: f64) -> Result<Self, GeometryError> {
        let norm = axis.norm();
        if !norm.is_finite() || norm == 0.0 || !angle_radians.is_finite() {
            return Err(GeometryError::NonFinite("rotation axis or angle"));
        }
        Ok(Self {
            rotation: Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle_radians),
        })
    }

    /// Composes elementary turns about the fixed X, then Y, then Z axes.
    ///
    /// Each angle turns the coordinate frame, so points are carried by the negated
    /// angle. Under this convention `from_xyz_angles(-π/4, atan2(√2, 2), 0)` carries the
    /// `[111]` direction onto `+Z`.
    pub fn from_xyz_angles(theta_x: f64, theta_y: f64, theta_z: f64) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), -theta_x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), -theta_y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), -theta_z);
        Self {
            rotation: rz * ry * rx,
        }
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    pub fn to_affine(&self) -> AffineMap {
        AffineMap {
            linear: *self.rotation.matrix(),
            translation: Vector3::zeros(),
        }
    }
}

/// A mirror across the plane through `point` with normal `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectFunc {
    normal: Unit<Vector3<f64>>,
    point: Point,
}

impl ReflectFunc {
    pub fn new(normal: Vector3<f64>, point: Point) -> Result<Self, GeometryError> {
        let norm = normal.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(GeometryError::DegenerateNormal);
        }
        if !point.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("reflection plane point"));
        }
        Ok(Self {
            normal: Unit::new_normalize(normal),
            point,
        })
    }

    pub fn normal(&self) -> &Unit<Vector3<f64>> {
        &self.normal
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn to_affine(&self) -> AffineMap {
        let n = self.normal.into_inner();
        let linear = Matrix3::identity() - 2.0 * n * n.transpose();
        AffineMap {
            linear,
            translation: 2.0 * n.dot(&self.point.coords) * n,
        }
    }
}

/// A pure translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftFunc {
    offset: Vector3<f64>,
}

impl ShiftFunc {
    pub fn new(offset: Vector3<f64>) -> Result<Self, GeometryError> {
        if !offset.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite("shift offset"));
        }
        Ok(Self { offset })
    }

    pub fn offset(&self) -> &Vector3<f64> {
        &self.offset
    }

    pub fn to_affine(&self) -> AffineMap {
        AffineMap {
            linear: Matrix3::identity(),
            translation: self.offset,
        }
    }
}

/// A coordinate transform that can be applied to a lattice.
///
/// Transforms are not commutative in general; lattices apply them in the order given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformFunc {
    Scale(ScaleFunc),
    Rotate(RotateFunc),
    Reflect(ReflectFunc),
    Shift(ShiftFunc),
}

impl TransformFunc {
    pub fn to_affine(&self) -> AffineMap {
        match self {
            TransformFunc::Scale(f) => f.to_affine(),
            TransformFunc::Rotate(f) => f.to_affine(),
            TransformFunc::Reflect(f) => f.to_affine(),
            TransformFunc::Shift(f) => f.to_affine(),
        }
    }

    pub fn apply(&self, point: &Point) -> Point {
        self.to_affine().apply(point)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformFunc::Scale(_) => "scale",
            TransformFunc::Rotate(_) => "rotate",
            TransformFunc::Reflect(_) => "reflect",
            TransformFunc::Shift(_) => "shift",
        }
    }
}

impl From<ScaleFunc> for TransformFunc {
    fn from(f: ScaleFunc) -> Self {
        TransformFunc::Scale(f)
    }
}

impl From<RotateFunc> for TransformFunc {
    fn from(f: RotateFunc) -> Self {
        TransformFunc::Rotate(f)
    }
}

impl From<ReflectFunc> for TransformFunc {
    fn from(f: ReflectFunc) -> Self {
        TransformFunc::Reflect(f)
    }
}

impl From<ShiftFunc> for TransformFunc {
    fn from(f: ShiftFunc) -> Self {
        TransformFunc::Shift(f)
    }
}
