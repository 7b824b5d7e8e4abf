use super::error::LatticeError;
use crate::core::geometry::transform::RotateFunc;
use serde::{Deserialize, Deserializer};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};
use std::fmt;
use std::str::FromStr;

/// A low-index crystallographic alignment of a cubic lattice.
///
/// Each orientation names the plane family that is brought normal to the ambient Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// {100} planes normal to Z. This is the reference frame of the lattice.
    #[default]
    Fcc100,
    /// {110} planes normal to Z.
    Fcc110,
    /// {111} close-packed planes normal to Z.
    Fcc111 {
        /// Rotates the in-plane triangles so that a nearest-neighbor bond lies along X
        /// (otherwise one lies along Y).
        triangles_aligned_with_x: bool,
    },
}

impl Orientation {
    /// Returns the rotation that takes the reference lattice into this orientation.
    ///
    /// # Return
    ///
    /// `Ok(None)` for the reference orientation, `Ok(Some(rotation))` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::NotImplemented`] for {110}, whose alignment angles have not
    /// been derived.
    pub fn rotation(&self) -> Result<Option<RotateFunc>, LatticeError> {
        match self {
            Orientation::Fcc100 => Ok(None),
            Orientation::Fcc110 => Err(LatticeError::NotImplemented("alignment with FCC {110}")),
            Orientation::Fcc111 {
                triangles_aligned_with_x,
            } => {
                let theta_x = -FRAC_PI_4;
                let theta_y = -(-SQRT_2).atan2(2.0);
                let theta_z = if *triangles_aligned_with_x {
                    FRAC_PI_2
                } else {
                    0.0
                };
                Ok(Some(RotateFunc::from_xyz_angles(theta_x, theta_y, theta_z)))
            }
        }
    }

    pub fn miller_indices(&self) -> [u8; 3] {
        match self {
            Orientation::Fcc100 => [1, 0, 0],
            Orientation::Fcc110 => [1, 1, 0],
            Orientation::Fcc111 { .. } => [1, 1, 1],
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Fcc100 => write!(f, "100"),
            Orientation::Fcc110 => write!(f, "110"),
            Orientation::Fcc111 {
                triangles_aligned_with_x: true,
            } => write!(f, "111"),
            Orientation::Fcc111 {
                triangles_aligned_with_x: false,
            } => write!(f, "111-y"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    /// Parses `100`, `110`, `111` (triangles along X) or `111-y` (triangles along Y).
    /// Braces and an `fcc` prefix are accepted, e.g. `fcc{111}`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .trim_start_matches("fcc")
            .replace(['{', '}', '(', ')'], "");
        match normalized.as_str() {
            "100" => Ok(Orientation::Fcc100),
            "110" => Ok(Orientation::Fcc110),
            "111" | "111-x" => Ok(Orientation::Fcc111 {
                triangles_aligned_with_x: true,
            }),
            "111-y" => Ok(Orientation::Fcc111 {
                triangles_aligned_with_x: false,
            }),
            _ => Err(format!(
                "Unknown orientation '{}'. Expected one of: 100, 110, 111, 111-y.",
                s
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn reference_orientation_needs_no_rotation() {
        assert_eq!(Orientation::Fcc100.rotation(), Ok(None));
        assert_eq!(Orientation::default(), Orientation::Fcc100);
    }

    #[test]
    fn fcc110_alignment_is_reported_as_not_implemented() {
        assert!(matches!(
            Orientation::Fcc110.rotation(),
            Err(LatticeError::NotImplemented(_))
        ));
    }

    #[test]
    fn fcc111_rotation_brings_body_diagonal_onto_z() {
        for triangles_aligned_with_x in [true, false] {
            let rotation = Orientation::Fcc111 {
                triangles_aligned_with_x,
            }
            .rotation()
            .unwrap()
            .unwrap();
            let normal = rotation.rotation() * Vector3::new(1.0, 1.0, 1.0).normalize();
            assert!((normal - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn from_str_parses_valid_orientations() {
        assert_eq!("100".parse(), Ok(Orientation::Fcc100));
        assert_eq!("{110}".parse(), Ok(Orientation::Fcc110));
        assert_eq!(
            "FCC111".parse(),
            Ok(Orientation::Fcc111 {
                triangles_aligned_with_x: true
            })
        );
        assert_eq!(
            "111-y".parse(),
            Ok(Orientation::Fcc111 {
                triangles_aligned_with_x: false
            })
        );
    }

    #[test]
    fn from_str_returns_err_for_unknown_orientation() {
        assert!("211".parse::<Orientation>().is_err());
        assert!("".parse::<Orientation>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for orientation in [
            Orientation::Fcc100,
            Orientation::Fcc110,
            Orientation::Fcc111 {
                triangles_aligned_with_x: true,
            },
            Orientation::Fcc111 {
                triangles_aligned_with_x: false,
            },
        ] {
            assert_eq!(orientation.to_string().parse(), Ok(orientation));
        }
    }

    #[test]
    fn deserializes_from_orientation_name() {
        #[derive(Deserialize)]
        struct Holder {
            orientation: Orientation,
        }

        let holder: Holder = toml::from_str("orientation = \"fcc{111}\"").unwrap();
        assert_eq!(
            holder.orientation,
            Orientation::Fcc111 {
                triangles_aligned_with_x: true
            }
        );
        let err = toml::from_str::<Holder>("orientation = \"311\"").err().unwrap();
        assert!(err.to_string().contains("Unknown orientation '311'"));
    }

    #[test]
    fn miller_indices_name_the_plane_family() {
        assert_eq!(Orientation::Fcc100.miller_indices(), [1, 0, 0]);
        assert_eq!(Orientation::Fcc110.miller_indices(), [1, 1, 0]);
        assert_eq!(
            Orientation::Fcc111 {
                triangles_aligned_with_x: false
            }
            .miller_indices(),
            [1, 1, 1]
        );
    }
}
