use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::geometry::Point;
use crate::core::geometry::shapes::Shape;
use crate::core::lattice::fcc::{FccLattice, doubled_reference_key};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Upper bound on the number of unit cells scanned for one canvas.
pub const MAX_CELLS: u128 = 50_000_000;

type SiteKey = [i64; 3];

/// The lattice sites that fall inside a bounding shape, with their nearest-neighbor graph.
///
/// Sites are ordered by their integer lattice key, so two canvases built from the same
/// lattice and shape list the same sites in the same order.
#[derive(Debug, Clone)]
pub struct Canvas {
    lattice: FccLattice,
    positions: Vec<Point>,
    keys: Vec<SiteKey>,
    neighbors: Vec<Vec<usize>>,
    index: HashMap<SiteKey, usize>,
}

impl Canvas {
    #[instrument(skip_all, name = "canvas_from_shape")]
    pub fn from_shape(
        lattice: &FccLattice,
        shape: &dyn Shape,
        reporter: &ProgressReporter,
    ) -> Result<Self, EngineError> {
        let (lo, hi, cells) = reference_cell_range(lattice, shape)?;
        info!(cells = cells as u64, "Scanning unit cells for sites inside shape.");

        let mut sites = reporter.phase("Enumerating lattice sites", || {
            reporter.report(Progress::TaskStart {
                total_steps: cells as u64,
            });
            let sites = collect_sites(lattice, shape, lo, hi, reporter);
            reporter.report(Progress::TaskFinish);
            Ok::<_, EngineError>(sites)
        })?;
        sites.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        sites.dedup_by(|a, b| a.0 == b.0);

        let (keys, positions): (Vec<SiteKey>, Vec<Point>) = sites.into_iter().unzip();
        let index: HashMap<SiteKey, usize> =
            keys.iter().enumerate().map(|(i, key)| (*key, i)).collect();

        let neighbors = reporter.phase("Linking nearest neighbors", || {
            let neighbors = link_neighbors(lattice, &positions, &index);
            if neighbors.len() != positions.len() {
                return Err(EngineError::Internal(format!(
                    "neighbor table has {} rows for {} sites",
                    neighbors.len(),
                    positions.len()
                )));
            }
            Ok(neighbors)
        })?;

        info!(sites = positions.len(), "Canvas constructed.");
        Ok(Self {
            lattice: lattice.clone(),
            positions,
            keys,
            neighbors,
            index,
        })
    }

    pub fn lattice(&self) -> &FccLattice {
        &self.lattice
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn position(&self, i: usize) -> Option<&Point> {
        self.positions.get(i)
    }

    /// Indices of the canvas sites adjacent to site `i`. Empty if `i` is out of range.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        self.neighbors.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn index_of(&self, point: &Point) -> Option<usize> {
        let key = self.lattice.site_key(point)?;
        self.index.get(&key).copied()
    }

    pub fn coordination_numbers(&self) -> Vec<usize> {
        self.neighbors.iter().map(Vec::len).collect()
    }

    /// Number of neighbor pairs, each counted once.
    pub fn num_bonds(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn keys(&self) -> &[SiteKey] {
        &self.keys
    }
}

/// Inclusive range of reference-frame cell indices whose cells can intersect `shape`,
/// together with the number of cells it spans.
///
/// The range is sized in `f64` and checked against [`MAX_CELLS`] before any integer
/// conversion, so arbitrarily large shapes are rejected instead of overflowing.
fn reference_cell_range(
    lattice: &FccLattice,
    shape: &dyn Shape,
) -> Result<(SiteKey, SiteKey, u128), EngineError> {
    let (min, max) = shape.bounding_box();
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for corner in 0..8 {
        let ambient = Point::new(
            if corner & 1 == 0 { min.x } else { max.x },
            if corner & 2 == 0 { min.y } else { max.y },
            if corner & 4 == 0 { min.z } else { max.z },
        );
        let reference = lattice.to_reference(&ambient);
        for i in 0..3 {
            lo[i] = lo[i].min(reference[i].floor() - 1.0);
            hi[i] = hi[i].max(reference[i].floor() + 1.0);
        }
    }

    let extent = [0, 1, 2].map(|i| hi[i] - lo[i] + 1.0);
    let estimate = extent.iter().product::<f64>();
    if !estimate.is_finite() || estimate > MAX_CELLS as f64 {
        let cells = if estimate.is_finite() {
            estimate as u128
        } else {
            u128::MAX
        };
        return Err(EngineError::CanvasTooLarge {
            cells,
            limit: MAX_CELLS,
        });
    }

    let lo = lo.map(|v| v as i64);
    let hi = hi.map(|v| v as i64);
    let cells = (0..3).map(|i| (hi[i] - lo[i] + 1) as u128).product();
    debug!(?lo, ?hi, "Reference cell range for shape.");
    Ok((lo, hi, cells))
}

fn sites_in_slab(
    lattice: &FccLattice,
    shape: &dyn Shape,
    ix: i64,
    lo: SiteKey,
    hi: SiteKey,
) -> Vec<(SiteKey, Point)> {
    let cells = lattice.unit_cell_lattice();
    let basis = cells.reference_cell().fractional_positions();
    let mut found = Vec::new();
    for iy in lo[1]..=hi[1] {
        for iz in lo[2]..=hi[2] {
            let origin = cells.reference_cell().tiling().cell_origin([ix, iy, iz]);
            for fractional in basis {
                let reference = origin + fractional;
                let ambient = lattice.from_reference(&reference);
                if shape.contains(&ambient) {
                    found.push((doubled_reference_key(&reference), ambient));
                }
            }
        }
    }
    found
}

fn collect_sites(
    lattice: &FccLattice,
    shape: &dyn Shape,
    lo: SiteKey,
    hi: SiteKey,
    reporter: &ProgressReporter,
) -> Vec<(SiteKey, Point)> {
    let slab_cells = ((hi[1] - lo[1] + 1) * (hi[2] - lo[2] + 1)) as u64;
    let scan = |ix: i64| {
        let found = sites_in_slab(lattice, shape, ix, lo, hi);
        reporter.advance(slab_cells);
        found
    };

    #[cfg(not(feature = "parallel"))]
    let sites = (lo[0]..=hi[0]).flat_map(scan).collect();

    #[cfg(feature = "parallel")]
    let sites = (lo[0]..=hi[0]).into_par_iter().flat_map_iter(scan).collect();

    sites
}

fn link_neighbors(
    lattice: &FccLattice,
    positions: &[Point],
    index: &HashMap<SiteKey, usize>,
) -> Vec<Vec<usize>> {
    let link = |p: &Point| {
        lattice
            .get_neighbors(p)
            .iter()
            .filter_map(|n| lattice.site_key(n))
            .filter_map(|key| index.get(&key).copied())
            .collect::<Vec<usize>>()
    };

    #[cfg(not(feature = "parallel"))]
    let neighbors = positions.iter().map(link).collect();

    #[cfg(feature = "parallel")]
    let neighbors = positions.par_iter().map(link).collect();

    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::shapes::{Cube, Cuboctahedron, Sphere};
    use crate::core::lattice::fcc::COORDINATION_NUMBER;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn first_shell_cuboctahedron_holds_center_and_twelve_neighbors() {
        let lattice = FccLattice::new(2.5).unwrap();
        let shape = Cuboctahedron::new(lattice.iad(), Point::origin()).unwrap();
        let canvas = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();

        assert_eq!(canvas.len(), 13);
        let center = canvas.index_of(&Point::origin()).unwrap();
        assert_eq!(canvas.neighbors(center).len(), COORDINATION_NUMBER);

        let mut coordination = canvas.coordination_numbers();
        coordination.sort_unstable();
        assert_eq!(&coordination[..12], &[5; 12]);
        assert_eq!(coordination[12], 12);
        assert_eq!(canvas.num_bonds(), (12 + 12 * 5) / 2);
    }

    #[test]
    fn conventional_cube_holds_fourteen_sites() {
        let lattice = FccLattice::new(1.0).unwrap();
        let shape = Cube::new(lattice.lattice_constant(), Point::origin()).unwrap();
        let canvas = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();

        assert_eq!(canvas.len(), 14);
        assert!(canvas.positions().iter().all(|p| lattice.is_on_lattice(p)));
        assert!(canvas.positions().iter().all(|p| shape.contains(p)));
    }

    #[test]
    fn neighbor_graph_is_symmetric_and_at_iad() {
        let lattice = FccLattice::aligned_with_111(1.0, true).unwrap();
        let shape = Sphere::new(2.2, Point::origin()).unwrap();
        let canvas = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();

        assert!(!canvas.is_empty());
        for i in 0..canvas.len() {
            let p = canvas.position(i).unwrap();
            for &j in canvas.neighbors(i) {
                assert!(canvas.neighbors(j).contains(&i));
                let q = canvas.position(j).unwrap();
                assert!(((q - p).norm() - lattice.iad()).abs() < 1e-9);
                assert!(lattice.are_neighbors(p, q));
            }
        }
    }

    #[test]
    fn rotated_sphere_canvas_keeps_first_shell_count() {
        let lattice = FccLattice::aligned_with_111(3.0, false).unwrap();
        let shape = Sphere::new(3.0 * 1.01, Point::origin()).unwrap();
        let canvas = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();
        assert_eq!(canvas.len(), 13);
    }

    #[test]
    fn site_order_is_deterministic() {
        let lattice = FccLattice::new(1.0).unwrap();
        let shape = Sphere::new(3.0, Point::new(0.3, 0.1, -0.2)).unwrap();
        let first = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();
        let second = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();
        assert_eq!(first.keys(), second.keys());
        assert!(first.keys().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn shape_away_from_sites_yields_empty_canvas() {
        let lattice = FccLattice::new(1.0).unwrap();
        let a = lattice.lattice_constant();
        let shape = Sphere::new(0.1, Point::new(0.5 * a, 0.0, 0.0)).unwrap();
        let canvas = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();
        assert!(canvas.is_empty());
        assert!(canvas.neighbors(0).is_empty());
    }

    #[test]
    fn oversized_shape_is_rejected() {
        let lattice = FccLattice::new(1e-3).unwrap();
        let shape = Cube::centered(100.0, Point::origin()).unwrap();
        let result = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::CanvasTooLarge { .. })));
    }

    #[test]
    fn astronomically_large_spheres_are_rejected_before_scanning() {
        let lattice = FccLattice::new(1.0).unwrap();
        for radius in [1e14, 1e30] {
            let shape = Sphere::new(radius, Point::origin()).unwrap();
            let result = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new());
            match result {
                Err(EngineError::CanvasTooLarge { cells, limit }) => {
                    assert_eq!(limit, MAX_CELLS);
                    assert!(cells > MAX_CELLS, "radius {radius} reported {cells} cells");
                }
                other => panic!("radius {radius}: expected CanvasTooLarge, got {other:?}"),
            }
        }
    }

    #[test]
    fn canvas_keys_agree_with_lattice_site_keys() {
        let lattice = FccLattice::aligned_with_111(1.3, false).unwrap();
        let shape = Cuboctahedron::new(4.0, Point::new(0.2, -0.1, 0.3)).unwrap();
        let canvas = Canvas::from_shape(&lattice, &shape, &ProgressReporter::new()).unwrap();

        assert!(!canvas.is_empty());
        for (key, position) in canvas.keys().iter().zip(canvas.positions()) {
            assert_eq!(lattice.site_key(position), Some(*key));
        }
    }

    #[test]
    fn progress_covers_every_scanned_cell() {
        let advanced = AtomicU64::new(0);
        let total = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskStart { total_steps } if total.load(Ordering::SeqCst) == 0 => {
                total.store(total_steps, Ordering::SeqCst)
            }
            Progress::TaskAdvance { steps } => {
                advanced.fetch_add(steps, Ordering::SeqCst);
            }
            _ => {}
        }));
        let lattice = FccLattice::new(1.0).unwrap();
        let shape = Cube::centered(3.0, Point::origin()).unwrap();
        Canvas::from_shape(&lattice, &shape, &reporter).unwrap();
        drop(reporter);

        assert!(total.load(Ordering::SeqCst) > 0);
        assert_eq!(advanced.load(Ordering::SeqCst), total.load(Ordering::SeqCst));
    }
}
