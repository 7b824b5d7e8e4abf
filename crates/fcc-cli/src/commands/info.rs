use crate::cli::InfoArgs;
use crate::error::Result;
use fccnano::core::lattice::fcc::FccLattice;
use fccnano::core::lattice::orientation::Orientation;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Describing FCC lattice with IAD {}", args.iad);
    print!("{}", describe(args.iad, args.orientation)?);
    Ok(())
}

/// Summarizes the lattice constants of an FCC lattice with the given IAD.
///
/// The layer spacings do not depend on the orientation, so this succeeds even for
/// orientations the lattice cannot be aligned with yet.
pub fn describe(iad: f64, orientation: Orientation) -> Result<String> {
    let lattice = FccLattice::new(iad)?;
    let spacings = [
        (Orientation::Fcc100, lattice.fcc100_layer_spacing()),
        (Orientation::Fcc110, lattice.fcc110_layer_spacing()),
        (
            Orientation::Fcc111 {
                triangles_aligned_with_x: true,
            },
            lattice.fcc111_layer_spacing(),
        ),
    ];

    let mut out = format!(
        "Interatomic distance : {:.6}\nLattice constant     : {:.6}\n",
        lattice.iad(),
        lattice.lattice_constant()
    );
    for (family, spacing) in spacings {
        out.push_str(&spacing_line(family, spacing, orientation));
    }
    Ok(out)
}

fn spacing_line(family: Orientation, spacing: f64, requested: Orientation) -> String {
    let marker = if family.miller_indices() == requested.miller_indices() {
        " <"
    } else {
        ""
    };
    let [h, k, l] = family.miller_indices();
    format!("{{{}{}{}}} layer spacing  : {:.6}{}\n", h, k, l, spacing, marker)
}
