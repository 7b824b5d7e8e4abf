use crate::core::geometry::Point;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writer for the XYZ format: an atom count, a comment line, then one
/// `Element x y z` record per atom.
pub struct XyzFile;

impl XyzFile {
    /// Writes `positions` as atoms of a single element.
    ///
    /// # Errors
    ///
    /// Returns an error if the comment spans several lines, since that would corrupt the
    /// record layout, or if writing fails.
    pub fn write_to(
        positions: &[Point],
        element: &str,
        comment: &str,
        writer: &mut impl Write,
    ) -> io::Result<()> {
        if comment.contains(['\n', '\r']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "XYZ comment line must not contain line breaks",
            ));
        }
        writeln!(writer, "{}", positions.len())?;
        writeln!(writer, "{}", comment)?;
        for p in positions {
            writeln!(writer, "{:<2} {:>14.6} {:>14.6} {:>14.6}", element, p.x, p.y, p.z)?;
        }
        Ok(())
    }

    pub fn write_to_path(
        positions: &[Point],
        element: &str,
        comment: &str,
        path: &Path,
    ) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(positions, element, comment, &mut writer)?;
        writer.flush()
    }
}
