//! Plain-text report of a run's submatrices
//!
//! Six lines, three per submatrix, each holding one matrix row as
//! tab-separated `<label>_<i><j> = <value>` entries with five decimals:
//!
//! ```text
//! K_11 = 18.84956	K_12 = 0.00000	K_13 = 0.00000
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use nalgebra::Matrix3;

use crate::error::{ResistanceError, Result};
use crate::motion::MotionKind;
use crate::resistance::Submatrices;

/// Submatrices of one run together with the kind of motion they belong to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceReport {
    pub kind: MotionKind,
    pub submatrices: Submatrices,
}

impl ResistanceReport {
    pub fn new(kind: MotionKind, submatrices: Submatrices) -> Self {
        Self { kind, submatrices }
    }

    /// Write the report, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        fs::read_to_string(path)?.parse()
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, label: &str, m: &Matrix3<f64>) -> fmt::Result {
    for i in 0..3 {
        for j in 0..3 {
            if j > 0 {
                f.write_str("\t")?;
            }
            write!(f, "{}_{}{} = {:.5}", label, i + 1, j + 1, m[(i, j)])?;
        }
        f.write_str("\n")?;
    }
    Ok(())
}

impl fmt::Display for ResistanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = self.kind.labels();
        write_block(f, first, &self.submatrices.force)?;
        write_block(f, second, &self.submatrices.torque)
    }
}

/// Parse one `<label>_<i><j> = <value>` entry
fn parse_entry(line: usize, entry: &str) -> Result<(String, usize, usize, f64)> {
    let (name, value) = entry
        .split_once(" = ")
        .ok_or_else(|| ResistanceError::malformed_report(line, format!("missing ' = ' in '{}'", entry)))?;
    let (label, index) = name
        .rsplit_once('_')
        .ok_or_else(|| ResistanceError::malformed_report(line, format!("missing index in '{}'", name)))?;

    let digits: Vec<usize> = index
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as usize))
        .collect();
    if digits.len() != 2 || index.len() != 2 || !digits.iter().all(|d| (1..=3).contains(d)) {
        return Err(ResistanceError::malformed_report(
            line,
            format!("index '{}' is not a 1-based row and column", index),
        ));
    }

    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| ResistanceError::malformed_report(line, format!("value '{}': {}", value, e)))?;

    Ok((label.to_string(), digits[0] - 1, digits[1] - 1, value))
}

fn kind_from_label(line: usize, label: &str) -> Result<MotionKind> {
    [MotionKind::Rotational, MotionKind::Translational]
        .into_iter()
        .find(|kind| kind.labels().0 == label)
        .ok_or_else(|| ResistanceError::malformed_report(line, format!("unknown submatrix label '{}'", label)))
}

impl FromStr for ResistanceReport {
    type Err = ResistanceError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.lines().collect();
        if lines.len() != 6 {
            return Err(ResistanceError::malformed_report(
                lines.len(),
                format!("expected 6 lines, found {}", lines.len()),
            ));
        }

        let mut detected = None;
        let mut blocks = [Matrix3::zeros(); 2];

        for (n, text) in lines.iter().enumerate() {
            let line = n + 1;
            let (block, row) = (n / 3, n % 3);
            let entries: Vec<&str> = text.split('\t').collect();
            if entries.len() != 3 {
                return Err(ResistanceError::malformed_report(
                    line,
                    format!("expected 3 entries, found {}", entries.len()),
                ));
            }

            for (col, entry) in entries.iter().enumerate() {
                let (label, i, j, value) = parse_entry(line, entry)?;
                let kind = match detected {
                    Some(kind) => kind,
                    None => *detected.insert(kind_from_label(line, &label)?),
                };

                let expected = if block == 0 { kind.labels().0 } else { kind.labels().1 };
                if label != expected {
                    return Err(ResistanceError::malformed_report(
                        line,
                        format!("expected label '{}', found '{}'", expected, label),
                    ));
                }
                if (i, j) != (row, col) {
                    return Err(ResistanceError::malformed_report(
                        line,
                        format!("entry {}{} out of order", i + 1, j + 1),
                    ));
                }
                blocks[block][(i, j)] = value;
            }
        }

        // Six lines always set the kind on the first entry
        let kind = detected.ok_or_else(|| ResistanceError::malformed_report(1, "empty report"))?;
        Ok(Self::new(
            kind,
            Submatrices {
                force: blocks[0],
                torque: blocks[1],
            },
        ))
    }
}
