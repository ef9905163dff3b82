//! Read and write two-column delimited text spectra.
use std::fs;
use std::io;
use std::io::prelude::*;
use std::path;

use log::warn;
use thiserror::Error;

use crate::arrayops::ArrayPair;

/// All the ways reading a text spectrum can fail
#[derive(Debug, Error)]
pub enum TextError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no parseable rows found in {0}")]
    NoData(path::PathBuf),
}

fn parse_two_columns(fields: &[&str]) -> Option<(f64, f64)> {
    let x = fields.first()?.parse::<f64>().ok()?;
    let y = fields.get(1)?.parse::<f64>().ok()?;
    Some((x, y))
}

/// Load a whitespace- or tab-delimited two column file into an [`ArrayPair`].
///
/// Lines that do not parse as a pair of numbers are skipped with a warning.
pub fn load_xy<P: AsRef<path::Path>>(path: P) -> Result<ArrayPair<'static>, TextError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TextError::Io {
        path: path.into(),
        source,
    })?;
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        match parse_two_columns(&fields) {
            Some((x, y)) => {
                xs.push(x);
                ys.push(y);
            }
            None => warn!("skipping unparseable line: {line:?}"),
        }
    }
    if xs.is_empty() {
        return Err(TextError::NoData(path.into()));
    }
    Ok((xs, ys).into())
}

/// Load a delimited two column file into an [`ArrayPair`] using `sep` as the
/// field separator.
///
/// When `sep` is `','` some instrument exports use the comma both as the field
/// separator and as the decimal mark, producing four fields per line,
/// `x_int,x_frac,y_int,y_frac`. Such lines are reassembled into `x_int.x_frac`
/// and `y_int` with `y_frac` appended verbatim before parsing. Two-field lines
/// parse directly regardless of separator. Anything else is skipped with a
/// warning.
pub fn load_ms<P: AsRef<path::Path>>(path: P, sep: char) -> Result<ArrayPair<'static>, TextError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TextError::Io {
        path: path.into(),
        source,
    })?;
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(sep).collect();
        let point = if sep == ',' && fields.len() == 4 {
            let x = format!("{}.{}", fields[0], fields[1]);
            let y = format!("{}{}", fields[2], fields[3]);
            match (x.parse::<f64>(), y.parse::<f64>()) {
                (Ok(x), Ok(y)) => Some((x, y)),
                _ => None,
            }
        } else {
            parse_two_columns(&fields)
        };
        match point {
            Some((x, y)) => {
                xs.push(x);
                ys.push(y);
            }
            None => warn!("skipping unparseable line: {line:?}"),
        }
    }
    if xs.is_empty() {
        return Err(TextError::NoData(path.into()));
    }
    Ok((xs, ys).into())
}

/// Write `arrays` to `path` as tab-delimited text
pub fn to_file<P: AsRef<path::Path>>(arrays: &ArrayPair<'_>, path: P) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    for (x, y) in arrays.iter() {
        writer.write_all(format!("{}\t{}\n", x, y).as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::env;
    use test_log::test;

    fn scratch_file(name: &str, content: &str) -> path::PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_xy_tabs_and_spaces() {
        let path = scratch_file(
            "mscurve_load_xy.txt",
            "100.0\t5.0\n101.0  6.5\n# not a number\n102.0 7.0\n",
        );
        let pair = load_xy(&path).unwrap();
        assert_eq!(pair.len(), 3);
        assert_eq!(pair.get(1), Some((101.0, 6.5)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_xy_no_data() {
        let path = scratch_file("mscurve_load_xy_empty.txt", "a b\nc d\n");
        assert!(matches!(load_xy(&path), Err(TextError::NoData(_))));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_xy_missing_file() {
        let err = load_xy("/definitely/not/a/file.txt").unwrap_err();
        assert!(matches!(err, TextError::Io { .. }));
    }

    #[test]
    fn test_load_ms_decimal_comma() {
        // 100,5,230,0 means x = 100.5, y = 2300
        let path = scratch_file("mscurve_load_ms_comma.txt", "100,5,230,0\n101,25,41,5\n");
        let pair = load_ms(&path, ',').unwrap();
        assert_eq!(pair.get(0), Some((100.5, 2300.0)));
        assert_eq!(pair.get(1), Some((101.25, 415.0)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_ms_tab() {
        let path = scratch_file("mscurve_load_ms_tab.txt", "100.0\t5.0\nbad\tline\n101.0\t6.0\n");
        let pair = load_ms(&path, '\t').unwrap();
        assert_eq!(pair.len(), 2);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_round_trip() {
        let pair: ArrayPair = (vec![1.0, 2.0], vec![10.0, 20.0]).into();
        let path = env::temp_dir().join("mscurve_round_trip.txt");
        to_file(&pair, &path).unwrap();
        let restored = load_xy(&path).unwrap();
        assert_eq!(pair, restored);
        fs::remove_file(path).ok();
    }
}
