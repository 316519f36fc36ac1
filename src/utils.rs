//! Utility functions.

use crate::Result;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::io::{BufRead, BufReader, Read};

use flate2::read::MultiGzDecoder;

//-----------------------------------------------------------------------------

/// Returns the full file name for a specific test file.
pub fn get_test_data(filename: &'static str) -> PathBuf {
    let mut buf = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    buf.push("test-data");
    buf.push(filename);
    buf
}

//-----------------------------------------------------------------------------

// Utilities for working with files.

const SIZE_UNITS: [(f64, &str); 6] = [
    (1.0, "B"),
    (1024.0, "KiB"),
    (1024.0 * 1024.0, "MiB"),
    (1024.0 * 1024.0 * 1024.0, "GiB"),
    (1024.0 * 1024.0 * 1024.0 * 1024.0, "TiB"),
    (1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0, "PiB"),
];

/// Returns a human-readable representation of the given number of bytes.
pub fn human_readable_size(bytes: usize) -> String {
    let mut unit = 0;
    let value = bytes as f64;
    while unit + 1 < SIZE_UNITS.len() && value >= SIZE_UNITS[unit + 1].0 {
        unit += 1;
    }
    format!("{:.3} {}", value / SIZE_UNITS[unit].0, SIZE_UNITS[unit].1)
}

/// Returns a human-readable size of the file, or [`None`] if the file cannot be accessed.
pub fn file_size<P: AsRef<Path>>(filename: P) -> Option<String> {
    let metadata = fs::metadata(filename).ok()?;
    Some(human_readable_size(metadata.len() as usize))
}

/// Returns `true` if the file exists.
pub fn file_exists<P: AsRef<Path>>(filename: P) -> bool {
    fs::metadata(filename).is_ok()
}

/// Returns `true` if the file appears to be gzip-compressed.
pub fn is_gzipped<P: AsRef<Path>>(filename: P) -> bool {
    let file = match File::open(filename) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut reader = BufReader::new(file);
    let mut magic = [0; 2];
    let len = reader.read(&mut magic).ok();
    len == Some(2) && magic == [0x1F, 0x8B]
}

/// Returns a buffered reader for the file, which may be gzip-compressed.
pub fn open_file<P: AsRef<Path>>(filename: P) -> Result<Box<dyn BufRead>> {
    let file = File::open(&filename)?;
    let inner = BufReader::new(file);
    if is_gzipped(&filename) {
        let inner = MultiGzDecoder::new(inner);
        Ok(Box::new(BufReader::new(inner)))
    } else {
        Ok(Box::new(inner))
    }
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_units() {
        assert_eq!(human_readable_size(0), "0.000 B", "Wrong size for zero bytes");
        assert_eq!(human_readable_size(1536), "1.500 KiB", "Wrong size in kibibytes");
        assert_eq!(human_readable_size(3 * 1024 * 1024), "3.000 MiB", "Wrong size in mebibytes");
    }

    #[test]
    fn plain_and_compressed_files() {
        let plain = get_test_data("animals.tsv");
        let compressed = get_test_data("animals.tsv.gz");
        assert!(file_exists(&plain) && file_exists(&compressed), "Missing test data");
        assert!(!file_exists(get_test_data("no-such-file.tsv")), "Missing file exists");
        assert!(!is_gzipped(&plain), "Plain file reported as gzipped");
        assert!(is_gzipped(&compressed), "Compressed file not reported as gzipped");
        assert!(file_size(&plain).is_some(), "No size for an existing file");

        let mut expected = String::new();
        open_file(&plain).unwrap().read_to_string(&mut expected).unwrap();
        let mut decompressed = String::new();
        open_file(&compressed).unwrap().read_to_string(&mut decompressed).unwrap();
        assert_eq!(decompressed, expected, "Wrong contents after decompression");
        assert!(open_file(get_test_data("no-such-file.tsv")).is_err(), "Opened a missing file");
    }
}

//-----------------------------------------------------------------------------
