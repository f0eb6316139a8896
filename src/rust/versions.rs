//! Versions of the inference libraries compiled into this build.
//!
//! Both crates are pinned with `=` in `Cargo.toml`; keep these in step.

use std::io::{self, Write};

/// `ort` crate release driving ONNX Runtime.
pub const ORT_VERSION: &str = "2.0.0-rc.9";

/// `image` crate release used for decoding and resizing.
pub const IMAGE_VERSION: &str = "0.25.5";

/// Writes the two library version lines shown before any processing.
pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "ONNX Runtime (ort): {}", ORT_VERSION)?;
    writeln!(out, "image: {}", IMAGE_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));

    fn pinned(name: &str) -> Option<&'static str> {
        MANIFEST
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix(name)?.trim_start().strip_prefix('=')?.trim().strip_prefix("\"="))
            .and_then(|rest| rest.strip_suffix('"'))
    }

    #[test]
    fn test_banner_has_two_lines() {
        let mut out = Vec::new();
        write_banner(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec![
            format!("ONNX Runtime (ort): {}", ORT_VERSION),
            format!("image: {}", IMAGE_VERSION),
        ]);
    }

    #[test]
    fn test_versions_match_manifest_pins() {
        assert_eq!(pinned("ort"), Some(ORT_VERSION), "ort must be pinned as \"={}\"", ORT_VERSION);
        assert_eq!(pinned("image"), Some(IMAGE_VERSION), "image must be pinned as \"={}\"", IMAGE_VERSION);
    }
}
