//! Utility functions for minidfs

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Percent-encoding set for file ids (includes /, %, and control chars)
const FILE_ID_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b'/')
    .add(b'%')
    .add(b' ')
    .add(b'?')
    .add(b'#')
    .add(b'&');

/// Encode a file id for URL/filesystem usage
pub fn encode_file_id(file_id: &str) -> String {
    utf8_percent_encode(file_id, FILE_ID_ENCODE_SET).to_string()
}

/// Decode a percent-encoded file id
pub fn decode_file_id(encoded: &str) -> crate::Result<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| crate::Error::Other(format!("Failed to decode file id: {}", e)))
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Validate a file id (must be non-empty, reasonable length)
pub fn validate_file_id(file_id: &str) -> crate::Result<()> {
    if file_id.is_empty() {
        return Err(crate::Error::InvalidConfig("file id cannot be empty".into()));
    }

    if file_id.len() > 1024 {
        return Err(crate::Error::InvalidConfig(
            "file id too long (max 1024 bytes)".into(),
        ));
    }

    if file_id.chars().any(|c| c.is_control()) {
        return Err(crate::Error::InvalidConfig(
            "file id contains invalid characters".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_file_id() {
        let id = "my/path/to/file.bin";
        let encoded = encode_file_id(id);
        assert!(encoded.contains("%2F"));

        let decoded = decode_file_id(&encoded).unwrap();
        assert_eq!(decoded, id);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_validate_file_id() {
        assert!(validate_file_id("bench_1.bin").is_ok());
        assert!(validate_file_id("path/to/file").is_ok());
        assert!(validate_file_id("").is_err());
        assert!(validate_file_id(&"x".repeat(2000)).is_err());
    }
}
