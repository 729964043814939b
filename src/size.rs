//! Human-readable byte sizes.
//!
//! Formatting uses binary (IEC) units to match the sizes users see in
//! file managers; parsing accepts both SI and IEC suffixes.
//! The `-m` flag counts bare numbers as KiB ([`parse_min_size`]).

use bytesize::ByteSize;

/// Format a byte count with binary units (e.g. `1.5 KiB`, `10 B`).
///
/// # Example
///
/// ```
/// use dupscan::size::format_size;
///
/// assert_eq!(format_size(10), "10 B");
/// assert_eq!(format_size(1024 * 1024), "1.0 MiB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    ByteSize(bytes).display().iec().to_string()
}

/// Parse a human-readable size string into bytes.
///
/// Accepts the SI and IEC suffixes `bytesize` understands (`B`, `K`/`KB`,
/// `KiB`, `MB`, `MiB`, ...), case-insensitive. A bare number is bytes.
///
/// # Examples
///
/// ```
/// use dupscan::size::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("4KiB").unwrap(), 4096);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, negative, not a number, or
/// carries an unknown unit.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }
    if s.starts_with('-') {
        return Err("Size cannot be negative".to_string());
    }
    s.parse::<ByteSize>().map(|size| size.as_u64())
}

/// Parse the `-m` flag: a bare number counts KiB, anything with a unit is
/// parsed by [`parse_size`].
///
/// ```
/// use dupscan::size::parse_min_size;
///
/// assert_eq!(parse_min_size("4").unwrap(), 4096);
/// assert_eq!(parse_min_size("100B").unwrap(), 100);
/// ```
///
/// # Errors
///
/// Same as [`parse_size`], plus overflow of the KiB multiplication.
pub fn parse_min_size(s: &str) -> Result<u64, String> {
    let trimmed = s.trim();
    match trimmed.parse::<u64>() {
        Ok(kib) => kib
            .checked_mul(1024)
            .ok_or_else(|| format!("Size too large: '{trimmed}' KiB")),
        Err(_) => parse_size(trimmed),
    }
}
