//! # Shared Utility Functions
//!
//! ## Address Formatting
//!
//! Functions for formatting Aleo account addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`display_address`] - First 6 and last 4 characters once an address exceeds 10
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::display_address;
//!
//! let address = "aleo1qnr4dkkvkgfqph0vzc3y6z2eu975wnpz2925ntjccd5cfqxtyu8s7pyjh9";
//! assert_eq!(display_address(address), "aleo1q...yjh9");
//! ```

/// Addresses longer than this are shortened by [`display_address`].
pub const DISPLAY_THRESHOLD: usize = 10;

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is no longer than `prefix_len + suffix_len`, it is returned as-is.
/// Lengths are counted in characters, so non-ASCII input never splits a code point.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "aleo1qnr4dkkvkgfqph0vzc3y6z2eu975wnpz2925ntjccd5cfqxtyu8s7pyjh9";
/// assert_eq!(format_address(addr, 4, 4), "aleo...yjh9");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let char_count = address.chars().count();
    if char_count <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix: String = address.chars().take(prefix_len).collect();
    let suffix: String = address.chars().skip(char_count - suffix_len).collect();
    format!("{}...{}", prefix, suffix)
}

/// Short account form for status displays.
///
/// Addresses of up to [`DISPLAY_THRESHOLD`] characters are shown in full.
pub fn display_address(address: &str) -> String {
    if address.chars().count() > DISPLAY_THRESHOLD {
        format_address(address, 6, 4)
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "aleo1qnr4dkkvkgfqph0vzc3y6z2eu975wnpz2925ntjccd5cfqxtyu8s7pyjh9";
        assert_eq!(format_address(addr, 4, 4), "aleo...yjh9");
        assert_eq!(format_address(addr, 2, 2), "al...h9");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_display_address_threshold() {
        assert_eq!(display_address("aleo1abcde"), "aleo1abcde");
        assert_eq!(display_address("aleo1abcdef"), "aleo1a...cdef");
        assert_eq!(display_address(""), "");
    }

    #[test]
    fn test_display_address_non_ascii() {
        assert_eq!(display_address("ééééééééééxyz"), "éééééé...éxyz");
    }
}
