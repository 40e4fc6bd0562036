//! Hashing utilities

/// DJB2 string hash
///
/// HERF archives key their resources and dictionary entries by the DJB2
/// hash of the (lower-case) file name.
pub fn hash_string_djb2(s: &str) -> u32 {
    let mut hash: u32 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u32::from(byte));
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_djb2_hash() {
        // Test known values
        assert_eq!(hash_string_djb2("test"), 2090756197);
        assert_eq!(hash_string_djb2(""), 5381);
        // The dictionary record's well-known hash
        assert_eq!(hash_string_djb2("erf.dict"), 0xEA82_8DD4);
    }
}
