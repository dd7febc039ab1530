//! Some utility functions

use sha2::{Digest, Sha512};

/// Lowercase hex encoding of the SHA-512 digest of `data`
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(Sha512::digest(data))
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sha512_hex() {
        // Well-known digest of the empty string
        assert_eq!(
            sha512_hex(b""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }
}
