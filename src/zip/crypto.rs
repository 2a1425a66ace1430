//! Traditional PKWARE ("ZipCrypto") stream cipher.
//!
//! The cipher keeps three 32-bit keys derived from the password. Every
//! plaintext byte that passes through the stream mutates the keys, so
//! decryption must process bytes strictly in order. An encrypted entry
//! is preceded by a 12-byte header whose last byte acts as a quick
//! password check (see `ZipFileEntry::password_check_byte`).
//!
//! The key schedule uses the standard CRC-32 polynomial (0xEDB88320),
//! byte-at-a-time with an explicit running value, which is why the
//! lookup table lives here rather than going through `flate2::Crc`.

/// CRC-32 lookup table for the IEEE polynomial, built at compile time.
const CRC32_TABLE: [u32; 256] = build_crc32_table();

const fn build_crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[inline]
fn crc32_byte(crc: u32, byte: u8) -> u32 {
    CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
}

/// ZipCrypto key state.
///
/// `ZipCryptoKeys::derive` initializes the state from a password; the
/// caller then feeds ciphertext through [`decrypt_byte`](Self::decrypt_byte)
/// (or plaintext through [`encrypt_byte`](Self::encrypt_byte)) in stream
/// order.
#[derive(Debug, Clone)]
pub struct ZipCryptoKeys {
    key0: u32,
    key1: u32,
    key2: u32,
}

impl ZipCryptoKeys {
    /// Initialize the key state from a password.
    pub fn derive(password: &[u8]) -> Self {
        let mut keys = Self {
            key0: 0x1234_5678,
            key1: 0x2345_6789,
            key2: 0x3456_7890,
        };
        for &b in password {
            keys.update(b);
        }
        keys
    }

    /// Mix one plaintext byte into the key state.
    #[inline]
    fn update(&mut self, plain: u8) {
        self.key0 = crc32_byte(self.key0, plain);
        self.key1 = self
            .key1
            .wrapping_add(self.key0 & 0xFF)
            .wrapping_mul(134_775_813)
            .wrapping_add(1);
        self.key2 = crc32_byte(self.key2, (self.key1 >> 24) as u8);
    }

    /// Current keystream byte. Does not advance the state.
    #[inline]
    fn stream_byte(&self) -> u8 {
        let temp = (self.key2 | 2) as u16;
        (temp.wrapping_mul(temp ^ 1) >> 8) as u8
    }

    /// Decrypt one ciphertext byte and advance the state.
    #[inline]
    pub fn decrypt_byte(&mut self, cipher: u8) -> u8 {
        let plain = cipher ^ self.stream_byte();
        self.update(plain);
        plain
    }

    /// Encrypt one plaintext byte and advance the state.
    ///
    /// Used by archive-producing test fixtures; the recovery path only
    /// ever decrypts.
    #[inline]
    pub fn encrypt_byte(&mut self, plain: u8) -> u8 {
        let cipher = plain ^ self.stream_byte();
        self.update(plain);
        cipher
    }

    /// Decrypt a buffer in place.
    pub fn decrypt_in_place(&mut self, data: &mut [u8]) {
        for b in data.iter_mut() {
            *b = self.decrypt_byte(*b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc_table_matches_known_values() {
        // crc32(b"123456789") == 0xCBF43926 with this polynomial
        let mut crc = 0xFFFF_FFFFu32;
        for &b in b"123456789" {
            crc = crc32_byte(crc, b);
        }
        assert_eq!(crc ^ 0xFFFF_FFFF, 0xCBF4_3926);
    }

    #[test]
    fn encrypt_then_decrypt_restores_plaintext() {
        let plain = b"the stream cipher is stateful";
        let mut enc = ZipCryptoKeys::derive(b"hunter2");
        let cipher: Vec<u8> = plain.iter().map(|&b| enc.encrypt_byte(b)).collect();
        assert_ne!(&cipher[..], &plain[..]);

        let mut dec = ZipCryptoKeys::derive(b"hunter2");
        let mut round = cipher.clone();
        dec.decrypt_in_place(&mut round);
        assert_eq!(&round[..], &plain[..]);
    }

    #[test]
    fn wrong_password_garbles_output() {
        let mut enc = ZipCryptoKeys::derive(b"correct");
        let cipher: Vec<u8> = b"payload".iter().map(|&b| enc.encrypt_byte(b)).collect();

        let mut dec = ZipCryptoKeys::derive(b"incorrect");
        let mut out = cipher.clone();
        dec.decrypt_in_place(&mut out);
        assert_ne!(&out[..], b"payload");
    }

    #[test]
    fn derive_is_deterministic() {
        let a = ZipCryptoKeys::derive(b"ab12c");
        let b = ZipCryptoKeys::derive(b"ab12c");
        assert_eq!(a.key0, b.key0);
        assert_eq!(a.key1, b.key1);
        assert_eq!(a.key2, b.key2);
    }
}
