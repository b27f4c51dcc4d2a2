//! Error correction: levels, Reed-Solomon codewords and block interleaving.

use serde::{Deserialize, Serialize};

use super::Version;

/// Error correction level, from lowest (L, ~7% recovery) to highest (H, ~30%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum EcLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl EcLevel {
    pub const ALL: [Self; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Row index into the capacity tables.
    #[inline]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::L => 0,
            Self::M => 1,
            Self::Q => 2,
            Self::H => 3,
        }
    }

    /// Two-bit value stored in the format information.
    #[inline]
    pub const fn format_bits(self) -> u32 {
        match self {
            Self::L => 1,
            Self::M => 0,
            Self::Q => 3,
            Self::H => 2,
        }
    }
}

/// How the codewords of one version/level pair are split into blocks.
///
/// Short blocks come first and carry one data codeword less than long ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub blocks: usize,
    pub short_blocks: usize,
    pub short_data_len: usize,
    pub ecc_len: usize,
}

impl BlockLayout {
    pub fn new(version: Version, ecl: EcLevel) -> Self {
        let blocks = version.block_count(ecl);
        let ecc_len = version.ecc_per_block(ecl);
        let raw = version.raw_codewords();
        let short_blocks = blocks - raw % blocks;
        let short_data_len = raw / blocks - ecc_len;
        Self {
            blocks,
            short_blocks,
            short_data_len,
            ecc_len,
        }
    }

    /// Data codewords held by block `index`.
    #[inline]
    pub fn data_len(&self, index: usize) -> usize {
        self.short_data_len + usize::from(index >= self.short_blocks)
    }

    #[inline]
    pub fn max_data_len(&self) -> usize {
        self.data_len(self.blocks - 1)
    }
}

/// Split `data` into blocks, append Reed-Solomon codewords to each and
/// interleave the result into final placement order.
pub fn add_ecc_and_interleave(data: &[u8], version: Version, ecl: EcLevel) -> Vec<u8> {
    let layout = BlockLayout::new(version, ecl);
    debug_assert_eq!(data.len(), version.data_codewords(ecl));

    let divisor = generator(layout.ecc_len);
    let mut blocks = Vec::with_capacity(layout.blocks);
    let mut offset = 0;
    for index in 0..layout.blocks {
        let chunk = &data[offset..offset + layout.data_len(index)];
        offset += chunk.len();
        let ecc = remainder(chunk, &divisor);
        blocks.push((chunk, ecc));
    }

    let mut result = Vec::with_capacity(version.raw_codewords());
    for i in 0..layout.max_data_len() {
        for (chunk, _) in &blocks {
            if let Some(&byte) = chunk.get(i) {
                result.push(byte);
            }
        }
    }
    for i in 0..layout.ecc_len {
        for (_, ecc) in &blocks {
            result.push(ecc[i]);
        }
    }
    result
}

/// Generator polynomial coefficients for `degree` error correction codewords,
/// highest power first with the leading 1 omitted.
fn generator(degree: usize) -> Vec<u8> {
    let mut result = vec![0u8; degree];
    if let Some(last) = result.last_mut() {
        *last = 1;
    }
    // Multiply by (x - r^i) for i in 0..degree, r = 0x02.
    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            result[j] = multiply(result[j], root);
            if j + 1 < degree {
                result[j] ^= result[j + 1];
            }
        }
        root = multiply(root, 0x02);
    }
    result
}

fn remainder(data: &[u8], divisor: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; divisor.len()];
    for &byte in data {
        let factor = byte ^ result[0];
        result.rotate_left(1);
        if let Some(last) = result.last_mut() {
            *last = 0;
        }
        for (slot, &coef) in result.iter_mut().zip(divisor) {
            *slot ^= multiply(coef, factor);
        }
    }
    result
}

/// Product in GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1.
fn multiply(x: u8, y: u8) -> u8 {
    let mut z: u16 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x11d);
        z ^= ((u16::from(y) >> i) & 1) * u16::from(x);
    }
    z as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(0, 0xff), 0);
        assert_eq!(multiply(1, 0x53), 0x53);
        assert_eq!(multiply(0x02, 0x80), 0x1d);
        assert_eq!(multiply(0x8e, 0x02), 0x01);
    }

    #[test]
    fn test_remainder_matches_reference_codewords() {
        // "01234567" numeric at 1-M, from ISO/IEC 18004 annex I
        let data = [
            0x10, 0x20, 0x0c, 0x56, 0x61, 0x80, 0xec, 0x11, 0xec, 0x11, 0xec, 0x11, 0xec, 0x11,
            0xec, 0x11,
        ];
        let ecc = remainder(&data, &generator(10));
        assert_eq!(
            ecc,
            vec![0xa5, 0x24, 0xd4, 0xc1, 0xed, 0x36, 0xc7, 0x87, 0x2c, 0x55]
        );
    }

    #[test]
    fn test_layout_version_5_q() {
        // 5-Q: two blocks of 15 data codewords, two of 16
        let layout = BlockLayout::new(Version::new(5).unwrap(), EcLevel::Q);
        assert_eq!(layout.blocks, 4);
        assert_eq!(layout.short_blocks, 2);
        assert_eq!(layout.data_len(0), 15);
        assert_eq!(layout.data_len(3), 16);
        assert_eq!(layout.ecc_len, 18);
    }

    #[test]
    fn test_interleave_length() {
        for version in Version::all() {
            for ecl in EcLevel::ALL {
                let data = vec![0u8; version.data_codewords(ecl)];
                let out = add_ecc_and_interleave(&data, version, ecl);
                assert_eq!(out.len(), version.raw_codewords());
            }
        }
    }
}
