//! Symbol versions and the capacity tables keyed by them.

use super::EcLevel;

/// QR Model 2 version, 1 to 40 inclusive.
///
/// The side length of a symbol is `version * 4 + 17` modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    /// Create a version, rejecting numbers outside `1..=40`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Version implied by a symbol side length.
    pub fn from_size(size: usize) -> Option<Self> {
        if size < 21 || (size - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((size - 17) / 4).ok().and_then(Self::new)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Side length in modules.
    #[inline]
    pub const fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// All versions, smallest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }

    /// Number of modules available for data and error correction bits,
    /// after all function patterns are excluded.
    pub fn raw_data_modules(self) -> usize {
        let v = usize::from(self.0);
        let mut result = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align = v / 7 + 2;
            result -= (25 * align - 10) * align - 55;
            if v >= 7 {
                result -= 36;
            }
        }
        result
    }

    /// Total codewords (data + error correction) the symbol holds.
    #[inline]
    pub fn raw_codewords(self) -> usize {
        self.raw_data_modules() / 8
    }

    pub fn ecc_per_block(self, ecl: EcLevel) -> usize {
        table_get(&ECC_CODEWORDS_PER_BLOCK, self, ecl)
    }

    pub fn block_count(self, ecl: EcLevel) -> usize {
        table_get(&NUM_ERROR_CORRECTION_BLOCKS, self, ecl)
    }

    /// Codewords left for payload once error correction is reserved.
    pub fn data_codewords(self, ecl: EcLevel) -> usize {
        self.raw_codewords() - self.ecc_per_block(ecl) * self.block_count(ecl)
    }

    /// Row/column centers of the alignment patterns, ascending.
    pub fn alignment_positions(self) -> Vec<usize> {
        let v = usize::from(self.0);
        if v == 1 {
            return Vec::new();
        }
        let count = v / 7 + 2;
        let step = if v == 32 {
            26
        } else {
            (v * 4 + count * 2 + 1) / (count * 2 - 2) * 2
        };
        let last = self.size() - 7;
        (0..count)
            .map(|i| if i == 0 { 6 } else { last - (count - 1 - i) * step })
            .collect()
    }
}

fn table_get(table: &'static [[u8; 41]; 4], version: Version, ecl: EcLevel) -> usize {
    usize::from(table[ecl.ordinal()][usize::from(version.0)])
}

// Index 0 is padding so the tables can be indexed by version number.
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
