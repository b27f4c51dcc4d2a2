//! Module grid: function patterns, codeword placement and the finished symbol.

use super::{EcLevel, Mask, Version};

/// A finished QR symbol. Coordinates are `(x, y)` with the origin top left;
/// the quiet zone is not part of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    version: Version,
    ec_level: EcLevel,
    mask: Mask,
    size: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    #[inline]
    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    #[inline]
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Side length in modules.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Color of the module at `(x, y)`; anything outside the symbol is light.
    pub fn is_dark(&self, x: isize, y: isize) -> bool {
        let size = self.size as isize;
        (0..size).contains(&x)
            && (0..size).contains(&y)
            && self.modules[y as usize * self.size + x as usize]
    }

    /// Side length including a quiet zone of `margin` modules on each side.
    #[inline]
    pub fn dimension(&self, margin: usize) -> usize {
        self.size + 2 * margin
    }

    /// Color at `(x, y)` in quiet-zone coordinates.
    #[inline]
    pub fn is_dark_with_margin(&self, x: usize, y: usize, margin: usize) -> bool {
        self.is_dark(x as isize - margin as isize, y as isize - margin as isize)
    }

    /// Maximal horizontal runs of dark modules as `(x, y, len)`, row by row.
    pub fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for y in 0..self.size {
            let row = &self.modules[y * self.size..(y + 1) * self.size];
            let mut x = 0;
            while x < self.size {
                if !row[x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < self.size && row[x] {
                    x += 1;
                }
                runs.push((start, y, x - start));
            }
        }
        runs
    }
}

/// Working grid used while a symbol is being built.
///
/// `reserved` marks function modules, which data placement and masking skip.
#[derive(Debug, Clone)]
pub(crate) struct Canvas {
    version: Version,
    size: usize,
    modules: Vec<bool>,
    reserved: Vec<bool>,
}

impl Canvas {
    /// Blank grid with every function pattern drawn. Format areas are
    /// reserved but hold placeholder bits until [`Canvas::draw_format`].
    pub(crate) fn new(version: Version) -> Self {
        let size = version.size();
        let mut canvas = Self {
            version,
            size,
            modules: vec![false; size * size],
            reserved: vec![false; size * size],
        };
        canvas.draw_timing();
        canvas.draw_finders();
        canvas.draw_alignments();
        canvas.draw_format_bits(0);
        canvas.draw_version();
        canvas
    }

    #[inline]
    pub(crate) fn is_reserved(&self, x: usize, y: usize) -> bool {
        self.reserved[y * self.size + x]
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        let index = y * self.size + x;
        self.modules[index] = dark;
        self.reserved[index] = true;
    }

    fn draw_timing(&mut self) {
        for i in 0..self.size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }
    }

    fn draw_finders(&mut self) {
        let far = self.size - 4;
        for (cx, cy) in [(3, 3), (far, 3), (3, far)] {
            // 7x7 finder plus its one-module light separator
            for dy in -4isize..=4 {
                for dx in -4isize..=4 {
                    let x = cx as isize + dx;
                    let y = cy as isize + dy;
                    if x < 0 || y < 0 || x as usize >= self.size || y as usize >= self.size {
                        continue;
                    }
                    let ring = dx.abs().max(dy.abs());
                    self.set_function(x as usize, y as usize, ring != 2 && ring != 4);
                }
            }
        }
    }

    fn draw_alignments(&mut self) {
        let positions = self.version.alignment_positions();
        let last = positions.len().saturating_sub(1);
        for (i, &cy) in positions.iter().enumerate() {
            for (j, &cx) in positions.iter().enumerate() {
                let overlaps_finder =
                    (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if overlaps_finder {
                    continue;
                }
                for dy in -2isize..=2 {
                    for dx in -2isize..=2 {
                        let ring = dx.abs().max(dy.abs());
                        let x = (cx as isize + dx) as usize;
                        let y = (cy as isize + dy) as usize;
                        self.set_function(x, y, ring != 1);
                    }
                }
            }
        }
    }

    /// Write both copies of the format information and the dark module.
    pub(crate) fn draw_format(&mut self, ecl: EcLevel, mask: Mask) {
        self.draw_format_bits(format_bits(ecl, mask));
    }

    fn draw_format_bits(&mut self, bits: u32) {
        let bit = |i: usize| (bits >> i) & 1 != 0;
        let size = self.size;

        for i in 0..=5 {
            self.set_function(8, i, bit(i));
        }
        self.set_function(8, 7, bit(6));
        self.set_function(8, 8, bit(7));
        self.set_function(7, 8, bit(8));
        for i in 9..15 {
            self.set_function(14 - i, 8, bit(i));
        }

        for i in 0..8 {
            self.set_function(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, bit(i));
        }
        self.set_function(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        let version = u32::from(self.version.value());
        if version < 7 {
            return;
        }
        let mut rem = version;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * 0x1f25);
        }
        let bits = (version << 12) | rem;
        for i in 0..18 {
            let dark = (bits >> i) & 1 != 0;
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, dark);
            self.set_function(b, a, dark);
        }
    }

    /// Fill the data area with `codewords` in zigzag order. Leftover
    /// remainder modules stay light.
    pub(crate) fn place_codewords(&mut self, codewords: &[u8]) {
        let total = codewords.len() * 8;
        let mut index = 0;
        for (x, y) in zigzag(self.size) {
            if self.is_reserved(x, y) {
                continue;
            }
            if index < total {
                let byte = codewords[index / 8];
                self.modules[y * self.size + x] = (byte >> (7 - index % 8)) & 1 != 0;
            }
            index += 1;
        }
        debug_assert_eq!(index, self.version.raw_data_modules());
    }

    /// XOR the mask over every non-function module. Applying it twice
    /// restores the original grid.
    pub(crate) fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                if !self.is_reserved(x, y) && mask.flips(x, y) {
                    self.modules[y * self.size + x] ^= true;
                }
            }
        }
    }

    pub(crate) fn modules(&self) -> &[bool] {
        &self.modules
    }

    pub(crate) fn finish(self, ec_level: EcLevel, mask: Mask) -> QrMatrix {
        QrMatrix {
            version: self.version,
            ec_level,
            mask,
            size: self.size,
            modules: self.modules,
        }
    }
}

/// 15-bit format word: level and mask, BCH protected and XOR masked.
pub(crate) fn format_bits(ecl: EcLevel, mask: Mask) -> u32 {
    let data = (ecl.format_bits() << 3) | u32::from(mask.value());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ 0x5412
}

/// Data placement order: two-column strips from the right edge, alternating
/// upward and downward, skipping the vertical timing column.
pub(crate) fn zigzag(size: usize) -> Vec<(usize, usize)> {
    let mut order = Vec::with_capacity(size * size);
    let mut right = size as isize - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = (right + 1) & 2 == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                order.push(((right - j) as usize, y));
            }
        }
        right -= 2;
    }
    order
}
