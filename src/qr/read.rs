//! Minimal reader for clean, axis-aligned symbols.
//!
//! Used by tests to check that rendered artifacts decode back to their
//! payload. No error correction is attempted: the format word is matched by
//! nearest Hamming distance and data codewords are taken as read.

use super::ec::BlockLayout;
use super::matrix::{Canvas, format_bits, zigzag};
use super::segment::{ALPHANUMERIC_CHARSET, Mode};
use super::{EcLevel, Mask, Version};

/// Decode a symbol of side `size`, sampling modules through `is_dark(x, y)`.
pub(crate) fn decode(size: usize, is_dark: impl Fn(usize, usize) -> bool) -> Result<String, String> {
    let version = Version::from_size(size).ok_or_else(|| format!("invalid symbol size {size}"))?;
    let (ecl, mask) = read_format(size, &is_dark);

    let canvas = Canvas::new(version);
    let raw_bits = version.raw_codewords() * 8;
    let mut codewords = vec![0u8; version.raw_codewords()];
    let mut index = 0;
    for (x, y) in zigzag(size) {
        if canvas.is_reserved(x, y) || index >= raw_bits {
            continue;
        }
        if is_dark(x, y) ^ mask.flips(x, y) {
            codewords[index / 8] |= 0x80 >> (index % 8);
        }
        index += 1;
    }

    let data = deinterleave(&codewords, version, ecl);
    let bytes = parse_segments(&data, version)?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

fn read_format(size: usize, is_dark: &impl Fn(usize, usize) -> bool) -> (EcLevel, Mask) {
    let mut positions: Vec<(usize, usize)> = (0..=5).map(|i| (8, i)).collect();
    positions.extend([(8, 7), (8, 8), (7, 8)]);
    positions.extend((9..15).map(|i| (14 - i, 8)));
    debug_assert!(size > 8);

    let raw = positions
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &(x, y))| acc | (u32::from(is_dark(x, y)) << i));

    EcLevel::ALL
        .into_iter()
        .flat_map(|ecl| Mask::ALL.into_iter().map(move |mask| (ecl, mask)))
        .min_by_key(|&(ecl, mask)| (format_bits(ecl, mask) ^ raw).count_ones())
        .unwrap_or((EcLevel::M, Mask::ALL[0]))
}

fn deinterleave(codewords: &[u8], version: Version, ecl: EcLevel) -> Vec<u8> {
    let layout = BlockLayout::new(version, ecl);
    let mut blocks = vec![Vec::new(); layout.blocks];
    let mut source = codewords.iter();
    for i in 0..layout.max_data_len() {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < layout.data_len(b)
                && let Some(&byte) = source.next()
            {
                block.push(byte);
            }
        }
    }
    blocks.concat()
}

struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl BitReader<'_> {
    fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    fn read(&mut self, len: u8) -> Result<u32, String> {
        if usize::from(len) > self.remaining() {
            return Err("unexpected end of data".to_string());
        }
        let mut value = 0;
        for _ in 0..len {
            let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            self.pos += 1;
        }
        Ok(value)
    }
}

fn parse_segments(data: &[u8], version: Version) -> Result<Vec<u8>, String> {
    let charset = ALPHANUMERIC_CHARSET.as_bytes();
    let mut reader = BitReader { data, pos: 0 };
    let mut out = Vec::new();

    while reader.remaining() >= 4 {
        let indicator = reader.read(4)?;
        if indicator == 0 {
            break;
        }
        let mode = Mode::from_indicator(indicator)
            .ok_or_else(|| format!("unsupported mode indicator {indicator:#x}"))?;
        let mut count = reader.read(mode.char_count_bits(version))? as usize;
        match mode {
            Mode::Numeric => {
                while count > 0 {
                    let digits = count.min(3);
                    let value = reader.read(digits as u8 * 3 + 1)?;
                    out.extend(format!("{value:0digits$}").bytes());
                    count -= digits;
                }
            }
            Mode::Alphanumeric => {
                while count >= 2 {
                    let value = reader.read(11)? as usize;
                    out.push(charset[value / 45]);
                    out.push(charset[value % 45]);
                    count -= 2;
                }
                if count == 1 {
                    out.push(charset[reader.read(6)? as usize]);
                }
            }
            Mode::Byte => {
                for _ in 0..count {
                    out.push(reader.read(8)? as u8);
                }
            }
        }
    }
    Ok(out)
}
