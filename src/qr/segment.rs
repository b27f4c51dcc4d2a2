//! Data segments: mode selection and the bit stream they encode to.

use super::Version;

pub const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Encoding mode of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
}

impl Mode {
    /// Most compact mode able to represent `text`.
    pub fn for_text(text: &str) -> Self {
        if text.is_empty() {
            Self::Byte
        } else if text.bytes().all(|b| b.is_ascii_digit()) {
            Self::Numeric
        } else if text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c)) {
            Self::Alphanumeric
        } else {
            Self::Byte
        }
    }

    /// Four-bit mode indicator.
    pub const fn indicator(self) -> u32 {
        match self {
            Self::Numeric => 0x1,
            Self::Alphanumeric => 0x2,
            Self::Byte => 0x4,
        }
    }

    pub const fn from_indicator(bits: u32) -> Option<Self> {
        match bits {
            0x1 => Some(Self::Numeric),
            0x2 => Some(Self::Alphanumeric),
            0x4 => Some(Self::Byte),
            _ => None,
        }
    }

    /// Width of the character count field, which grows with the version.
    pub fn char_count_bits(self, version: Version) -> u8 {
        self.count_bits(count_class(version))
    }

    fn count_bits(self, class: usize) -> u8 {
        let widths = match self {
            Self::Numeric => [10, 12, 14],
            Self::Alphanumeric => [9, 11, 13],
            Self::Byte => [8, 16, 16],
        };
        widths[class]
    }

    fn can_encode(self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alphanumeric => ALPHANUMERIC_CHARSET.contains(c),
            Self::Byte => true,
        }
    }

    /// Cost of one character in sixths of a bit.
    fn char_cost(self, c: char) -> usize {
        match self {
            Self::Numeric => 20,
            Self::Alphanumeric => 33,
            Self::Byte => c.len_utf8() * 8 * 6,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Byte => 0,
            Self::Alphanumeric => 1,
            Self::Numeric => 2,
        }
    }
}

const MODES: [Mode; 3] = [Mode::Byte, Mode::Alphanumeric, Mode::Numeric];

/// Versions 1-9, 10-26 and 27-40 share character count widths.
pub const COUNT_CLASSES: usize = 3;

/// Character count width class of `version`, `0..COUNT_CLASSES`.
#[inline]
pub fn count_class(version: Version) -> usize {
    usize::from((version.value() + 7) / 17)
}

/// Append-only sequence of bits, most significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer(Vec<bool>);

impl BitBuffer {
    /// Append the low `len` bits of `value`.
    pub fn push(&mut self, value: u32, len: u8) {
        debug_assert!(len <= 31 && value >> len == 0);
        self.0.extend((0..len).rev().map(|i| (value >> i) & 1 != 0));
    }

    pub fn extend(&mut self, other: &Self) {
        self.0.extend_from_slice(&other.0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Pack into bytes; a trailing partial byte is zero filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }
}

/// A run of text encoded in one mode.
#[derive(Debug, Clone)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    data: BitBuffer,
}

impl Segment {
    /// The whole of `text` as one segment in its most compact mode.
    pub fn from_text(text: &str) -> Self {
        Self::new(Mode::for_text(text), text)
    }

    /// Encode `text` in `mode`. Every character must be representable.
    pub fn new(mode: Mode, text: &str) -> Self {
        let mut data = BitBuffer::default();
        let char_count = match mode {
            Mode::Numeric => {
                for group in text.as_bytes().chunks(3) {
                    let value = group
                        .iter()
                        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
                    data.push(value, group.len() as u8 * 3 + 1);
                }
                text.len()
            }
            Mode::Alphanumeric => {
                let values: Vec<u32> = text
                    .chars()
                    .filter_map(|c| ALPHANUMERIC_CHARSET.find(c))
                    .map(|i| i as u32)
                    .collect();
                for pair in values.chunks(2) {
                    match pair {
                        [a, b] => data.push(a * 45 + b, 11),
                        [a] => data.push(*a, 6),
                        _ => unreachable!(),
                    }
                }
                values.len()
            }
            Mode::Byte => {
                for &byte in text.as_bytes() {
                    data.push(u32::from(byte), 8);
                }
                text.len()
            }
        };
        Self {
            mode,
            char_count,
            data,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn data_bits(&self) -> usize {
        self.data.len()
    }

    /// Bits needed at `version`, or `None` when the character count does
    /// not fit its field.
    pub fn encoded_bits(&self, version: Version) -> Option<usize> {
        let count_bits = self.mode.char_count_bits(version);
        if self.char_count >= 1usize << count_bits {
            return None;
        }
        Some(self.header_bits(version) + self.data.len())
    }

    /// Mode indicator plus character count field.
    pub fn header_bits(&self, version: Version) -> usize {
        4 + usize::from(self.mode.char_count_bits(version))
    }

    /// Header plus payload bits at `version`.
    pub fn write_to(&self, buffer: &mut BitBuffer, version: Version) {
        buffer.push(self.mode.indicator(), 4);
        buffer.push(self.char_count as u32, self.mode.char_count_bits(version));
        buffer.extend(&self.data);
    }
}

/// Total bits of `segments` at `version`, or `None` when any count
/// overflows its field.
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments.iter().map(|s| s.encoded_bits(version)).sum()
}

/// Split `text` into the segments that need the fewest bits for versions in
/// count `class`.
///
/// Dynamic programming over characters. After each character there is one
/// state per mode (the mode of the open segment) holding the cheapest cost
/// so far, in sixths of a bit so numeric and alphanumeric stay integral.
pub fn optimal_segments(text: &str, class: usize) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let head = MODES.map(|m| (4 + usize::from(m.count_bits(class))) * 6);
    let mut costs = head.map(Some);
    // choices[i][state]: mode character i was written in
    let mut choices: Vec<[Mode; 3]> = Vec::with_capacity(chars.len());

    for &c in &chars {
        let mut next: [Option<usize>; 3] = [None; 3];
        for mode in MODES {
            if mode.can_encode(c) {
                next[mode.index()] = costs[mode.index()].map(|cost| cost + mode.char_cost(c));
            }
        }

        // Close the segment after this character and open another.
        let written = next;
        let mut pick = MODES;
        for to in MODES {
            for from in MODES {
                let Some(cost) = written[from.index()] else {
                    continue;
                };
                let switched = cost.div_ceil(6) * 6 + head[to.index()];
                if next[to.index()].is_none_or(|best| switched < best) {
                    next[to.index()] = Some(switched);
                    pick[to.index()] = from;
                }
            }
        }
        choices.push(pick);
        costs = next;
    }

    let mut state = MODES
        .into_iter()
        .filter(|m| costs[m.index()].is_some())
        .min_by_key(|m| costs[m.index()])
        .unwrap_or(Mode::Byte);
    let mut modes = vec![Mode::Byte; chars.len()];
    for (i, pick) in choices.iter().enumerate().rev() {
        state = pick[state.index()];
        modes[i] = state;
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    for i in 1..=chars.len() {
        if i == chars.len() || modes[i] != modes[start] {
            let end = offsets.get(i).copied().unwrap_or(text.len());
            segments.push(Segment::new(modes[start], &text[offsets[start]..end]));
            start = i;
        }
    }
    segments
}
