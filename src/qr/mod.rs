//! QR Model 2 symbol encoder.
//!
//! Text is split into numeric, alphanumeric and byte segments so that the
//! bit stream is as short as possible, then placed in the smallest version
//! that fits the chosen error correction level. All eight masks are tried and the one with the
//! lowest penalty score wins.
//!
//! ```text
//! text ─► Segments ─► data codewords ─► + Reed-Solomon ─► Canvas ─► mask ─► QrMatrix
//! ```

mod ec;
mod error;
mod mask;
mod matrix;
#[cfg(test)]
pub(crate) mod read;
mod segment;
mod version;

pub use ec::EcLevel;
pub use error::QrError;
pub use mask::Mask;
pub use matrix::QrMatrix;
pub use version::Version;

use matrix::Canvas;
use segment::{BitBuffer, Segment};

const PAD_BYTES: [u8; 2] = [0xec, 0x11];

/// Encode `text` into a QR symbol at error correction level `ecl`.
///
/// # Errors
///
/// Returns [`QrError::DataTooLong`] when the text does not fit in a
/// version 40 symbol at that level.
pub fn encode(text: &str, ecl: EcLevel) -> Result<QrMatrix, QrError> {
    let plans: [Vec<Segment>; segment::COUNT_CLASSES] =
        std::array::from_fn(|class| segment::optimal_segments(text, class));
    let plan = |version: Version| plans[segment::count_class(version)].as_slice();

    let version = Version::all()
        .find(|&v| {
            segment::total_bits(plan(v), v).is_some_and(|bits| bits <= v.data_codewords(ecl) * 8)
        })
        .ok_or_else(|| QrError::DataTooLong {
            needed: plan(Version::MAX)
                .iter()
                .map(|s| s.header_bits(Version::MAX) + s.data_bits())
                .sum(),
            capacity: Version::MAX.data_codewords(ecl) * 8,
        })?;

    let data = data_codewords(plan(version), version, ecl);
    let mut canvas = Canvas::new(version);
    canvas.place_codewords(&ec::add_ecc_and_interleave(&data, version, ecl));

    let mask = choose_mask(&canvas, version, ecl);
    canvas.apply_mask(mask);
    canvas.draw_format(ecl, mask);
    Ok(canvas.finish(ecl, mask))
}

/// Segment bits, terminator and padding, packed into exactly the number of
/// data codewords `version` holds at `ecl`.
fn data_codewords(segments: &[Segment], version: Version, ecl: EcLevel) -> Vec<u8> {
    let capacity_bits = version.data_codewords(ecl) * 8;
    let mut bits = BitBuffer::default();
    for segment in segments {
        segment.write_to(&mut bits, version);
    }

    let terminator = (capacity_bits - bits.len()).min(4);
    bits.push(0, terminator as u8);
    bits.push(0, ((8 - bits.len() % 8) % 8) as u8);

    let mut bytes = bits.to_bytes();
    for pad in PAD_BYTES.iter().cycle() {
        if bytes.len() * 8 >= capacity_bits {
            break;
        }
        bytes.push(*pad);
    }
    bytes
}

fn choose_mask(canvas: &Canvas, version: Version, ecl: EcLevel) -> Mask {
    Mask::ALL
        .into_iter()
        .min_by_key(|&mask| {
            let mut trial = canvas.clone();
            trial.apply_mask(mask);
            trial.draw_format(ecl, mask);
            mask::penalty(trial.modules(), version.size())
        })
        .unwrap_or(Mask::ALL[0])
}
