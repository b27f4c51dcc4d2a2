//! Data masks and the penalty rules used to pick one.

/// One of the eight standard mask patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask(u8);

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

impl Mask {
    pub const ALL: [Self; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    pub const fn new(value: u8) -> Option<Self> {
        if value < 8 { Some(Self(value)) } else { None }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the module at column `x`, row `y` gets inverted.
    pub fn flips(self, x: usize, y: usize) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => x * y % 2 + x * y % 3 == 0,
            6 => (x * y % 2 + x * y % 3) % 2 == 0,
            _ => ((x + y) % 2 + x * y % 3) % 2 == 0,
        }
    }
}

/// Penalty score of a finished symbol (lower is better).
///
/// `modules` is row major with side `size`.
pub fn penalty(modules: &[bool], size: usize) -> u32 {
    let at = |x: usize, y: usize| modules[y * size + x];
    let mut score = 0;

    for i in 0..size {
        let row: Vec<bool> = (0..size).map(|x| at(x, i)).collect();
        let column: Vec<bool> = (0..size).map(|y| at(i, y)).collect();
        for line in [&row, &column] {
            score += run_penalty(line) + finder_penalty(line);
        }
    }

    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = at(x, y);
            if color == at(x + 1, y) && color == at(x, y + 1) && color == at(x + 1, y + 1) {
                score += PENALTY_N2;
            }
        }
    }

    let total = (size * size) as i64;
    let dark = modules.iter().filter(|&&m| m).count() as i64;
    // Smallest k such that the dark ratio lies within (45 - 5k)% ..= (55 + 5k)%.
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    score += k.max(0) as u32 * PENALTY_N4;

    score
}

/// Adjacent modules of one color in runs of five or more.
fn run_penalty(line: &[bool]) -> u32 {
    let mut score = 0;
    let mut run = 0;
    let mut color = None;
    for &module in line {
        if Some(module) == color {
            run += 1;
        } else {
            if run >= 5 {
                score += PENALTY_N1 + (run - 5);
            }
            color = Some(module);
            run = 1;
        }
    }
    if run >= 5 {
        score += PENALTY_N1 + (run - 5);
    }
    score
}

/// 1:1:3:1:1 patterns with four light modules on either side. Modules past
/// the edge of the symbol count as light.
fn finder_penalty(line: &[bool]) -> u32 {
    const CORE: [bool; 7] = [true, false, true, true, true, false, true];
    let light = |i: isize| i < 0 || i as usize >= line.len() || !line[i as usize];

    let mut score = 0;
    for start in 0..line.len().saturating_sub(CORE.len() - 1) {
        if line[start..start + CORE.len()] != CORE {
            continue;
        }
        let start = start as isize;
        let before = (start - 4..start).all(light);
        let after = (start + 7..start + 11).all(light);
        if before || after {
            score += PENALTY_N3;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_predicates() {
        let m = |v| Mask::new(v).unwrap();
        assert!(m(0).flips(0, 0));
        assert!(!m(0).flips(1, 0));
        assert!(m(1).flips(5, 2));
        assert!(m(2).flips(3, 1));
        assert!(!m(2).flips(4, 1));
        assert!(m(3).flips(1, 2));
        assert!(m(4).flips(2, 1));
        assert!(!m(4).flips(3, 0));
        assert!(m(5).flips(0, 7));
        assert!(m(6).flips(0, 0));
        assert!(m(7).flips(0, 0));
        assert!(Mask::new(8).is_none());
    }

    #[test]
    fn test_run_penalty() {
        assert_eq!(run_penalty(&[true; 4]), 0);
        assert_eq!(run_penalty(&[true; 5]), 3);
        assert_eq!(run_penalty(&[false; 7]), 5);
        let mixed = [true, true, true, true, true, false, false, false, false, false, false];
        assert_eq!(run_penalty(&mixed), 3 + 4);
    }

    #[test]
    fn test_finder_penalty_edges_count_as_light() {
        let line = [true, false, true, true, true, false, true];
        assert_eq!(finder_penalty(&line), PENALTY_N3);

        let mut padded = vec![true; 4];
        padded.extend_from_slice(&line);
        padded.extend_from_slice(&[true; 4]);
        assert_eq!(finder_penalty(&padded), 0);
    }

    #[test]
    fn test_balance_penalty() {
        // one 2x2 block, no long runs, 100% dark
        let score = penalty(&[true; 4], 2);
        assert_eq!(score, PENALTY_N2 + 9 * PENALTY_N4);
    }
}
