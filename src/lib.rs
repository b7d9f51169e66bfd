pub mod grid;
pub mod solutions;

use anyhow::Result;

/// A day's solver: full input text in, (part 1, part 2) out.
pub type Solution = fn(&str) -> Result<(usize, usize)>;

/// Implemented days, paired with their day number.
pub const ALL_SOLUTIONS: &[(usize, Solution)] = &[(1, solutions::day1), (3, solutions::day3)];

pub fn load_input(name: &str) -> String {
    std::fs::read_to_string("inputs/".to_string() + name).unwrap()
}

pub fn default_input(n: usize) -> String {
    load_input(&format!("{}.txt", n))
}

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters!
pub fn parse_usize_from_bytes(bytes: &[u8]) -> usize {
    let mut ret = 0;
    for b in bytes {
        ret = ret * 10 + (b - b'0') as usize;
    }
    ret
}
