use aho_corasick::AhoCorasick;
use anyhow::Result;

use crate::grid::Grid;

const DIGIT_PATTERNS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "one", "two", "three", "four", "five", "six",
    "seven", "eight", "nine",
];

pub fn day1(input: &str) -> Result<(usize, usize)> {
    // NOTE: regex doesn't work since it doesn't support overlapping matches (look-around)
    let ac = AhoCorasick::new(DIGIT_PATTERNS)?;

    let mut sum_part1 = 0;
    let mut sum_part2 = 0;

    for line in input.lines() {
        let mut first_part1 = None;
        let mut last_part1 = 0;
        let mut first_part2 = None;
        let mut last_part2 = 0;

        for mat in ac.find_overlapping_iter(line) {
            let (digit, literal) = match mat.pattern().as_usize() {
                d @ 0..=8 => (d + 1, true),
                d => (d - 8, false),
            };

            if literal {
                first_part1.get_or_insert(digit);
                last_part1 = digit;
            }

            first_part2.get_or_insert(digit);
            last_part2 = digit;
        }

        sum_part1 += first_part1.unwrap_or(0) * 10 + last_part1;
        sum_part2 += first_part2.unwrap_or(0) * 10 + last_part2;
    }

    Ok((sum_part1, sum_part2))
}

pub fn day3(input: &str) -> Result<(usize, usize)> {
    let schematic = Grid::parse(input);
    let part1 = schematic.sum_adjacent_tokens(|b| !b.is_ascii_digit() && b != b'.');
    let part2 = schematic.sum_gear_ratios(b'*');
    Ok((part1, part2))
}
