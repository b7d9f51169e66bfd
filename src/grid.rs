//! Scanner for 2D character grids where numbers are contiguous digit runs
//! and single non-digit characters act as markers next to them.

use memchr::memchr_iter;

use crate::parse_usize_from_bytes;

/// A maximal contiguous run of digits within one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub row: usize,
    /// Start column, inclusive.
    pub start: usize,
    /// End column, exclusive.
    pub end: usize,
    pub value: usize,
}

impl Token {
    /// Whether a marker at `col` is adjacent to this token, i.e. `col` falls
    /// within the run padded by one cell on each side.
    pub fn touches(&self, col: usize) -> bool {
        (self.start.saturating_sub(1)..=self.end).contains(&col)
    }
}

pub struct Grid<'a> {
    rows: Vec<&'a [u8]>,
}

impl<'a> Grid<'a> {
    /// Rows must all have the same length; this is not validated.
    pub fn parse(input: &'a str) -> Grid<'a> {
        Grid {
            rows: input.lines().map(str::as_bytes).collect(),
        }
    }

    /// The row above, the row itself, and the row below. Out-of-bounds
    /// neighbors of the first and last row are empty virtual rows, so the
    /// adjacency logic never needs to special-case grid edges.
    fn neighborhood(&self, row: usize) -> [&'a [u8]; 3] {
        let above = if row == 0 { &[][..] } else { self.rows[row - 1] };
        let below = self.rows.get(row + 1).copied().unwrap_or(&[]);
        [above, self.rows[row], below]
    }

    /// Sum of all token values adjacent (including diagonally) to at least
    /// one column where `is_symbol` holds.
    pub fn sum_adjacent_tokens(&self, is_symbol: impl Fn(u8) -> bool) -> usize {
        let mut sum = 0;
        for (y, line) in self.rows.iter().enumerate() {
            let symbols = self.neighborhood(y).map(|l| extract_markers(l, &is_symbol));
            for token in extract_tokens(y, line) {
                if symbols.iter().flatten().any(|&col| token.touches(col)) {
                    sum += token.value;
                }
            }
        }
        sum
    }

    /// Sum over all `gear` markers adjacent to exactly two tokens of the
    /// product of those two token values. Gears with fewer or more adjacent
    /// tokens contribute nothing.
    pub fn sum_gear_ratios(&self, gear: u8) -> usize {
        let mut sum = 0;
        for (y, line) in self.rows.iter().enumerate() {
            let candidates: Vec<Token> = self
                .neighborhood(y)
                .iter()
                .enumerate()
                .flat_map(|(i, l)| extract_tokens((y + i).saturating_sub(1), l))
                .collect();
            for col in memchr_iter(gear, line) {
                let mut adjacent = candidates.iter().filter(|t| t.touches(col));
                match (adjacent.next(), adjacent.next(), adjacent.next()) {
                    (Some(a), Some(b), None) => sum += a.value * b.value,
                    _ => {}
                }
            }
        }
        sum
    }
}

/// All maximal digit runs of `line`, in column order. A run reaching the
/// final column is included.
pub fn extract_tokens(row: usize, line: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (col, b) in line.iter().enumerate() {
        if b.is_ascii_digit() {
            start.get_or_insert(col);
        } else if let Some(s) = start.take() {
            tokens.push(token(row, s, col, line));
        }
    }
    if let Some(s) = start {
        tokens.push(token(row, s, line.len(), line));
    }
    tokens
}

fn token(row: usize, start: usize, end: usize, line: &[u8]) -> Token {
    Token {
        row,
        start,
        end,
        value: parse_usize_from_bytes(&line[start..end]),
    }
}

/// Columns of `line` where `predicate` holds.
pub fn extract_markers(line: &[u8], predicate: impl Fn(u8) -> bool) -> Vec<usize> {
    line.iter()
        .enumerate()
        .filter(|&(_, &b)| predicate(b))
        .map(|(col, _)| col)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_symbol(b: u8) -> bool {
        !b.is_ascii_digit() && b != b'.'
    }

    #[test]
    fn no_tokens_in_separator_row() {
        assert_eq!(extract_tokens(0, b".........."), vec![]);
    }

    #[test]
    fn token_spans_parse_back_to_their_value() {
        let line = b"467..114..9";
        for token in extract_tokens(3, line) {
            assert_eq!(token.row, 3);
            let text = std::str::from_utf8(&line[token.start..token.end]).unwrap();
            assert_eq!(text.parse::<usize>().unwrap(), token.value);
        }
    }

    #[test]
    fn run_reaching_final_column_is_a_token() {
        let tokens = extract_tokens(0, b"..35..633");
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[1].start, tokens[1].end, tokens[1].value), (6, 9, 633));
    }

    #[test]
    fn adjacency_includes_exactly_one_cell_of_padding() {
        let token = extract_tokens(0, b"...35....")[0];
        assert_eq!((token.start, token.end), (3, 5));
        assert!(!token.touches(1));
        assert!(token.touches(2));
        assert!(token.touches(5));
        assert!(!token.touches(6));
    }

    #[test]
    fn markers_at_predicate_columns() {
        assert_eq!(extract_markers(b".*.12#.", is_symbol), vec![1, 5]);
        assert_eq!(extract_markers(b".*.12#.", |b| b == b'*'), vec![1]);
    }

    #[test]
    fn gear_needs_exactly_two_neighbors() {
        // One neighbor.
        let lonely = Grid::parse("617*......");
        assert_eq!(lonely.sum_gear_ratios(b'*'), 0);

        // Two neighbors, diagonal counts.
        let pair = Grid::parse("467.\n...*\n..35");
        assert_eq!(pair.sum_gear_ratios(b'*'), 467 * 35);

        // Three neighbors.
        let crowded = Grid::parse("467.\n..1*\n..35");
        assert_eq!(crowded.sum_gear_ratios(b'*'), 0);
    }

    #[test]
    fn symbols_in_virtual_edge_rows_never_exist() {
        // Token on the first and last row only sees real neighbor rows.
        let grid = Grid::parse("12..\n....\n..34");
        assert_eq!(grid.sum_adjacent_tokens(is_symbol), 0);
    }

    #[test]
    fn aggregations_are_pure() {
        let grid = Grid::parse("467*.\n..35.");
        let first = (grid.sum_adjacent_tokens(is_symbol), grid.sum_gear_ratios(b'*'));
        let second = (grid.sum_adjacent_tokens(is_symbol), grid.sum_gear_ratios(b'*'));
        assert_eq!(first, second);
    }
}
