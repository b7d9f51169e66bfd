use std::time::{Duration, Instant};

use advent2023::{default_input, Solution, ALL_SOLUTIONS};
use anyhow::Result;

fn main() -> Result<()> {
    let mut total = Duration::default();
    for &(n, solve) in ALL_SOLUTIONS {
        total += execute_day(n, solve, default_input)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day(n: usize, solve: Solution, input_loader: fn(usize) -> String) -> Result<Duration> {
    println!("Day {}:", n);
    let input = input_loader(n);

    let start = Instant::now();
    let (part1, part2) = solve(&input)?;
    let elapsed = start.elapsed();

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
