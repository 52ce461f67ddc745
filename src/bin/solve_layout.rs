/// Headless solver for text grid layouts
///
/// Reads a layout file (`.` free, `#` barrier, `S` start, `E` end), runs the
/// search and prints the grid with the explored area and path filled in.

use gridpath::{run_marked, Grid, SearchError, StepControl};
use std::env;
use std::fs;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <layout.txt>", args[0]);
        eprintln!("Solves a grid layout and prints the shortest path");
        process::exit(1);
    }

    match solve(&args[1]) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn solve(filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(filename)?;
    let mut grid = Grid::from_layout(&text)?;
    log::info!("Loaded {}x{} layout from {}", grid.size(), grid.size(), filename);

    let mut observed = 0usize;
    let result = run_marked(&mut grid, |_| {
        observed += 1;
        StepControl::Continue
    });

    println!("{}", grid.to_layout());

    match result {
        Ok(report) => {
            println!("Path length: {} steps", report.path.edge_count());
            println!("Expanded: {} cells", report.expansions);
            println!(
                "Path: {}",
                report
                    .path
                    .cells()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> ")
            );
            Ok(())
        }
        Err(SearchError::NoPathFound) => {
            println!("No path found ({} steps observed)", observed);
            process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}
