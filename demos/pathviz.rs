//! Terminal pathfinding demo using crossterm.
//!
//! Run: cargo run --bin pathviz -- bfs --delay 20 --seed 7

use std::error::Error;
use std::io;

use crossterm::{cursor, execute, terminal};
use pathviz_demos::{Options, TerminalPainter, USAGE, prepare_grid};
use pathviz_search::{RunReport, run};

fn animate(opts: &Options) -> Result<RunReport, Box<dyn Error>> {
    let mut grid = prepare_grid(&opts.grid)?;
    let mut painter = TerminalPainter::new(io::stdout());
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::Hide
    )?;
    let report = run(&mut grid, &opts.run, &mut painter);
    execute!(io::stdout(), cursor::Show)?;
    painter.finish()?;
    Ok(report?)
}

fn main() {
    let opts = match Options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    match animate(&opts) {
        Ok(report) => println!(
            "{}: {:?} after {} rounds, route length {}",
            report.algorithm, report.outcome, report.rounds, report.path_len
        ),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
