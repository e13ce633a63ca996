//! Shared drawing helpers for the terminal demos.
//!
//! Tiles are shown as one character each, colored after the flags the
//! search engine sets. Hex rows with odd index are indented by one column
//! so the row-offset layout reads naturally.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use rand::Rng;
use tilepath_core::{Grid, Point, Tile};
use tilepath_search::{Outcome, SearchEngine, Topology};

const COL_WALKABLE: Color = Color::White;
const COL_BLOCKED: Color = Color::DarkRed;
const COL_START: Color = Color::Green;
const COL_GOAL: Color = Color::Red;
const COL_OPEN: Color = Color::Cyan;
const COL_CLOSED: Color = Color::DarkBlue;
const COL_PATH: Color = Color::Rgb {
    r: 144,
    g: 238,
    b: 144,
};

/// Character and color for a tile. Earlier flags win.
pub fn glyph(tile: &Tile) -> (char, Color) {
    if !tile.is_walkable() {
        ('#', COL_BLOCKED)
    } else if tile.is_start() {
        ('S', COL_START)
    } else if tile.is_goal() {
        ('G', COL_GOAL)
    } else if tile.in_final_path() {
        ('*', COL_PATH)
    } else if tile.in_closed_set() {
        ('x', COL_CLOSED)
    } else if tile.in_open_set() {
        ('o', COL_OPEN)
    } else {
        ('.', COL_WALKABLE)
    }
}

fn indent(topology: Topology, row: i32) -> &'static str {
    if topology == Topology::Hex6 && row % 2 == 1 {
        " "
    } else {
        ""
    }
}

/// Uncolored rendering, one line per row.
pub fn plain_frame(grid: &Grid, topology: Topology) -> String {
    let mut s = String::new();
    for y in 0..grid.height() {
        s.push_str(indent(topology, y));
        for x in 0..grid.width() {
            if x > 0 {
                s.push(' ');
            }
            if let Some(t) = grid.at(Point::new(x, y)) {
                s.push(glyph(t).0);
            }
        }
        s.push('\n');
    }
    s
}

/// Redraw the engine's grid from the top-left corner of the terminal.
pub fn draw(out: &mut impl Write, engine: &SearchEngine) -> io::Result<()> {
    let Some(grid) = engine.grid() else {
        return Ok(());
    };
    queue!(out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;
    for y in 0..grid.height() {
        queue!(out, Print(indent(engine.topology(), y)))?;
        for x in 0..grid.width() {
            let Some(t) = grid.at(Point::new(x, y)) else {
                continue;
            };
            let (ch, color) = glyph(t);
            queue!(out, SetForegroundColor(color), Print(ch), Print(' '))?;
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }
    queue!(
        out,
        Print(format!(
            "{} {}  step {}  open {}  visited {}\r\n",
            engine.topology(),
            engine.strategy(),
            engine.steps_taken(),
            engine.open_len(),
            engine.visited_len()
        ))
    )?;
    out.flush()
}

/// Block roughly `fraction` of the tiles at random, sparing `keep`.
/// Returns how many tiles were blocked.
pub fn scatter_walls<R: Rng>(grid: &mut Grid, fraction: f64, rng: &mut R, keep: &[Point]) -> usize {
    let mut blocked = 0;
    for t in grid.tiles_mut() {
        if keep.contains(&t.pos()) {
            continue;
        }
        let r: f64 = rng.random();
        if r < fraction {
            t.set_walkable(false);
            blocked += 1;
        }
    }
    blocked
}

/// One-line result description printed when a run ends.
pub fn summary(engine: &SearchEngine) -> String {
    match (engine.outcome(), engine.path_hops()) {
        (Some(Outcome::Found), Some(hops)) => format!(
            "goal reached: {hops} hops, {} steps, {} visited",
            engine.steps_taken(),
            engine.visited_len()
        ),
        (Some(Outcome::Exhausted), _) => format!(
            "no path: frontier exhausted after {} steps, {} visited",
            engine.steps_taken(),
            engine.visited_len()
        ),
        _ => format!("still searching after {} steps", engine.steps_taken()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tilepath_search::{SearchConfig, Strategy};

    #[test]
    fn plain_frame_shows_flags() {
        let mut grid = Grid::parse("...\n.#.\n...").unwrap();
        grid.at_mut(Point::new(2, 2)).unwrap().mark_open();
        let frame = plain_frame(&grid, Topology::Square4);
        assert_eq!(frame, ". . .\n. # .\n. . o\n");
        let hex = plain_frame(&grid, Topology::Hex6);
        assert_eq!(hex.lines().nth(1), Some(" . # ."));
    }

    #[test]
    fn finished_run_frame_and_summary() {
        let cfg = SearchConfig::default()
            .with_size(5, 5)
            .with_topology(Topology::Square4)
            .with_strategy(Strategy::Bfs);
        let mut engine = cfg.build_engine().unwrap();
        engine.run_to_end().unwrap();
        let frame = plain_frame(engine.grid().unwrap(), engine.topology());
        assert!(frame.starts_with('S'));
        assert_eq!(frame.matches('*').count(), 7);
        assert!(summary(&engine).starts_with("goal reached: 8 hops"));
    }

    #[test]
    fn draw_writes_every_row() {
        let mut engine = SearchConfig::default().with_size(6, 5).build_engine().unwrap();
        engine.step().unwrap();
        let mut buf = Vec::new();
        draw(&mut buf, &engine).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert_eq!(text.matches("\r\n").count(), 6);
        assert!(text.contains("SQUARE_8 BFS"));
    }

    #[test]
    fn scatter_spares_endpoints() {
        let mut grid = Grid::new(10, 10).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let keep = [Point::new(0, 0), Point::new(9, 9)];
        let blocked = scatter_walls(&mut grid, 1.0, &mut rng, &keep);
        assert_eq!(blocked, 98);
        assert_eq!(grid.count_walkable(), 2);
        assert_eq!(scatter_walls(&mut grid, 0.0, &mut rng, &[]), 0);
    }
}
