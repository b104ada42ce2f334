use std::io::{Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::Direction;
use crate::session::Session;

/// Rendered width of one maze cell, in character columns.
const CELL_WIDTH: usize = 4;

/// Frame renderer for an agent run.
///
/// Redraws the whole maze plus a stats panel after every move, then sleeps
/// for the configured refresh time so a human can follow the animation.
/// The renderer owns the terminal while a run is on screen; everything the
/// crate wants to say meanwhile goes through `tracing` to the log file.
pub struct Renderer {
    stdout: Stdout,
    refresh: Duration,
}

impl Renderer {
    pub fn new(refresh: Duration) -> Self {
        Renderer {
            stdout: std::io::stdout(),
            refresh,
        }
    }

    /// Clear the screen and draw the current session state.
    pub fn draw(&mut self, session: &Session) -> std::io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide
        )?;

        for line in frame_lines(session) {
            queue!(self.stdout, style::Print(line), style::Print("\r\n"))?;
        }

        self.draw_stats(session)?;
        self.stdout.flush()?;
        std::thread::sleep(self.refresh);
        Ok(())
    }

    fn draw_stats(&mut self, session: &Session) -> std::io::Result<()> {
        use unicode_truncate::UnicodeTruncateStr;

        let maze = session.maze();
        let headline = format!(
            "score {}  position ({}, {})  visited {}/{}  moves {}  cherry {}",
            session.score(),
            session.current_position().0,
            session.current_position().1,
            session.visited_count(),
            maze.grid().len(),
            session.moves_taken(),
            if session.captured() { "yes" } else { "no" },
        );
        // Keep the panel on one terminal row even for huge mazes
        let term_width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        let (headline, _) = headline.unicode_truncate(term_width);

        queue!(
            self.stdout,
            style::Print("\r\n"),
            style::PrintStyledContent(
                headline
                    .to_string()
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            ),
            style::Print("\r\n")
        )?;
        Ok(())
    }

    /// Print the end-of-run summary below the maze and hand the cursor back.
    pub fn finish(&mut self, session: &Session) -> std::io::Result<()> {
        let lines = [
            format!(
                "Cells visited:   {} / {}",
                session.visited_count(),
                session.maze().grid().len()
            ),
            format!("Moves taken:     {}", session.moves_taken()),
            format!("Shortest path:   {} moves", session.shortest_path_len() - 1),
            format!(
                "Cherry captured: {}",
                if session.captured() { "yes" } else { "no" }
            ),
            format!(
                "Goal reached:    {}",
                if session.is_completed() { "yes" } else { "no" }
            ),
            format!("Efficiency score: {}", session.score()),
            format!("Explorer score:   {}", session.explorer_score()),
        ];
        queue!(self.stdout, style::Print("\r\n"))?;
        for line in lines {
            queue!(
                self.stdout,
                style::PrintStyledContent(line.with(Color::Cyan)),
                style::Print("\r\n")
            )?;
        }
        queue!(self.stdout, cursor::Show)?;
        self.stdout.flush()
    }
}

/// Sprite for one cell, always exactly [`CELL_WIDTH`] columns wide.
fn sprite(session: &Session, coord: (u16, u16)) -> &'static str {
    let maze = session.maze();
    let symbol = if coord == session.current_position() {
        " 🤖 "
    } else if coord == maze.start() {
        " 🏁 "
    } else if coord == maze.end() {
        " 🏆 "
    } else if session.has_visited(coord) {
        " 🔸 "
    } else if session.collectible_position() == Some(coord) {
        " 🍒 "
    } else {
        "    "
    };

    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        assert_eq!(
            symbol.width(),
            CELL_WIDTH,
            "Each sprite must occupy exactly {CELL_WIDTH} character widths."
        );
    }

    symbol
}

/// The maze as text rows: a border line, then alternating cell and wall
/// lines, walls drawn only where no passage is open.
fn frame_lines(session: &Session) -> Vec<String> {
    let grid = session.maze().grid();
    let width = grid.width();
    let height = grid.height();

    let mut lines = Vec::with_capacity(height as usize * 2 + 1);
    lines.push(format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(width as usize)));

    for row in 0..height {
        let mut cells = String::from("|");
        let mut south = String::from("+");
        for col in 0..width {
            let coord = (row, col);
            cells.push_str(sprite(session, coord));
            cells.push(if grid.neighbor(coord, Direction::East).is_some() {
                ' '
            } else {
                '|'
            });
            let open_south = grid.neighbor(coord, Direction::South).is_some();
            south.push_str(&(if open_south { " " } else { "-" }).repeat(CELL_WIDTH));
            south.push('+');
        }
        lines.push(cells);
        lines.push(south);
    }
    lines
}
