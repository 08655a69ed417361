use std::{
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::{Cell, Coord, Maze};

/// What a single grid position looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Space,
    Start,
    End,
    /// Explored by the solver
    Visited,
    /// Part of the final path
    Route,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;

    fn symbol(self) -> &'static str {
        match self {
            Tile::Visited => "* ",
            _ => "  ",
        }
    }
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Wall => Tile::Wall,
            Cell::Space => Tile::Space,
            Cell::Start => Tile::Start,
            Cell::End => Tile::End,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol();
        let styled_symbol = match self {
            Tile::Wall => symbol.on(Color::White),
            Tile::Space => symbol.with(Color::Reset),
            Tile::Start => symbol.on(Color::Green),
            Tile::End => symbol.on(Color::Red),
            Tile::Visited => symbol.with(Color::Blue),
            Tile::Route => symbol.on(Color::Yellow),
        };
        write!(f, "{}", styled_symbol)
    }
}

/// Paints a maze and solver progress onto the terminal.
pub struct Renderer {
    stdout: Stdout,
    /// Maze dimensions in tiles
    dims: (u16, u16),
}

impl Renderer {
    pub fn new(stdout: Stdout, width: u16, height: u16) -> Self {
        Self {
            stdout,
            dims: (width, height),
        }
    }

    /// Checks if the terminal can show the whole maze plus a status line.
    pub fn fits_terminal(&self) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let (width, height) = self.dims;
        Ok(u32::from(term_width) >= u32::from(width) * u32::from(Tile::WIDTH)
            && u32::from(term_height) > u32::from(height))
    }

    /// Clears the screen and draws every cell of the maze.
    pub fn draw_maze(&mut self, maze: &Maze) -> std::io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                self.stdout.queue(style::Print(Tile::from(maze[(x, y)])))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        self.stdout.flush()
    }

    /// Draws a single tile in place.
    pub fn draw_tile(&mut self, coord: Coord, tile: Tile) -> std::io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(coord.0 * Tile::WIDTH, coord.1),
            style::Print(tile)
        )?;
        self.stdout.flush()
    }

    /// Writes a message on the line below the maze.
    pub fn status(&mut self, message: &str, color: Color) -> std::io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.dims.1),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(message.with(color).bold())
        )?;
        self.stdout.flush()
    }
}
