mod renderer;

use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::Color,
    terminal::{self, ClearType},
};
use thiserror::Error;

pub use renderer::{Renderer, Tile};

use crate::{
    config::Config,
    error::MazeError,
    generators::generate_maze,
    maze::Maze,
    solvers::{Solver, VisitIter, solve_maze},
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("Terminal is too small for a {width}x{height} maze")]
    TerminalTooSmall { width: u16, height: u16 },
}

/// How a run of the animation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The solver reached the end. Holds the number of moves along the path.
    PathFound(usize),
    NoPath,
    /// The user pressed Esc before the solver finished.
    Cancelled,
}

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Generate the configured maze, then animate the configured solver over it.
    pub fn run(&self, stdout: Stdout) -> Result<RunOutcome, AppError> {
        let Config {
            width,
            height,
            generator,
            solver,
            seed,
            ..
        } = self.config;

        let maze = generate_maze(generator, width, height, seed)?;
        tracing::info!(%generator, width, height, "maze generated");

        let mut renderer = Renderer::new(stdout, width, height);
        if !renderer.fits_terminal()? {
            return Err(AppError::TerminalTooSmall { width, height });
        }
        renderer.draw_maze(&maze)?;

        let outcome = App::animate(&maze, &mut renderer, solver, self.config.frame_delay())?;
        tracing::info!(%solver, ?outcome, "solver run finished");

        let (message, color) = match outcome {
            RunOutcome::PathFound(len) => (format!("Path found in {len} steps! "), Color::Green),
            RunOutcome::NoPath => ("No path found. ".to_string(), Color::Yellow),
            RunOutcome::Cancelled => return Ok(outcome),
        };
        renderer.status(&(message + "Press Esc to exit..."), color)?;
        App::wait_for_esc()?;
        Ok(outcome)
    }

    /// Drive the solver one step per frame, painting each visited cell and finally the path.
    fn animate(
        maze: &Maze,
        renderer: &mut Renderer,
        solver: Solver,
        frame_delay: Duration,
    ) -> Result<RunOutcome, AppError> {
        let (start, end) = maze.default_endpoints();
        let mut visits = VisitIter::new(solve_maze(solver, maze, start, end)?);

        for coord in visits.by_ref() {
            // Keep the endpoints visible
            if coord != start && coord != end {
                renderer.draw_tile(coord, Tile::Visited)?;
            }

            // Waiting for input doubles as the frame delay
            if App::esc_pressed(frame_delay)? {
                tracing::debug!("[animate] Esc key pressed, abandoning solver");
                return Ok(RunOutcome::Cancelled);
            }
        }

        let Some(path) = visits.path() else {
            return Ok(RunOutcome::NoPath);
        };
        for &coord in path.iter().filter(|&&c| c != start && c != end) {
            renderer.draw_tile(coord, Tile::Route)?;
        }
        Ok(RunOutcome::PathFound(path.len().saturating_sub(1)))
    }

    /// Wait up to `timeout` for a key press, returning whether it was Esc.
    fn esc_pressed(timeout: Duration) -> std::io::Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        Ok(matches!(
            event::read()?,
            event::Event::Key(event::KeyEvent {
                code: KeyCode::Esc,
                kind: event::KeyEventKind::Press,
                ..
            })
        ))
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }
}
