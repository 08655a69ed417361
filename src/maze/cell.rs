use std::fmt;

/// Category of a single grid cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Space,
    Start,
    End,
}

impl Cell {
    /// Whether a solver may step onto this cell.
    pub fn is_open(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Single character used by the plain text rendering of a maze.
    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Space => ' ',
            Cell::Start => 'S',
            Cell::End => 'E',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_walls_are_closed() {
        assert!(!Cell::Wall.is_open());
        assert!(Cell::Space.is_open());
        assert!(Cell::Start.is_open());
        assert!(Cell::End.is_open());
    }

    #[test]
    fn test_display_symbols() {
        let rendered = [Cell::Wall, Cell::Space, Cell::Start, Cell::End]
            .iter()
            .map(|c| c.to_string())
            .collect::<String>();
        assert_eq!(rendered, "# SE");
    }
}
