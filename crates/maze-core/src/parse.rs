//! Text input: character grids and coordinate lists.

use crate::error::ParseError;
use crate::geom::Point;
use crate::grid::Grid;

/// Parse a character grid, one line per row and one character per column.
///
/// Every character is passed through `convert`; `None` rejects it with
/// [`ParseError::InvalidChar`]. Lines must all have the same width. Blank
/// lines at the end and `\r` line endings are ignored.
pub fn parse_grid<T>(
    text: &str,
    mut convert: impl FnMut(char) -> Option<T>,
) -> Result<Grid<T>, ParseError> {
    let mut cells = Vec::new();
    let mut width: Option<usize> = None;
    let mut height = 0usize;

    let lines: Vec<&str> = text.lines().collect();
    let used = lines
        .iter()
        .rposition(|l| !l.trim_end_matches('\r').is_empty())
        .map_or(0, |i| i + 1);

    for (y, line) in lines[..used].iter().enumerate() {
        let line = line.trim_end_matches('\r');
        let mut cols = 0usize;
        for (x, ch) in line.chars().enumerate() {
            let value = convert(ch).ok_or(ParseError::InvalidChar {
                ch,
                pos: Point::new(x as i32, y as i32),
            })?;
            cells.push(value);
            cols += 1;
        }
        match width {
            None => width = Some(cols),
            Some(expected) if expected != cols => {
                return Err(ParseError::InconsistentWidth {
                    line: y + 1,
                    expected,
                    actual: cols,
                });
            }
            Some(_) => {}
        }
        height += 1;
    }

    let width = width.unwrap_or(0);
    Ok(Grid::from_vec(width as i32, height as i32, cells)?)
}

/// Parse a grid of plain characters.
pub fn parse_char_grid(text: &str) -> Result<Grid<char>, ParseError> {
    parse_grid(text, Some)
}

/// Parse one `x,y` point per line. Blank lines are skipped.
pub fn parse_points(text: &str) -> Result<Vec<Point>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, line)| {
            let invalid = || ParseError::InvalidPoint {
                line: i + 1,
                content: line.to_string(),
            };
            let (x, y) = line.trim().split_once(',').ok_or_else(invalid)?;
            let x = x.trim().parse().map_err(|_| invalid())?;
            let y = y.trim().parse().map_err(|_| invalid())?;
            Ok(Point::new(x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    const MAZE: &str = "\
#####
#S..#
#.#E#
#####
";

    #[test]
    fn parses_marker_grid() {
        let g = parse_grid(MAZE, |c| match c {
            '#' => Some(Cell::BLOCKED),
            '.' | 'S' | 'E' => Some(Cell::WALKABLE),
            _ => None,
        })
        .unwrap();
        assert_eq!(g.size(), Point::new(5, 4));
        assert_eq!(g.get(Point::new(1, 1)), Ok(&Cell::WALKABLE));
        assert_eq!(g.get(Point::new(2, 2)), Ok(&Cell::BLOCKED));
    }

    #[test]
    fn char_grid_keeps_markers() {
        let g = parse_char_grid(MAZE).unwrap();
        assert_eq!(g.find(|&c| c == 'S'), Some(Point::new(1, 1)));
        assert_eq!(g.find(|&c| c == 'E'), Some(Point::new(3, 2)));
        assert_eq!(g.to_string(), MAZE);
    }

    #[test]
    fn crlf_and_trailing_blank_lines() {
        let g = parse_char_grid("ab\r\ncd\r\n\r\n\n").unwrap();
        assert_eq!(g.size(), Point::new(2, 2));
        assert_eq!(g.get(Point::new(1, 1)), Ok(&'d'));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert_eq!(
            parse_char_grid("abc\nab\n").unwrap_err(),
            ParseError::InconsistentWidth {
                line: 2,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn unknown_character_reports_position() {
        let err = parse_grid("..\n.x\n", |c| (c == '.').then_some(())).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn empty_text_gives_empty_grid() {
        let g = parse_char_grid("").unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn points() {
        let pts = parse_points("5,4\n4,2\n\n 0 , 6 \n").unwrap();
        assert_eq!(
            pts,
            vec![Point::new(5, 4), Point::new(4, 2), Point::new(0, 6)]
        );
        assert!(matches!(
            parse_points("1;2"),
            Err(ParseError::InvalidPoint { line: 1, .. })
        ));
        assert!(parse_points("1,a").is_err());
    }
}
