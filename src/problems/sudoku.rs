//! 9x9 Sudoku as a binary CSP: one variable per cell named `X{row}{col}`
//! (1-based), with all-different cliques over every row, column and box.

use im::{HashMap, HashSet};

use crate::{
    error::Result,
    solver::{
        assignment::Assignment,
        engine::Csp,
        graph::{alldiff, Edge},
        variable::Variable,
    },
};

/// A board; `0` marks an empty cell.
pub type Grid = [[u8; 9]; 9];

/// The variable for the cell at 1-based `(row, col)`.
pub fn cell(row: usize, col: usize) -> Variable {
    Variable::from(format!("X{row}{col}"))
}

/// Parses 81 cells of `0`-`9`, with `.` accepted for empty; whitespace is
/// ignored. Returns `None` on any other character or a wrong cell count.
pub fn grid_from_str(text: &str) -> Option<Grid> {
    let mut grid = [[0u8; 9]; 9];
    let mut index = 0;
    for ch in text.chars() {
        if ch.is_whitespace() {
            continue;
        }
        let digit = match ch {
            '.' => 0,
            '0'..='9' => ch as u8 - b'0',
            _ => return None,
        };
        if index == 81 {
            return None;
        }
        grid[index / 9][index % 9] = digit;
        index += 1;
    }
    (index == 81).then_some(grid)
}

/// Builds the CSP for a puzzle: a given cell gets a singleton domain, an
/// empty cell gets `1..=9`.
pub fn csp_from_grid(grid: &Grid) -> Result<Csp<u8>> {
    let mut variables = Vec::with_capacity(81);
    let mut domains: HashMap<Variable, HashSet<u8>> = HashMap::new();
    for row in 1..=9 {
        for col in 1..=9 {
            let var = cell(row, col);
            let given = grid[row - 1][col - 1];
            let domain: HashSet<u8> = if given == 0 {
                (1..=9).collect()
            } else {
                std::iter::once(given).collect()
            };
            domains.insert(var.clone(), domain);
            variables.push(var);
        }
    }

    let mut edges: Vec<Edge> = Vec::new();
    for row in 1..=9 {
        let row_vars: Vec<Variable> = (1..=9).map(|col| cell(row, col)).collect();
        edges.extend(alldiff(&row_vars));
    }
    for col in 1..=9 {
        let col_vars: Vec<Variable> = (1..=9).map(|row| cell(row, col)).collect();
        edges.extend(alldiff(&col_vars));
    }
    for band in 0..3 {
        for stack in 0..3 {
            let box_vars: Vec<Variable> = (0..3)
                .flat_map(|r| (0..3).map(move |c| cell(band * 3 + r + 1, stack * 3 + c + 1)))
                .collect();
            edges.extend(alldiff(&box_vars));
        }
    }

    Csp::new(variables, domains, edges)
}

/// Reads the solved board back out of a complete assignment.
pub fn solution_grid(assignment: &Assignment<u8>) -> Grid {
    let mut grid = [[0u8; 9]; 9];
    for row in 1..=9 {
        for col in 1..=9 {
            if let Some(&digit) = assignment.get(&cell(row, col)) {
                grid[row - 1][col - 1] = digit;
            }
        }
    }
    grid
}

/// Draws the board with the separators of the course handout.
pub fn render(assignment: &Assignment<u8>) -> String {
    let mut out = String::new();
    for row in 1..=9 {
        for col in 1..=9 {
            match assignment.get(&cell(row, col)) {
                Some(digit) => out.push((b'0' + digit) as char),
                None => out.push('.'),
            }
            out.push(' ');
            if col == 3 || col == 6 {
                out.push_str("| ");
            }
        }
        out.push('\n');
        if row == 3 || row == 6 {
            out.push_str("------+-------+------\n");
        }
    }
    out
}
