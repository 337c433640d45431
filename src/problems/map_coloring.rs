//! The textbook map-coloring instance: the seven Australian territories,
//! adjacent regions constrained to differ.

use std::fmt;

use im::{HashMap, HashSet};
use serde::Serialize;

use crate::{
    error::Result,
    solver::{assignment::Assignment, engine::Csp, graph::Edge, variable::Variable},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// Region names in declaration order.
pub const REGIONS: [&str; 7] = ["WA", "NT", "Q", "NSW", "V", "SA", "T"];

/// Pairs of adjacent regions. Tasmania shares no border, so it never
/// appears here and any color works for it.
pub const BORDERS: [(&str, &str); 9] = [
    ("SA", "WA"),
    ("SA", "NT"),
    ("SA", "Q"),
    ("SA", "NSW"),
    ("SA", "V"),
    ("WA", "NT"),
    ("NT", "Q"),
    ("Q", "NSW"),
    ("NSW", "V"),
];

/// Builds the Australia instance with the given palette as every region's
/// domain. Three colors suffice; two do not, because of the clique around
/// South Australia.
pub fn australia(palette: &[Color]) -> Result<Csp<Color>> {
    let variables: Vec<Variable> = REGIONS.iter().map(|name| Variable::from(*name)).collect();
    let palette: HashSet<Color> = palette.iter().copied().collect();
    let domains: HashMap<Variable, HashSet<Color>> = variables
        .iter()
        .map(|var| (var.clone(), palette.clone()))
        .collect();
    let edges: Vec<Edge> = BORDERS
        .iter()
        .map(|(a, b)| (Variable::from(*a), Variable::from(*b)))
        .collect();
    Csp::new(variables, domains, edges)
}

/// Renders a coloring as one `region: color` line per region, in
/// declaration order.
pub fn render(assignment: &Assignment<Color>) -> String {
    let mut out = String::new();
    for name in REGIONS {
        if let Some(color) = assignment.get(&Variable::from(name)) {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&color.to_string());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{australia, render, Color, BORDERS, REGIONS};
    use crate::solver::variable::Variable;

    #[test]
    fn three_colors_suffice() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut csp = australia(&[Color::Red, Color::Green, Color::Blue]).unwrap();
        let solution = csp.solve().unwrap();

        assert_eq!(solution.len(), REGIONS.len());
        for (a, b) in BORDERS {
            let color_a = solution.get(&Variable::from(a)).unwrap();
            let color_b = solution.get(&Variable::from(b)).unwrap();
            assert_ne!(color_a, color_b, "{a} and {b} share a border");
        }
    }

    #[test]
    fn two_colors_are_not_enough() {
        let mut csp = australia(&[Color::Red, Color::Green]).unwrap();
        assert!(csp.solve().is_none());
    }

    #[test]
    fn tasmania_is_unconstrained_but_colored() {
        let mut csp = australia(&[Color::Red, Color::Green, Color::Blue]).unwrap();
        let solution = csp.solve().unwrap();
        assert!(solution.get(&Variable::from("T")).is_some());
        assert!(csp.graph().neighbors(&Variable::from("T")).is_empty());
    }

    #[test]
    fn renders_one_line_per_region() {
        let mut csp = australia(&[Color::Red, Color::Green, Color::Blue]).unwrap();
        let solution = csp.solve().unwrap();
        let rendered = render(&solution);
        assert_eq!(rendered.lines().count(), REGIONS.len());
        assert!(rendered.starts_with("WA: "));
    }
}
