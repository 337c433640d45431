use std::collections::BTreeMap;

use vincolo::problems::map_coloring::{australia, Color};
use vincolo::solver::stats::render_stats_table;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut csp = australia(&[Color::Red, Color::Green, Color::Blue])?;
    match csp.solve() {
        Some(solution) => {
            let coloring: BTreeMap<&str, String> = solution
                .iter()
                .map(|(region, color)| (region.as_str(), color.to_string()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&coloring)?);
        }
        None => println!("no solution"),
    }
    println!("{}", render_stats_table(csp.stats()));
    Ok(())
}
