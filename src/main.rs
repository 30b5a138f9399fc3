use emst::Emst;
use std::error::Error;
use std::{env, fs};

/// Reads comma separated points, one per line, and prints the spanning tree as `a,b,weight`
/// rows. The input path defaults to `test_data.csv`.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| "test_data.csv".to_string());
    let contents = fs::read_to_string(&path)?;
    let data = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split(',')
                .map(|num| num.trim().parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let tree = Emst::default_params(&data).compute()?;
    for (a, b, weight) in tree.edges().iter().map(|edge| edge.as_row()) {
        println!("{a},{b},{weight}");
    }
    log::info!(
        "{} points from {path}: total weight {}",
        data.len(),
        tree.total_weight()
    );
    Ok(())
}
