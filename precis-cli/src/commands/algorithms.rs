//! `precis algorithms` command - List the summarization algorithms

use anyhow::Result;
use precis_core::{Algorithm, AlgorithmInfo};

pub fn run(json: bool) -> Result<()> {
    if json {
        let infos: Vec<AlgorithmInfo> = Algorithm::ALL.into_iter().map(AlgorithmInfo::from).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("📚 Summarization algorithms:\n");
    for algorithm in Algorithm::ALL {
        let default = if algorithm == Algorithm::default() { " (default)" } else { "" };
        if algorithm.long_name() == algorithm.name() {
            println!("  {}{}", algorithm.name(), default);
        } else {
            println!("  {} - {}{}", algorithm.name(), algorithm.long_name(), default);
        }
        println!("      {}", algorithm.description());
    }

    Ok(())
}
