//! `precis status` command - Check a running server

use anyhow::Result;
use precis_core::{AlgorithmInfo, Config, HealthResponse};

pub async fn run(config: Config) -> Result<()> {
    let base = config.server_url();
    let client = reqwest::Client::new();

    println!("Checking Precis server at {}...", base);

    let response = match client.get(format!("{}/health", base)).send().await {
        Ok(response) => response,
        Err(_) => {
            println!("\n❌ Precis server is not running");
            println!("   Start it with: precis serve");
            return Ok(());
        }
    };

    if !response.status().is_success() {
        println!(
            "\n⚠️  Precis server responded with status: {}",
            response.status()
        );
        return Ok(());
    }

    let health: HealthResponse = response.json().await?;
    println!("\n✅ Precis server {} ({})", health.version, health.status);
    println!("   Page:       {}/", base);

    match client.get(format!("{}/v1/algorithms", base)).send().await {
        Ok(response) if response.status().is_success() => {
            let algorithms: Vec<AlgorithmInfo> = response.json().await?;
            println!("   Algorithms: {}", algorithm_names(&algorithms));
        }
        _ => println!("   Algorithms: unavailable"),
    }

    Ok(())
}

fn algorithm_names(algorithms: &[AlgorithmInfo]) -> String {
    if algorithms.is_empty() {
        return "none".to_string();
    }
    algorithms
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use precis_core::Algorithm;

    #[test]
    fn test_algorithm_names() {
        let algorithms: Vec<AlgorithmInfo> =
            Algorithm::ALL.into_iter().map(AlgorithmInfo::from).collect();
        assert_eq!(algorithm_names(&algorithms), "LSA, Luhn, LexRank, TextRank");
        assert_eq!(algorithm_names(&[]), "none");
    }
}
