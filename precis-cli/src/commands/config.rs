//! `precis config` commands - View and manage configuration

use anyhow::Result;
use precis_core::Config;

/// Show current configuration
pub fn show(config: Config) -> Result<()> {
    println!("╭─────────────────────────────────────────╮");
    println!("│         Precis Configuration            │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Summarizer                              │");
    println!("│   Algorithm:    {:<23} │", config.summarizer.algorithm);
    println!("│   Sentences:    {:<23} │", config.summarizer.sentence_count);
    println!("│   Stop words:   {:<23} │", config.summarizer.stop_words);
    println!("├─────────────────────────────────────────┤");
    println!("│ Server                                  │");
    println!("│   Host:         {:<23} │", config.server.host);
    println!("│   Port:         {:<23} │", config.server.port);
    println!("│   URL:          {:<23} │", truncate(&config.server_url(), 23));
    println!("│   Upload limit: {:<23} │", format!("{} MB", config.server.max_upload_mb));
    println!("├─────────────────────────────────────────┤");
    println!("│ Logging                                 │");
    println!("│   Level:        {:<23} │", config.logging.level);
    println!("╰─────────────────────────────────────────╯");

    println!("\n📁 Paths:");
    if let Some(path) = Config::default_config_path() {
        let exists = path.exists();
        println!(
            "   Config:   {} {}",
            path.display(),
            if exists { "✓" } else { "(not created)" }
        );
    }

    Ok(())
}

/// Initialize default configuration
pub fn init(force: bool) -> Result<()> {
    let path = Config::default_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

    if path.exists() && !force {
        println!(
            "⚠️  Configuration file already exists at: {}",
            path.display()
        );
        println!("   Use --force to overwrite.");
        return Ok(());
    }

    Config::ensure_dirs()?;

    let config = Config::default();
    config.save_to_file(&path)?;

    println!("✅ Created configuration file at: {}", path.display());
    println!("\n📝 Default configuration:");
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}
