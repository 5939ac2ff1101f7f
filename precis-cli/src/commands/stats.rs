//! `precis stats` command - Word, character and sentence counts

use super::load_input;
use crate::InputArgs;
use anyhow::Result;
use precis_core::{compute_statistics, controller::resolve_input, pdf};

pub fn run(args: InputArgs, json: bool) -> Result<()> {
    let input = load_input(&args)?;

    let document_text = match pdf::extract(input.document.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("❌ Could not read the PDF: {}", e);
            String::new()
        }
    };
    let text = resolve_input(&document_text, &input.text).map_or("", |(text, _)| text);
    let stats = compute_statistics(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("📊 Text Statistics:");
        println!("   - Words: {}", stats.words);
        println!("   - Characters: {}", stats.characters);
        println!("   - Sentences (estimated): {}", stats.sentences);
    }

    Ok(())
}
