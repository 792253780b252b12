//! CLI `doctor` command — report on the local environment and configuration.

use anyhow::Result;

use crate::config::FieldmapConfig;

/// Print a health report: config values in effect and model file status.
pub fn doctor(config: &FieldmapConfig) -> Result<()> {
    let cache_dir = crate::config::expand_tilde(&config.embedding.cache_dir);
    let model_path = cache_dir.join("model.onnx");
    let tokenizer_path = cache_dir.join("tokenizer.json");

    println!("fieldmap Health Report");
    println!("======================");
    println!();
    println!("Config file:       {}", crate::config::default_config_path().display());
    println!("Log level:         {}", config.logging.log_level);
    println!();
    println!("Embedding:");
    println!("  Provider:        {}", config.embedding.provider);
    println!("  Model:           {}", config.embedding.model);
    println!("  Cache dir:       {}", cache_dir.display());
    print_file_status("model.onnx", &model_path);
    print_file_status("tokenizer.json", &tokenizer_path);
    println!();
    println!("Matching defaults:");
    println!("  Description weight: {:.2}", config.matching.desc_weight);
    println!("  Field-name weight:  {:.2}", config.matching.field_weight);
    println!("  Threshold:          {:.2}", config.matching.threshold);

    if !model_path.exists() || !tokenizer_path.exists() {
        println!();
        println!("Model files are missing. Run `fieldmap model download` to fetch them.");
    }

    Ok(())
}

fn print_file_status(name: &str, path: &std::path::Path) {
    match std::fs::metadata(path) {
        Ok(meta) => println!("  {name}:       present ({})", format_bytes(meta.len())),
        Err(_) => println!("  {name}:       MISSING"),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
