pub mod doctor;
pub mod flatten;
pub mod map;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio::io::AsyncWriteExt;

const HF_REPO: &str = "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main";

/// The two files the local provider needs, with their repo-relative paths.
const MODEL_FILES: [(&str, &str); 2] = [
    ("model.onnx", "onnx/model.onnx"),
    ("tokenizer.json", "tokenizer.json"),
];

/// Download the ONNX embedding model and tokenizer to the cache directory.
///
/// Files already present are left untouched, so the command is safe to
/// re-run after a partial download.
pub async fn model_download(config: &crate::config::EmbeddingConfig) -> Result<()> {
    let cache_dir = crate::config::expand_tilde(&config.cache_dir);
    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("failed to create cache dir: {}", cache_dir.display()))?;

    for (name, remote) in MODEL_FILES {
        let dest = cache_dir.join(name);
        if dest.exists() {
            println!("{name} already present at {}", dest.display());
            continue;
        }
        println!("Downloading {name}...");
        fetch_to_file(&format!("{HF_REPO}/{remote}"), &dest).await?;
        println!("Saved {}", dest.display());
    }

    println!("Model files ready.");
    Ok(())
}

/// Stream a URL to disk with a progress bar, via tmp file + atomic rename.
async fn fetch_to_file(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("HTTP request failed for {url}"))?;

    anyhow::ensure!(
        response.status().is_success(),
        "download of {url} failed with HTTP {}",
        response.status()
    );

    let bar = match response.content_length() {
        Some(size) => {
            let bar = ProgressBar::new(size);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("##-"),
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    };

    let tmp = dest.with_extension("partial");
    let mut file = tokio::fs::File::create(&tmp)
        .await
        .with_context(|| format!("failed to create temp file: {}", tmp.display()))?;

    let bytes = response.bytes().await.context("error reading response body")?;
    bar.inc(bytes.len() as u64);
    file.write_all(&bytes).await.context("error writing file")?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, dest)
        .await
        .context("failed to move downloaded file into place")?;

    bar.finish_and_clear();
    Ok(())
}
