//! One-time download of tesseract language data.

use std::path::{Path, PathBuf};

use lens_types::OcrLanguage;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Download of {url} failed with status {status}")]
    Download { url: String, status: u16 },

    #[error("Downloaded {0} is empty")]
    EmptyFile(String),
}

pub fn traineddata_path(dir: &Path, language: OcrLanguage) -> PathBuf {
    dir.join(format!("{}.traineddata", language.code()))
}

/// Make sure `<dir>/<code>.traineddata` exists, downloading it from
/// `base_url` when missing. Returns the file path.
pub async fn ensure_language(
    dir: &Path,
    language: OcrLanguage,
    base_url: &str,
) -> Result<PathBuf, ProvisionError> {
    let target = traineddata_path(dir, language);
    if tokio::fs::try_exists(&target).await? {
        tracing::debug!("Language data present: {}", target.display());
        return Ok(target);
    }

    tokio::fs::create_dir_all(dir).await?;
    let url = format!(
        "{}/{}.traineddata",
        base_url.trim_end_matches('/'),
        language.code()
    );
    tracing::info!("Downloading {} language data from {}", language.display_name(), url);

    let response = reqwest::get(&url).await?;
    if !response.status().is_success() {
        return Err(ProvisionError::Download {
            url,
            status: response.status().as_u16(),
        });
    }
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(ProvisionError::EmptyFile(url));
    }

    // Write beside the target, then rename into place
    let partial = target.with_extension("traineddata.part");
    tokio::fs::write(&partial, &bytes).await?;
    if let Err(e) = tokio::fs::rename(&partial, &target).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }

    tracing::info!("Saved {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}
