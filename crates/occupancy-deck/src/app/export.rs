//! Writing finished decks to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::model::Deck;
use crate::infra::config::Config;
use crate::infra::pptx::{DocumentProperties, PptxRenderer};

/// Runtime options controlling export behavior.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_path: PathBuf,
    pub creator: String,
}

impl ExportOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_path: config.output.path(),
            creator: config.output.creator(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of an export operation.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub output_path: PathBuf,
    pub slide_count: usize,
    pub embedded_images: usize,
}

/// Renders decks and writes the presentation file.
pub struct Exporter {
    renderer: PptxRenderer,
}

impl Exporter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            renderer: PptxRenderer::new()?,
        })
    }

    /// Render `deck` and write it to `options.output_path`, replacing any existing file.
    pub fn export(&self, deck: &Deck, options: &ExportOptions) -> Result<ExportResult> {
        let path = &options.output_path;
        let rendered = self
            .renderer
            .render(deck, &DocumentProperties::now(options.creator.as_str()))
            .with_context(|| format!("failed to render presentation for {}", path.display()))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory: {}", parent.display())
            })?;
        }
        fs::write(path, &rendered.bytes)
            .with_context(|| format!("failed to write presentation to {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            slides = rendered.slide_count,
            images = rendered.image_count,
            bytes = rendered.bytes.len(),
            "presentation written"
        );

        Ok(ExportResult {
            output_path: path.clone(),
            slide_count: rendered.slide_count,
            embedded_images: rendered.image_count,
        })
    }
}

/// Save `deck` to `path` with the default document properties.
pub fn save_deck(deck: &Deck, path: &Path) -> Result<ExportResult> {
    let options = ExportOptions {
        output_path: path.to_path_buf(),
        ..ExportOptions::default()
    };
    Exporter::new()?.export(deck, &options)
}
