use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use opal_fetcher::FetchEvent;

/// On-disk encoding of a fetch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFormat {
    Json,
    Toml,
}

impl EventFormat {
    /// `.toml` files are TOML; everything else, stdin included, is JSON.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

pub fn parse_event(contents: &str, format: EventFormat) -> Result<FetchEvent> {
    match format {
        EventFormat::Json => serde_json::from_str(contents).context("invalid JSON event"),
        EventFormat::Toml => toml::from_str(contents).context("invalid TOML event"),
    }
}

/// Read an event from `path`, or from stdin when `path` is `-`.
pub fn load_event(path: &Path) -> Result<FetchEvent> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file: {}", path.display()))?
    };

    parse_event(&contents, EventFormat::for_path(path))
}
