use anyhow::{Context, Result};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

pub const LEGEND_ASSET: &str = "legend.html";
pub const STYLESHEET_ASSET: &str = "custom_marker_cluster.css";

/// Static fragments inlined into the generated page.
#[derive(Debug, Clone)]
pub struct MapAssets {
    pub legend_html: String,
    pub stylesheet: String,
}

impl MapAssets {
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            legend_html: embedded_text(LEGEND_ASSET)?,
            stylesheet: embedded_text(STYLESHEET_ASSET)?,
        })
    }
}

fn embedded_text(name: &str) -> Result<String> {
    let file = Asset::get(name).with_context(|| format!("Missing embedded asset {}", name))?;
    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("Asset {} is not UTF-8", name))
}
