use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::color::AgeColormap;
use crate::constants::*;
use crate::exif_parser::DecoderConfig;
use crate::map_model::{ClusterOptions, MapBuilder};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_file: PathBuf,
    pub overlay_file: PathBuf,
    pub age_horizon_days: i64,
    pub max_cluster_radius: u32,
    pub disable_clustering_at_zoom: u8,
    pub max_zoom: u8,
    pub default_latitude_ref: char,
    pub default_longitude_ref: char,
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(OUTPUT_FILE),
            overlay_file: PathBuf::from(DEFAULT_OVERLAY_FILE),
            age_horizon_days: AGE_HORIZON_DAYS,
            max_cluster_radius: MAX_CLUSTER_RADIUS,
            disable_clustering_at_zoom: DISABLE_CLUSTERING_AT_ZOOM,
            max_zoom: MAP_MAX_ZOOM,
            default_latitude_ref: DEFAULT_LATITUDE_REF,
            default_longitude_ref: DEFAULT_LONGITUDE_REF,
            parallel: true,
        }
    }
}

impl Settings {
    /// Loads `key = value` pairs from `path`. A missing file yields defaults;
    /// unknown keys and unparsable values are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = Settings::default();
        if !path.exists() {
            return Ok(settings);
        }

        let file = File::open(path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"');
                config_map.insert(key.trim().to_string(), value.to_string());
            }
        }

        if let Some(output) = config_map.get("output_file").filter(|v| !v.is_empty()) {
            settings.output_file = PathBuf::from(output);
        }
        if let Some(overlay) = config_map.get("overlay_file").filter(|v| !v.is_empty()) {
            settings.overlay_file = PathBuf::from(overlay);
        }
        if let Some(days) = config_map.get("age_horizon_days").and_then(|v| v.parse::<i64>().ok()) {
            if days > 0 {
                settings.age_horizon_days = days;
            }
        }
        if let Some(radius) = config_map.get("max_cluster_radius").and_then(|v| v.parse().ok()) {
            settings.max_cluster_radius = radius;
        }
        if let Some(zoom) = config_map
            .get("disable_clustering_at_zoom")
            .and_then(|v| v.parse().ok())
        {
            settings.disable_clustering_at_zoom = zoom;
        }
        if let Some(zoom) = config_map.get("max_zoom").and_then(|v| v.parse().ok()) {
            settings.max_zoom = zoom;
        }
        if let Some(c) = config_map
            .get("default_latitude_ref")
            .and_then(|v| hemisphere_letter(v, "NS"))
        {
            settings.default_latitude_ref = c;
        }
        if let Some(c) = config_map
            .get("default_longitude_ref")
            .and_then(|v| hemisphere_letter(v, "EW"))
        {
            settings.default_longitude_ref = c;
        }
        if let Some(parallel) = config_map.get("parallel").and_then(|v| v.parse().ok()) {
            settings.parallel = parallel;
        }

        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = String::new();
        content.push_str("# Geotag map configuration\n");
        content.push_str(&format!("output_file = \"{}\"\n", self.output_file.display()));
        content.push_str(&format!("overlay_file = \"{}\"\n", self.overlay_file.display()));
        content.push_str(&format!("age_horizon_days = {}\n", self.age_horizon_days));
        content.push_str(&format!("max_cluster_radius = {}\n", self.max_cluster_radius));
        content.push_str(&format!(
            "disable_clustering_at_zoom = {}\n",
            self.disable_clustering_at_zoom
        ));
        content.push_str(&format!("max_zoom = {}\n", self.max_zoom));
        content.push_str("# Used only when a photo has no GPS reference tag\n");
        content.push_str(&format!("default_latitude_ref = {}\n", self.default_latitude_ref));
        content.push_str(&format!("default_longitude_ref = {}\n", self.default_longitude_ref));
        content.push_str(&format!("parallel = {}\n", self.parallel));

        std::fs::write(path, content).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            default_latitude_ref: self.default_latitude_ref,
            default_longitude_ref: self.default_longitude_ref,
            ..DecoderConfig::default()
        }
    }

    pub fn map_builder(&self) -> MapBuilder {
        MapBuilder::new(
            ClusterOptions {
                max_cluster_radius: self.max_cluster_radius,
                disable_clustering_at_zoom: self.disable_clustering_at_zoom,
            },
            AgeColormap::new(self.age_horizon_days),
            self.max_zoom,
        )
    }
}

fn hemisphere_letter(value: &str, allowed: &str) -> Option<char> {
    let mut chars = value.chars();
    let c = chars.next()?.to_ascii_uppercase();
    (chars.next().is_none() && allowed.contains(c)).then_some(c)
}
