//! Custom theme loading from YAML or JSON manifests

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ThemeError};
use crate::module::{Module, Palette, ThemeModule};

/// Manifest describing a custom theme
///
/// ```yaml
/// name: sepia
/// title: Sepia
/// parent: clouds
/// stylesheets:
///   - /themes/sepia/sepia.css
/// palette:
///   primary: "#704214"
///   background: "#f4ecd8"
///   foreground: "#2b1d0e"
///   accent: "#a0522d"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeManifest {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Theme whose stylesheets load before this theme's own
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub stylesheets: Vec<String>,
    /// Falls back to the parent's palette, then the default palette
    #[serde(default)]
    pub palette: Option<Palette>,
}

/// A theme built from a [`ThemeManifest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTheme {
    name: String,
    title: String,
    description: String,
    stylesheets: Vec<String>,
    palette: Palette,
}

impl CustomTheme {
    /// Build a theme from its manifest and, if it has one, its resolved parent
    pub fn from_manifest(manifest: ThemeManifest, parent: Option<&dyn ThemeModule>) -> Self {
        let mut stylesheets = parent.map(|p| p.stylesheets()).unwrap_or_default();
        stylesheets.extend(manifest.stylesheets);

        let palette = manifest
            .palette
            .or_else(|| parent.map(|p| p.palette()))
            .unwrap_or_default();

        Self {
            name: manifest.name,
            title: manifest.title,
            description: manifest.description,
            stylesheets,
            palette,
        }
    }
}

impl Module for CustomTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn as_theme(self: std::sync::Arc<Self>) -> Option<std::sync::Arc<dyn ThemeModule>> {
        Some(self)
    }
}

impl ThemeModule for CustomTheme {
    fn stylesheets(&self) -> Vec<String> {
        self.stylesheets.clone()
    }

    fn palette(&self) -> Palette {
        self.palette.clone()
    }
}

/// Manifest file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Custom theme loader
pub struct ThemeLoader;

impl ThemeLoader {
    /// Parse and validate a manifest
    pub fn load_from_string(content: &str, format: ManifestFormat) -> Result<ThemeManifest> {
        let manifest: ThemeManifest = match format {
            ManifestFormat::Yaml => serde_yaml::from_str(content)?,
            ManifestFormat::Json => serde_json::from_str(content)?,
        };

        Self::validate_manifest(&manifest)?;
        Ok(manifest)
    }

    /// Load a manifest file (`.yaml`, `.yml` or `.json`)
    pub fn load_from_file(path: &Path) -> Result<ThemeManifest> {
        let format = ManifestFormat::from_path(path).ok_or_else(|| {
            ThemeError::InvalidFormat(format!(
                "Theme manifest must be YAML or JSON: {}",
                path.display()
            ))
        })?;

        let content = fs::read_to_string(path)?;
        Self::load_from_string(&content, format)
    }

    /// Load every manifest in a directory, skipping (and logging) bad files.
    ///
    /// Results are sorted by theme name so loading is deterministic.
    pub fn load_from_directory(dir: &Path) -> Result<Vec<ThemeManifest>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        if !dir.is_dir() {
            return Err(ThemeError::InvalidFormat(format!(
                "Path is not a directory: {}",
                dir.display()
            )));
        }

        let mut manifests = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if !path.is_file() || ManifestFormat::from_path(&path).is_none() {
                continue;
            }

            match Self::load_from_file(&path) {
                Ok(manifest) => manifests.push(manifest),
                Err(e) => {
                    warn!("Failed to load theme from {}: {}", path.display(), e);
                }
            }
        }

        manifests.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(manifests)
    }

    fn validate_manifest(manifest: &ThemeManifest) -> Result<()> {
        if manifest.name.is_empty() {
            return Err(ThemeError::ValidationError(
                "Theme name cannot be empty".to_string(),
            ));
        }

        if !manifest
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ThemeError::ValidationError(format!(
                "Theme name may only contain a-z, 0-9, '-' and '_': {}",
                manifest.name
            )));
        }

        if manifest.title.trim().is_empty() {
            return Err(ThemeError::ValidationError(format!(
                "Theme {} has no title",
                manifest.name
            )));
        }

        if manifest.parent.as_deref() == Some(manifest.name.as_str()) {
            return Err(ThemeError::ValidationError(format!(
                "Theme {} cannot extend itself",
                manifest.name
            )));
        }

        if let Some(palette) = &manifest.palette {
            palette.validate().map_err(ThemeError::ValidationError)?;
        }

        Ok(())
    }
}
