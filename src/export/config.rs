//! Render and export configuration.
//!
//! Both structs deserialize from JSON with every field optional; missing
//! fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::core::QuoteError;

/// Default label prefixed to every artifact file name.
pub const DEFAULT_DOCUMENT_LABEL: &str = "Quote";
/// File name stem used when the client name is blank.
pub const DEFAULT_FALLBACK_FILE_LABEL: &str = "Client";
/// Default deep-link target.
pub const DEFAULT_MESSAGING_URL: &str = "https://wa.me/";
/// Delay before the deep link opens on the download fallback path.
pub const DEFAULT_FALLBACK_LINK_DELAY_MS: u64 = 1000;

/// Raster format used by the renderer for page images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

/// Unit in which page margins are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageUnit {
    #[default]
    Mm,
    Pt,
    In,
}

impl PageUnit {
    /// Convert a length in this unit to PDF points.
    pub fn to_points(&self, value: f32) -> f32 {
        match self {
            Self::Mm => value * 72.0 / 25.4,
            Self::Pt => value,
            Self::In => value * 72.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageFormat {
    /// Page size in points as (width, height).
    pub fn size_points(&self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = match self {
            Self::A4 => (595.28, 841.89),
            Self::Letter => (612.0, 792.0),
        };
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Configuration handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Margin on every side, in `page_unit`.
    pub page_margin: f32,
    /// Artifact file name. Filled in per request from the client name.
    pub file_name: String,
    pub image_format: ImageFormat,
    /// Encoder quality, 0.0 to 1.0.
    pub image_quality: f32,
    /// Scale factor applied when rasterizing the document view.
    pub render_scale: f32,
    /// Allow cross-origin images (logos) in the rendered view.
    pub use_cors: bool,
    pub page_unit: PageUnit,
    pub page_format: PageFormat,
    pub orientation: Orientation,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_margin: 10.0,
            file_name: String::new(),
            image_format: ImageFormat::Jpeg,
            image_quality: 0.98,
            render_scale: 2.0,
            use_cors: true,
            page_unit: PageUnit::Mm,
            page_format: PageFormat::A4,
            orientation: Orientation::Portrait,
        }
    }
}

/// Settings for the export/share orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Prefix of every artifact file name.
    pub document_label: String,
    /// Stem used when the client name is blank.
    pub fallback_file_label: String,
    /// Title passed to the native share sheet.
    pub share_title: String,
    /// Base URL of the messaging deep link (`https://<service>/`).
    pub messaging_base_url: String,
    /// Delay between the fallback download and opening the deep link.
    pub fallback_link_delay_ms: u64,
    pub render: RenderConfig,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            document_label: DEFAULT_DOCUMENT_LABEL.to_string(),
            fallback_file_label: DEFAULT_FALLBACK_FILE_LABEL.to_string(),
            share_title: DEFAULT_DOCUMENT_LABEL.to_string(),
            messaging_base_url: DEFAULT_MESSAGING_URL.to_string(),
            fallback_link_delay_ms: DEFAULT_FALLBACK_LINK_DELAY_MS,
            render: RenderConfig::default(),
        }
    }
}

impl ExportSettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, QuoteError> {
        serde_json::from_str(json).map_err(|e| QuoteError::Config(e.to_string()))
    }

    pub fn fallback_link_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fallback_link_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(ExportSettings::from_json("{}").unwrap(), ExportSettings::default());
    }

    #[test]
    fn partial_json_overrides() {
        let settings = ExportSettings::from_json(
            r#"{"document_label":"Cotizacion","render":{"page_format":"letter","orientation":"landscape"}}"#,
        )
        .unwrap();
        assert_eq!(settings.document_label, "Cotizacion");
        assert_eq!(settings.render.page_format, PageFormat::Letter);
        assert_eq!(settings.render.orientation, Orientation::Landscape);
        assert_eq!(settings.render.image_quality, 0.98);
        assert_eq!(settings.messaging_base_url, DEFAULT_MESSAGING_URL);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            ExportSettings::from_json("{\"render\": 3}"),
            Err(QuoteError::Config(_))
        ));
    }

    #[test]
    fn landscape_swaps_dimensions() {
        assert_eq!(
            PageFormat::Letter.size_points(Orientation::Landscape),
            (792.0, 612.0)
        );
    }

    #[test]
    fn unit_conversion() {
        assert_eq!(PageUnit::In.to_points(1.0), 72.0);
        assert!((PageUnit::Mm.to_points(25.4) - 72.0).abs() < 1e-3);
    }
}
