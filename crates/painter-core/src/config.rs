//! Controller configuration.
//!
//! `PainterConfig` is immutable once built. Each control binding defaults
//! on its own: a key missing from the JSON keeps the default selector,
//! `null` disables the control, and a string replaces the selector.

use crate::error::ConfigurationError;
use serde::{Deserialize, Deserializer};

/// Fixed name of the exported image.
pub const EXPORT_FILENAME: &str = "drawImage.png";

/// Background painted at init and after every clear.
pub const BACKGROUND_FILL: &str = "#f5f5f5";

/// Border applied to the surface element.
pub const SURFACE_BORDER: &str = "1px solid #778899";

/// The logical controls a painter can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlName {
    ColorPencil,
    ColorPalette,
    PencilSize,
    PencilOpacity,
    ClearButton,
    DownloadButton,
    PreviewButton,
    PreviewArea,
}

impl ControlName {
    pub const ALL: [ControlName; 8] = [
        ControlName::ColorPencil,
        ControlName::ColorPalette,
        ControlName::PencilSize,
        ControlName::PencilOpacity,
        ControlName::ClearButton,
        ControlName::DownloadButton,
        ControlName::PreviewButton,
        ControlName::PreviewArea,
    ];

    pub fn default_selector(self) -> &'static str {
        match self {
            ControlName::ColorPencil => "#pencilColor",
            ControlName::ColorPalette => ".color-palette",
            ControlName::PencilSize => "#pencilSize",
            ControlName::PencilOpacity => "#pencilOpacity",
            ControlName::ClearButton => "#clearButton",
            ControlName::DownloadButton => "#downloadButton",
            ControlName::PreviewButton => "#previewButton",
            ControlName::PreviewArea => "#preview",
        }
    }

    /// Key used in the JS configuration object.
    pub fn key(self) -> &'static str {
        match self {
            ControlName::ColorPencil => "colorPencil",
            ControlName::ColorPalette => "colorPalette",
            ControlName::PencilSize => "pencilSize",
            ControlName::PencilOpacity => "pencilOpacity",
            ControlName::ClearButton => "clearButton",
            ControlName::DownloadButton => "downloadButton",
            ControlName::PreviewButton => "previewButton",
            ControlName::PreviewArea => "previewArea",
        }
    }
}

/// One configurable value: inherited default, explicitly disabled, or set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Binding {
    #[default]
    Default,
    Disabled,
    Value(String),
}

impl Binding {
    /// The effective value, or `None` when disabled.
    pub fn resolve<'a>(&'a self, default: &'a str) -> Option<&'a str> {
        match self {
            Binding::Default => Some(default),
            Binding::Disabled => None,
            Binding::Value(v) => Some(v.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Binding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Missing keys never reach here; `#[serde(default)]` supplies them.
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(v) => Binding::Value(v),
            serde_json::Value::Null => Binding::Disabled,
            other => {
                log::warn!("ignoring non-string control binding `{other}`, control disabled");
                Binding::Disabled
            }
        })
    }
}

pub const DEFAULT_PREVIEW_PLACEHOLDER: &str = "./image/no-preview.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PainterConfig {
    pub color_pencil: Binding,
    pub color_palette: Binding,
    pub pencil_size: Binding,
    pub pencil_opacity: Binding,
    pub clear_button: Binding,
    pub download_button: Binding,
    pub preview_button: Binding,
    pub preview_area: Binding,
    /// Image shown in the preview area before the first preview.
    pub preview_placeholder: Binding,
}

impl PainterConfig {
    /// Parse the JSON form of the JS configuration object.
    ///
    /// An empty string, `null` or a non-object value yields the defaults.
    /// Unknown keys are ignored. Only text that is not JSON at all fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let json = json.trim();
        if json.is_empty() || json == "undefined" {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidConfig(e.to_string()))?;
        if !value.is_object() {
            if !value.is_null() {
                log::warn!("config is not an object, using defaults");
            }
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| ConfigurationError::InvalidConfig(e.to_string()))
    }

    /// Selector for a control, or `None` when the control is disabled.
    pub fn selector(&self, control: ControlName) -> Option<&str> {
        let binding = match control {
            ControlName::ColorPencil => &self.color_pencil,
            ControlName::ColorPalette => &self.color_palette,
            ControlName::PencilSize => &self.pencil_size,
            ControlName::PencilOpacity => &self.pencil_opacity,
            ControlName::ClearButton => &self.clear_button,
            ControlName::DownloadButton => &self.download_button,
            ControlName::PreviewButton => &self.preview_button,
            ControlName::PreviewArea => &self.preview_area,
        };
        binding.resolve(control.default_selector())
    }

    pub fn preview_placeholder(&self) -> Option<&str> {
        self.preview_placeholder.resolve(DEFAULT_PREVIEW_PLACEHOLDER)
    }
}

/// The surface a painter is asked to bind to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl SurfaceSpec {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// Check a lookup result before anything gets wired.
    ///
    /// `found_tag` is the tag name of the element with `id`, or `None` when
    /// no such element exists.
    pub fn validate(&self, found_tag: Option<&str>) -> Result<(), ConfigurationError> {
        let tag = found_tag.ok_or_else(|| ConfigurationError::SurfaceNotFound {
            id: self.id.clone(),
        })?;
        if !tag.eq_ignore_ascii_case("canvas") {
            return Err(ConfigurationError::WrongElementType {
                id: self.id.clone(),
                tag: tag.to_ascii_lowercase(),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigurationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
