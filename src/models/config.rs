use crate::assets;
use crate::error::ConfigError;
use crt_stripes::StripeSettings;
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "SCANLINE_CONFIG";

/// Default suffix appended to the input stem for the output file name.
pub const DEFAULT_SUFFIX: &str = "_CRT_RGB";

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Overrides for the stripe settings
    #[serde(default)]
    pub stripes: StripeConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

/// Optional overrides for [`StripeSettings`]; unset keys keep the defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct StripeConfig {
    pub max_width_px: Option<u32>,
    pub target_width_mm: Option<f64>,
    pub margin_mm: Option<f64>,
    pub stroke_width_mm: Option<f64>,
    pub subpixel_offsets: Option<[f64; 3]>,
    pub dash_steps: Option<u32>,
    pub dash_fill: Option<f64>,
    pub min_channel_cutoff: Option<u8>,
    pub gamma: Option<f64>,
}

impl StripeConfig {
    /// Apply the set keys on top of `base`.
    pub fn apply(&self, base: StripeSettings) -> StripeSettings {
        let mut s = base;
        if let Some(v) = self.max_width_px {
            s = s.max_width_px(v);
        }
        if let Some(v) = self.target_width_mm {
            s = s.target_width_mm(v);
        }
        if let Some(v) = self.margin_mm {
            s = s.margin_mm(v);
        }
        if let Some(v) = self.stroke_width_mm {
            s = s.stroke_width_mm(v);
        }
        if let Some(v) = self.subpixel_offsets {
            s = s.subpixel_offsets(v);
        }
        if let Some(v) = self.dash_steps {
            s = s.dash_steps(v);
        }
        if let Some(v) = self.dash_fill {
            s = s.dash_fill(v);
        }
        if let Some(v) = self.min_channel_cutoff {
            s = s.min_channel_cutoff(v);
        }
        if let Some(v) = self.gamma {
            s = s.gamma(v);
        }
        s
    }
}

/// Output file options
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Draw a black background rectangle
    #[serde(default = "default_background")]
    pub background: bool,

    /// Appended to the input stem when naming the SVG
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_background() -> bool {
    true
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            suffix: default_suffix(),
        }
    }
}

/// Per-run values from the command line. Set values win over the config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOverrides {
    pub gamma: Option<f64>,
    pub dash_steps: Option<u32>,
    pub max_width_px: Option<u32>,
    pub no_background: bool,
}

impl AppConfig {
    /// Load configuration from `path`, or from the embedded default when
    /// no path is given.
    ///
    /// A given path must exist and parse; there is no fallback to the
    /// embedded config in that case.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                let content =
                    assets::read_config_file(path).map_err(|source| ConfigError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Self::from_yaml(&content, path)?
            }
            None => {
                let content =
                    assets::embedded_config_string().map_err(|_| ConfigError::EmbeddedMissing)?;
                Self::from_yaml(&content, Path::new("<embedded config.yaml>"))?
            }
        };

        tracing::info!(
            source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
            background = config.output.background,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse a YAML document. `origin` is only used in error messages.
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Apply command line overrides on top of the loaded config.
    ///
    /// `no_background` can only switch the background off; it never turns
    /// it on when the config disabled it.
    pub fn with_overrides(mut self, overrides: &ConvertOverrides) -> Self {
        if let Some(gamma) = overrides.gamma {
            self.stripes.gamma = Some(gamma);
        }
        if let Some(steps) = overrides.dash_steps {
            self.stripes.dash_steps = Some(steps);
        }
        if let Some(width) = overrides.max_width_px {
            self.stripes.max_width_px = Some(width);
        }
        self.output.background = self.output.background && !overrides.no_background;
        self
    }

    /// Effective, validated stripe settings.
    pub fn settings(&self) -> Result<StripeSettings, ConfigError> {
        let settings = self.stripes.apply(StripeSettings::default());
        settings.validate()?;
        Ok(settings)
    }
}
