use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    caller::DEFAULT_MAX_PATH_SEGMENTS,
    render::{ColorMode, Theme},
    reporter::DEFAULT_SKIP_FRAMES,
    width::{stdout_is_terminal, DEFAULT_REFRESH_SECONDS, DEFAULT_WIDTH},
    TerminalWidth,
};

#[derive(Default, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Colors {
    pub mode: ColorMode,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Terminal {
    pub fallback_width: usize,
    pub refresh_seconds: i64,
}

impl Default for Terminal {
    fn default() -> Self {
        Self {
            fallback_width: DEFAULT_WIDTH,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
        }
    }
}

impl Terminal {
    pub fn width(&self) -> TerminalWidth {
        TerminalWidth::new(
            stdout_is_terminal(),
            self.fallback_width,
            chrono::Duration::seconds(self.refresh_seconds.max(0)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Report {
    pub skip_frames: usize,
    pub max_path_segments: usize,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            skip_frames: DEFAULT_SKIP_FRAMES,
            max_path_segments: DEFAULT_MAX_PATH_SEGMENTS,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct Config {
    pub colors: Colors,
    pub appearance: Theme,
    pub terminal: Terminal,
    pub report: Report,
}

impl Config {
    const NAMESPACE: &'static str = "museun";
    const APPLICATION: &'static str = "report";

    const DEFAULT_CONFIG: &'static str = r##"
[colors]
# auto: only when stdout is a terminal and NO_COLOR is not set
# one of: auto | always | never
mode = "auto"

[appearance]
# a palette name or a hex color like "#3B78FF"
# palette: black darkred darkgreen brown darkblue purple teal lightgray
#          darkgray red green yellow blue fuchsia turquoise white
#          (darkteal, darkyellow and fuscia are aliases)
file    = "darkblue"
caller  = "blue"
payload = "turquoise"
label   = "red"
line    = "red"

[terminal]
# used when the width of the terminal cannot be determined
fallback_width  = 80
# how long a measured width is trusted
refresh_seconds = 10

[report]
skip_frames       = 3
max_path_segments = 4
"##;

    pub fn get_config_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|f| f.join("config.toml"))
    }

    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|f| f.join(Self::NAMESPACE).join(Self::APPLICATION))
    }

    /// Loads the user's configuration, or the defaults if there is none
    pub fn load() -> anyhow::Result<Self> {
        match Self::get_config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        toml::from_str(&data).with_context(|| format!("cannot parse '{}'", path.display()))
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            log::warn!("using the default configuration: {err:#}");
            Self::default()
        })
    }

    pub fn make_default_config() -> anyhow::Result<PathBuf> {
        let dir = Self::get_config_dir().with_context(|| "cannot find config directory")?;
        std::fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        std::fs::write(&path, Self::default_formatted_toml())?;
        Ok(path)
    }

    pub const fn default_formatted_toml() -> &'static str {
        Self::DEFAULT_CONFIG
    }
}
