use super::{ColorStyle, Palette};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    /// the source path in the header
    pub file: ColorStyle,
    /// the `Type.function` qualifier in the header
    pub caller: ColorStyle,
    /// a single reported message
    pub payload: ColorStyle,

    pub label: ColorStyle,
    pub line: ColorStyle,
}

impl Theme {
    pub fn standard() -> Self {
        Self {
            file: Palette::DarkBlue.into(),
            caller: Palette::Blue.into(),
            payload: Palette::DARK_TEAL.into(),

            label: Palette::Red.into(),
            line: Palette::Red.into(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}
