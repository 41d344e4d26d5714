use std::{borrow::Cow, fmt::Display};

use serde::Serializer;

/// A named entry of the classic console palette.
///
/// Dark colors map onto the 8 standard terminal colors, light colors onto
/// their bright counterparts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    Black,
    DarkRed,
    DarkGreen,
    Brown,
    DarkBlue,
    Purple,
    Teal,
    LightGray,

    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    Fuchsia,
    Turquoise,
    White,

    Reset,
    Bold,
    Faint,
    Standout,
    Underline,
    Blink,
}

impl Palette {
    pub const DARK_TEAL: Self = Self::Turquoise;
    pub const DARK_YELLOW: Self = Self::Brown;

    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkRed => "darkred",
            Self::DarkGreen => "darkgreen",
            Self::Brown => "brown",
            Self::DarkBlue => "darkblue",
            Self::Purple => "purple",
            Self::Teal => "teal",
            Self::LightGray => "lightgray",
            Self::DarkGray => "darkgray",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Fuchsia => "fuchsia",
            Self::Turquoise => "turquoise",
            Self::White => "white",
            Self::Reset => "reset",
            Self::Bold => "bold",
            Self::Faint => "faint",
            Self::Standout => "standout",
            Self::Underline => "underline",
            Self::Blink => "blink",
        }
    }

    pub fn style(self) -> yansi::Style {
        use yansi::{Color, Style};

        // the light colors are the bright half of the 16 color table
        let bright = |n: u8| Style::new(Color::Fixed(8 + n));
        match self {
            Self::Black => Style::new(Color::Black),
            Self::DarkRed => Style::new(Color::Red),
            Self::DarkGreen => Style::new(Color::Green),
            Self::Brown => Style::new(Color::Yellow),
            Self::DarkBlue => Style::new(Color::Blue),
            Self::Purple => Style::new(Color::Magenta),
            Self::Teal => Style::new(Color::Cyan),
            Self::LightGray => Style::new(Color::White),
            Self::DarkGray => bright(0),
            Self::Red => bright(1),
            Self::Green => bright(2),
            Self::Yellow => bright(3),
            Self::Blue => bright(4),
            Self::Fuchsia => bright(5),
            Self::Turquoise => bright(6),
            Self::White => bright(7),
            Self::Reset => Style::default(),
            Self::Bold => Style::default().bold(),
            Self::Faint => Style::default().dimmed(),
            Self::Standout => Style::default().italic(),
            Self::Underline => Style::default().underline(),
            Self::Blink => Style::default().blink(),
        }
    }

    pub fn paint<T>(self, item: T) -> yansi::Paint<T>
    where
        T: Display,
    {
        yansi::Paint::new(item).with_style(self.style())
    }
}

impl std::str::FromStr for Palette {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match &*s.trim().to_ascii_lowercase() {
            "black" => Self::Black,
            "darkred" => Self::DarkRed,
            "darkgreen" => Self::DarkGreen,
            "brown" | "darkyellow" => Self::Brown,
            "darkblue" => Self::DarkBlue,
            "purple" => Self::Purple,
            "teal" => Self::Teal,
            "lightgray" => Self::LightGray,
            "darkgray" => Self::DarkGray,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "fuchsia" | "fuscia" => Self::Fuchsia,
            "turquoise" | "darkteal" => Self::Turquoise,
            "white" => Self::White,
            "reset" | "normal" => Self::Reset,
            "bold" => Self::Bold,
            "faint" => Self::Faint,
            "standout" => Self::Standout,
            "underline" => Self::Underline,
            "blink" => Self::Blink,
            _ => return Err(crate::Error::UnknownStyle(s.to_string())),
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl std::str::FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use anyhow::Context as _;

        let s = s.trim();
        let s = match s.len() {
            7 if s.starts_with('#') => &s[1..],
            6 if s.chars().all(|c| c.is_ascii_hexdigit()) => s,
            _ => anyhow::bail!("invalid hex string"),
        };

        u32::from_str_radix(s, 16)
            .map(|s| {
                Self(
                    ((s >> 16) & 0xFF) as _,
                    ((s >> 8) & 0xFF) as _,
                    (s & 0xFF) as _,
                )
            })
            .with_context(|| "cannot parse hex string")
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(r, g, b) = self;
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// A theme entry: either a palette name or a `#RRGGBB` color
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorStyle {
    Palette(Palette),
    Rgb(Color),
}

impl ColorStyle {
    pub fn paint<T>(self, item: T) -> yansi::Paint<T>
    where
        T: Display,
    {
        match self {
            Self::Palette(palette) => palette.paint(item),
            Self::Rgb(Color(r, g, b)) => yansi::Paint::rgb(r, g, b, item),
        }
    }
}

impl From<Palette> for ColorStyle {
    fn from(palette: Palette) -> Self {
        Self::Palette(palette)
    }
}

impl std::str::FromStr for ColorStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().starts_with('#') {
            return s.parse().map(Self::Rgb);
        }
        s.parse().map(Self::Palette).map_err(Into::into)
    }
}

impl serde::Serialize for ColorStyle {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Palette(palette) => ser.serialize_str(palette.name()),
            Self::Rgb(Color(r, g, b)) => {
                ser.collect_str(&format_args!("#{:02X}{:02X}{:02X}", r, g, b))
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for ColorStyle {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Cow<'de, str>>::deserialize(de)?
            .parse()
            .map_err(|err| serde::de::Error::custom(format!("invalid style: {err}")))
    }
}
