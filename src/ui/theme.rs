/// Visual skins for the render form
///
/// Both skins drive the exact same form; only colours and copy differ.

use iced::theme::Palette;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    /// Near-black background with blue/purple accents
    #[default]
    Midnight,
    /// Cream, olive and terracotta
    Atelier,
}

impl Skin {
    pub fn name(self) -> &'static str {
        match self {
            Skin::Midnight => "Midnight",
            Skin::Atelier => "Atelier",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Skin::Midnight => "AI Architect",
            Skin::Atelier => "Atelier Render",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Skin::Midnight => {
                "Transform sketches into photorealistic architectural visualizations using advanced AI."
            }
            Skin::Atelier => "From the architect's hand to a finished render, in a single stroke.",
        }
    }

    /// The other skin, for the header toggle
    pub fn toggled(self) -> Self {
        match self {
            Skin::Midnight => Skin::Atelier,
            Skin::Atelier => Skin::Midnight,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Skin::Midnight => Palette {
                background: Color::from_rgb8(0x0A, 0x0A, 0x0A),
                text: Color::from_rgb8(0xF5, 0xF5, 0xF5),
                primary: Color::from_rgb8(0x3B, 0x82, 0xF6),
                success: Color::from_rgb8(0xA8, 0x55, 0xF7),
                danger: Color::from_rgb8(0xF8, 0x71, 0x71),
            },
            Skin::Atelier => Palette {
                background: Color::from_rgb8(0xF5, 0xF2, 0xEA),
                text: Color::from_rgb8(0x2C, 0x2C, 0x2C),
                primary: Color::from_rgb8(0x55, 0x6B, 0x2F),
                success: Color::from_rgb8(0xD4, 0xAF, 0x37),
                danger: Color::from_rgb8(0xC1, 0x7C, 0x5D),
            },
        }
    }

    pub fn theme(self) -> Theme {
        Theme::custom(self.name().to_string(), self.palette())
    }
}

impl FromStr for Skin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "midnight" | "dark" => Ok(Skin::Midnight),
            "atelier" | "italian" | "light" => Ok(Skin::Atelier),
            other => Err(format!("unknown skin '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skin() {
        assert_eq!("Midnight".parse::<Skin>(), Ok(Skin::Midnight));
        assert_eq!(" italian ".parse::<Skin>(), Ok(Skin::Atelier));
        assert!("neon".parse::<Skin>().is_err());
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Skin::Midnight.toggled(), Skin::Atelier);
        assert_eq!(Skin::Midnight.toggled().toggled(), Skin::Midnight);
    }

    #[test]
    fn test_skins_differ_only_in_presentation() {
        assert_ne!(Skin::Midnight.palette(), Skin::Atelier.palette());
        assert_ne!(Skin::Midnight.title(), Skin::Atelier.title());
    }
}
