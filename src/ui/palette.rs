use crossterm::style::Color;

/// Every palette carries exactly this many colours; it also caps how many
/// report lines a scan inspects.
pub const PALETTE_LEN: usize = 5;

/// Parse a `#rrggbb` token into a terminal colour.
pub fn hex_color(token: &str) -> Option<Color> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 { return None; }
    let v = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb {
        r: ((v >> 16) & 0xFF) as u8,
        g: ((v >>  8) & 0xFF) as u8,
        b: ( v        & 0xFF) as u8,
    })
}

// ── Palette variant selector ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaletteVariant {
    Mocha,
    Macchiato,
    Frappe,
    Latte,
}

impl PaletteVariant {
    pub const ALL: [PaletteVariant; 4] = [
        PaletteVariant::Mocha,
        PaletteVariant::Macchiato,
        PaletteVariant::Frappe,
        PaletteVariant::Latte,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mocha     => "mocha",
            Self::Macchiato => "macchiato",
            Self::Frappe    => "frappe",
            Self::Latte     => "latte",
        }
    }

    /// Whether `name` selects a variant rather than falling back.
    pub fn is_known(name: &str) -> bool {
        let lower = name.to_lowercase();
        lower == "frappé" || Self::ALL.iter().any(|v| v.name() == lower)
    }

    /// Unknown names fall back to Mocha, the widget's stock palette.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "macchiato"         => Self::Macchiato,
            "frappe" | "frappé" => Self::Frappe,
            "latte"             => Self::Latte,
            _                   => Self::Mocha,
        }
    }
}

// ── Palette ─────────────────────────────────────────────────────────────

/// Ordered colour tokens assigned to disk records by line position.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub variant: PaletteVariant,
    colors:      [&'static str; PALETTE_LEN],
}

impl Default for Palette {
    fn default() -> Self { Self::for_variant(PaletteVariant::Mocha) }
}

impl Palette {
    pub fn for_variant(v: PaletteVariant) -> Self {
        // Catppuccin accents, in order: mauve, peach, blue, green, red
        let colors = match v {
            PaletteVariant::Mocha     => ["#cba6f7", "#fab387", "#89b4fa", "#a6e3a1", "#f38ba8"],
            PaletteVariant::Macchiato => ["#c6a0f6", "#f5a97f", "#8aadf4", "#a6da95", "#ed8796"],
            PaletteVariant::Frappe    => ["#ca9ee6", "#ef9f76", "#8caaee", "#a6d189", "#e78284"],
            PaletteVariant::Latte     => ["#8839ef", "#fe640b", "#1e66f5", "#40a02b", "#d20f39"],
        };
        Self { variant: v, colors }
    }

    pub fn len(&self) -> usize { self.colors.len() }

    /// Colour for the line at raw index `i`, cycling through the palette.
    pub fn color_for(&self, i: usize) -> &'static str {
        self.colors[i % self.colors.len()]
    }

    pub fn colors(&self) -> &[&'static str] { &self.colors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mocha_in_widget_order() {
        let p = Palette::default();
        assert_eq!(p.variant, PaletteVariant::Mocha);
        assert_eq!(p.colors(), &["#cba6f7", "#fab387", "#89b4fa", "#a6e3a1", "#f38ba8"]);
    }

    #[test]
    fn every_variant_has_five_valid_colors() {
        for v in PaletteVariant::ALL {
            let p = Palette::for_variant(v);
            assert_eq!(p.len(), PALETTE_LEN);
            for c in p.colors() {
                assert!(hex_color(c).is_some(), "{} in {} is not #rrggbb", c, v.name());
            }
        }
    }

    #[test]
    fn color_for_cycles_by_index() {
        let p = Palette::default();
        assert_eq!(p.color_for(0), "#cba6f7");
        assert_eq!(p.color_for(4), "#f38ba8");
        assert_eq!(p.color_for(5), "#cba6f7");
        assert_eq!(p.color_for(7), "#89b4fa");
    }

    #[test]
    fn from_name_round_trips_and_falls_back() {
        for v in PaletteVariant::ALL {
            assert_eq!(PaletteVariant::from_name(v.name()), v);
        }
        assert_eq!(PaletteVariant::from_name("LATTE"), PaletteVariant::Latte);
        assert_eq!(PaletteVariant::from_name("solarized"), PaletteVariant::Mocha);
    }

    #[test]
    fn known_names() {
        assert!(PaletteVariant::is_known("Macchiato"));
        assert!(PaletteVariant::is_known("frappé"));
        assert!(!PaletteVariant::is_known("solarized"));
        assert!(!PaletteVariant::is_known(""));
    }

    #[test]
    fn hex_color_parses_rgb() {
        assert_eq!(hex_color("#cba6f7"), Some(Color::Rgb { r: 0xcb, g: 0xa6, b: 0xf7 }));
        assert_eq!(hex_color("cba6f7"), None);
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
    }
}
