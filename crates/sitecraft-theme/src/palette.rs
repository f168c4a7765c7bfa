//! Color palettes for the named color schemes.
//!
//! Each scheme maps every [`PaletteRole`] to one color. A palette is written
//! to the surface as `--color-<role>` (hex) plus `--color-<role>-rgb`
//! (comma-separated channels, for `rgb(var(--color-primary-rgb) / 0.5)`).

use std::fmt;

use sitecraft_config::ColorScheme;

use crate::values::ValueTable;

// =============================================================================
// RGB
// =============================================================================

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a `0xRRGGBB` literal.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Parse `#rgb` or `#rrggbb`, case-insensitive. The `#` is required.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.trim().strip_prefix('#')?;
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let expand = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }

    /// `r, g, b` channel triple.
    pub fn channels(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    /// Lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// =============================================================================
// ROLES
// =============================================================================

/// Semantic slot in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteRole {
    Primary,
    PrimaryDark,
    Secondary,
    Accent,
    Background,
    Surface,
    Text,
    TextMuted,
    Border,
}

impl PaletteRole {
    pub const COUNT: usize = 9;

    pub const ALL: [PaletteRole; Self::COUNT] = [
        PaletteRole::Primary,
        PaletteRole::PrimaryDark,
        PaletteRole::Secondary,
        PaletteRole::Accent,
        PaletteRole::Background,
        PaletteRole::Surface,
        PaletteRole::Text,
        PaletteRole::TextMuted,
        PaletteRole::Border,
    ];

    /// Hex variable name.
    pub const fn variable(&self) -> &'static str {
        match self {
            PaletteRole::Primary => "--color-primary",
            PaletteRole::PrimaryDark => "--color-primary-dark",
            PaletteRole::Secondary => "--color-secondary",
            PaletteRole::Accent => "--color-accent",
            PaletteRole::Background => "--color-background",
            PaletteRole::Surface => "--color-surface",
            PaletteRole::Text => "--color-text",
            PaletteRole::TextMuted => "--color-text-muted",
            PaletteRole::Border => "--color-border",
        }
    }

    /// Channel-triple variable name.
    pub const fn rgb_variable(&self) -> &'static str {
        match self {
            PaletteRole::Primary => "--color-primary-rgb",
            PaletteRole::PrimaryDark => "--color-primary-dark-rgb",
            PaletteRole::Secondary => "--color-secondary-rgb",
            PaletteRole::Accent => "--color-accent-rgb",
            PaletteRole::Background => "--color-background-rgb",
            PaletteRole::Surface => "--color-surface-rgb",
            PaletteRole::Text => "--color-text-rgb",
            PaletteRole::TextMuted => "--color-text-muted-rgb",
            PaletteRole::Border => "--color-border-rgb",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// PALETTES
// =============================================================================

/// Colors for one scheme, indexed by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub scheme: ColorScheme,
    colors: [Rgb; PaletteRole::COUNT],
}

impl Palette {
    /// The palette for `scheme`.
    pub const fn for_scheme(scheme: ColorScheme) -> Palette {
        let colors = match scheme {
            ColorScheme::Ocean => OCEAN,
            ColorScheme::Forest => FOREST,
            ColorScheme::Sunset => SUNSET,
            ColorScheme::Slate => SLATE,
            ColorScheme::Berry => BERRY,
        };
        Palette { scheme, colors }
    }

    pub const fn get(&self, role: PaletteRole) -> Rgb {
        self.colors[role.index()]
    }

    /// Hex and channel variables for every role.
    pub fn variables(&self) -> ValueTable {
        let mut table = ValueTable::with_capacity(PaletteRole::COUNT * 2);
        for role in PaletteRole::ALL {
            let color = self.get(role);
            table.push(role.variable(), color.to_string());
            table.push(role.rgb_variable(), color.channels());
        }
        table
    }
}

// Order follows `PaletteRole::ALL`.
const OCEAN: [Rgb; PaletteRole::COUNT] = [
    Rgb::from_u32(0x0ea5e9),
    Rgb::from_u32(0x0369a1),
    Rgb::from_u32(0x0f766e),
    Rgb::from_u32(0xf59e0b),
    Rgb::from_u32(0xffffff),
    Rgb::from_u32(0xf0f9ff),
    Rgb::from_u32(0x0f172a),
    Rgb::from_u32(0x64748b),
    Rgb::from_u32(0xe2e8f0),
];

const FOREST: [Rgb; PaletteRole::COUNT] = [
    Rgb::from_u32(0x16a34a),
    Rgb::from_u32(0x166534),
    Rgb::from_u32(0x65a30d),
    Rgb::from_u32(0xea580c),
    Rgb::from_u32(0xffffff),
    Rgb::from_u32(0xf0fdf4),
    Rgb::from_u32(0x14532d),
    Rgb::from_u32(0x4b5563),
    Rgb::from_u32(0xd1fae5),
];

const SUNSET: [Rgb; PaletteRole::COUNT] = [
    Rgb::from_u32(0xf97316),
    Rgb::from_u32(0xc2410c),
    Rgb::from_u32(0xe11d48),
    Rgb::from_u32(0xfacc15),
    Rgb::from_u32(0xfffbf5),
    Rgb::from_u32(0xfff7ed),
    Rgb::from_u32(0x431407),
    Rgb::from_u32(0x78716c),
    Rgb::from_u32(0xfed7aa),
];

const SLATE: [Rgb; PaletteRole::COUNT] = [
    Rgb::from_u32(0x475569),
    Rgb::from_u32(0x1e293b),
    Rgb::from_u32(0x64748b),
    Rgb::from_u32(0x0ea5e9),
    Rgb::from_u32(0xffffff),
    Rgb::from_u32(0xf8fafc),
    Rgb::from_u32(0x0f172a),
    Rgb::from_u32(0x64748b),
    Rgb::from_u32(0xcbd5e1),
];

const BERRY: [Rgb; PaletteRole::COUNT] = [
    Rgb::from_u32(0xa21caf),
    Rgb::from_u32(0x701a75),
    Rgb::from_u32(0xdb2777),
    Rgb::from_u32(0x14b8a6),
    Rgb::from_u32(0xffffff),
    Rgb::from_u32(0xfdf4ff),
    Rgb::from_u32(0x3b0764),
    Rgb::from_u32(0x6b7280),
    Rgb::from_u32(0xf5d0fe),
];
