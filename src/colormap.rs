//! Scalar-to-color mapping with named palettes.
//!
//! Discrete palettes pick a stop by flooring the normalized value, so the
//! lowest value of the domain always hits the first stop and the highest value
//! hits the last stop exactly. A few palettes are computed instead of looked up.

use crate::render::Color;

/// A named color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    /// Grayscale ramp from black to white.
    BlackWhite,
    /// Red to yellow to blue blend.
    RdYlBu,
    /// Ten-stop qualitative palette.
    Qualitative10,
    YlGn,
    RdYlGn,
    GnBu,
    YlGnBu,
    Spectral,
    BrBg,
    YlOrBr,
    RdBu,
    RdPu,
    Plasma,
    PuOr,
    BuPu,
    Reds,
    Viridis,
    QBlGrRd,
    Magma,
    PiYG,
    /// A single fixed color; the scalar is ignored.
    Constant,
    /// Full-saturation hue sweep.
    Rainbow,
}

const NAMED: [(&str, Palette); 21] = [
    ("Black to white", Palette::BlackWhite),
    ("RdYlBu", Palette::RdYlBu),
    ("qualitative", Palette::Qualitative10),
    ("YlGn", Palette::YlGn),
    ("RdYlGn", Palette::RdYlGn),
    ("GnBu", Palette::GnBu),
    ("YlGnBu", Palette::YlGnBu),
    ("Spectral", Palette::Spectral),
    ("BrBG", Palette::BrBg),
    ("YlOrBr", Palette::YlOrBr),
    ("RdBu", Palette::RdBu),
    ("RdPu", Palette::RdPu),
    ("Plasma", Palette::Plasma),
    ("PuOr", Palette::PuOr),
    ("BuPu", Palette::BuPu),
    ("Reds", Palette::Reds),
    ("Viridis", Palette::Viridis),
    ("Q_BlGrRd", Palette::QBlGrRd),
    ("Magma", Palette::Magma),
    ("PiYG", Palette::PiYG),
    ("Rainbow", Palette::Rainbow),
];

impl Palette {
    /// Look up a palette by its display name.
    ///
    /// Matching is exact and case-sensitive. Unknown names yield
    /// [`Palette::Constant`].
    pub fn from_name(name: &str) -> Self {
        NAMED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map_or(Self::Constant, |(_, palette)| *palette)
    }

    /// Display name of the palette.
    pub fn name(self) -> &'static str {
        NAMED
            .iter()
            .find(|(_, palette)| *palette == self)
            .map_or("Constant", |(name, _)| *name)
    }

    /// All palettes reachable by name, in menu order.
    pub fn all() -> impl Iterator<Item = Self> {
        NAMED.iter().map(|(_, palette)| *palette)
    }

    /// Discrete stops as packed `0xRRGGBB`, or `None` for computed palettes.
    pub fn stops(self) -> Option<&'static [u32]> {
        let stops: &'static [u32] = match self {
            Self::Qualitative10 => &[
                0x8dd3c7, 0xffffb3, 0xbebada, 0xfb8072, 0x80b1d3, 0xfdb462, 0xb3de69, 0xfccde5,
                0xd9d9d9, 0xbc80bd,
            ],
            Self::YlGn => &[
                0xffffe5, 0xf7fcb9, 0xd9f0a3, 0xaddd8e, 0x78c679, 0x41ab5d, 0x238443, 0x006837,
                0x004529,
            ],
            Self::RdYlGn => &[
                0xa50026, 0xd73027, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xd9ef8b, 0xa6d96a,
                0x66bd63, 0x1a9850, 0x006837,
            ],
            Self::GnBu => &[
                0xf7fcf0, 0xe0f3db, 0xccebc5, 0xa8ddb5, 0x7bccc4, 0x4eb3d3, 0x2b8cbe, 0x0868ac,
                0x084081,
            ],
            Self::YlGnBu => &[
                0xffffd9, 0xedf8b1, 0xc7e9b4, 0x7fcdbb, 0x41b6c4, 0x1d91c0, 0x225ea8, 0x253494,
                0x081d58,
            ],
            Self::Spectral => &[
                0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xe6f598, 0xabdda4, 0x66c2a5,
                0x3288bd, 0x5e4fa2, 0x000000,
            ],
            Self::BrBg => &[
                0x543005, 0x8c510a, 0xbf812d, 0xdfc27d, 0xf6e8c3, 0xf5f5f5, 0xc7eae5, 0x80cdc1,
                0x35978f, 0x01665e, 0x003c30,
            ],
            Self::YlOrBr => &[
                0xffffe5, 0xfff7bc, 0xfee391, 0xfec44f, 0xfe9929, 0xec7014, 0xcc4c02, 0x993404,
                0x662506,
            ],
            Self::RdBu => &[
                0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xf7f7f7, 0x92c5de, 0x4393c3, 0x2166ac,
                0x053061, 0xffffff, 0x000000,
            ],
            Self::RdPu => &[
                0xfff7f3, 0xfde0dd, 0xfcc5c0, 0xfa9fb5, 0xf768a1, 0xdd3497, 0xae017e, 0x7a0177,
                0x49006a,
            ],
            Self::Plasma => &[
                0x0d0887, 0x5b02a3, 0x9a179b, 0xcb4679, 0xed7953, 0xfb9f3a, 0xfdca26, 0xf0f921,
                0xffffff,
            ],
            Self::PuOr => &[
                0x7f3b08, 0xb35806, 0xe08214, 0xfdb863, 0xfee0b6, 0xf7f7f7, 0xd8daeb, 0xb2abd2,
                0x8073ac, 0x542788, 0x2d004b,
            ],
            Self::BuPu => &[
                0xf7fcfd, 0xe0ecf4, 0xbfd3e6, 0x9ebcda, 0x8c96c6, 0x8c6bb1, 0x88419d, 0x810f7c,
                0x4d004b,
            ],
            Self::Reds => &[
                0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15,
                0x67000d,
            ],
            Self::Viridis => &[
                0x440154, 0x482777, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58,
                0xb5de2b,
            ],
            Self::QBlGrRd => &[
                0x40004b, 0x762a83, 0x9970ab, 0xc2a5cf, 0xe7d4e8, 0xd9f0d3, 0xa6dba0, 0x5aae61,
                0x1b7837,
            ],
            Self::Magma => &[
                0x000004, 0x1c1044, 0x51127c, 0x833790, 0xb63679, 0xee605e, 0xfb8761, 0xf9c86a,
                0xfcfdbf,
            ],
            Self::PiYG => &[
                0x8e0152, 0xc51b7d, 0xde77ae, 0xf1b6da, 0xfde0ef, 0xf7f7f7, 0xe6f5d0, 0xb8e186,
                0x7fbc41, 0x4d9221, 0x276419,
            ],
            Self::BlackWhite | Self::RdYlBu | Self::Constant | Self::Rainbow => return None,
        };
        Some(stops)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::Constant
    }
}

/// Color used by [`Palette::Constant`]: HSL(240°, 175, 159).
pub fn constant_color() -> Color {
    Color::from_hsl8(240.0, 175, 159)
}

/// Normalize `value` into `[0, 1]` against `[min, max]`.
///
/// A zero-width domain normalizes to 0. Non-finite results also map to 0.
pub fn normalize_scalar(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    let t = if span != 0.0 { (value - min) / span } else { 0.0 };
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Map a scalar to a color using `palette` over the domain `[min, max]`.
pub fn color_at(value: f64, palette: Palette, min: f64, max: f64) -> Color {
    let t = normalize_scalar(value, min, max);
    if let Some(stops) = palette.stops() {
        let last = stops.len() - 1;
        let index = ((t * last as f64).floor() as usize).min(last);
        return Color::from_rgb_u32(stops[index]);
    }
    let t = t as f32;
    match palette {
        Palette::BlackWhite => Color::new(t, t, t, 1.0),
        Palette::Constant => constant_color(),
        Palette::RdYlBu => {
            if t < 0.5 {
                Color::new(1.0, t * 2.0, 0.0, 1.0)
            } else {
                let s = (t - 0.5) * 2.0;
                Color::new(1.0 - s, 1.0 - s, s, 1.0)
            }
        }
        _ => Color::from_hsv(t, 1.0, 1.0),
    }
}
