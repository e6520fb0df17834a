use std::fmt;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Darkens red and green by 5%, keeping blue and alpha, for sides facing X+ and X-.
    pub fn side_shaded(self) -> Self {
        Self {
            r: (self.r as f32 * 0.95) as u8,
            g: (self.g as f32 * 0.95) as u8,
            ..self
        }
    }

    /// Palette color for a cell code; unknown codes are transparent.
    pub fn from_code(code: u8) -> Self {
        PALETTE
            .get(code as usize)
            .copied()
            .unwrap_or(Rgba::TRANSPARENT)
    }
}

impl fmt::UpperHex for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Wall colors indexed by cell code. Code 0 is empty space.
pub const PALETTE: [Rgba; 8] = [
    Rgba::new(0, 0, 0, 0),         // none
    Rgba::new(192, 224, 255, 255), // white
    Rgba::new(255, 128, 128, 255), // red
    Rgba::new(128, 255, 128, 255), // green
    Rgba::new(128, 128, 255, 255), // blue
    Rgba::new(255, 255, 128, 255), // yellow
    Rgba::new(128, 255, 255, 255), // cyan
    Rgba::new(255, 128, 255, 255), // purple
];
