//! Stroke colors offered by the palette.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    #[default]
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 7] = [
        PaletteColor::Black,
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Yellow,
        PaletteColor::Purple,
        PaletteColor::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Black => "black",
            PaletteColor::Red => "red",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Purple => "purple",
            PaletteColor::Orange => "orange",
        }
    }

    /// sRGB triple using the usual named-color values
    pub fn rgb(self) -> [u8; 3] {
        match self {
            PaletteColor::Black => [0, 0, 0],
            PaletteColor::Red => [255, 0, 0],
            PaletteColor::Green => [0, 128, 0],
            PaletteColor::Blue => [0, 0, 255],
            PaletteColor::Yellow => [255, 255, 0],
            PaletteColor::Purple => [128, 0, 128],
            PaletteColor::Orange => [255, 165, 0],
        }
    }
}
