use font8x8::UnicodeFonts;

pub const GLYPH_SIZE: i32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// Which point of the text box the anchor coordinates name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Align {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

impl Align {
    pub const TOP_LEFT: Self = Self::new(HAlign::Left, VAlign::Top);
    pub const TOP_CENTER: Self = Self::new(HAlign::Center, VAlign::Top);

    pub const fn new(horizontal: HAlign, vertical: VAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Top-left corner of a `width` x `height` box anchored at `(x, y)`.
    pub fn origin(self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        let left = match self.horizontal {
            HAlign::Left => x,
            HAlign::Center => x - width / 2,
            HAlign::Right => x - width,
        };
        let top = match self.vertical {
            VAlign::Top => y,
            VAlign::Middle => y - height / 2,
            VAlign::Bottom => y - height,
        };
        (left, top)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// Double-struck glyphs for screen titles.
    Heading,
    Body,
}

impl Font {
    /// Pixel width of `text` set in this font.
    pub fn text_width(self, text: &str) -> i32 {
        let glyphs = text.chars().count() as i32 * GLYPH_SIZE;
        match self {
            Self::Heading if glyphs > 0 => glyphs + 1,
            _ => glyphs,
        }
    }
}

/// 1-bit image with rows packed MSB-left; at most 16 pixels wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u8,
    pub height: u8,
    pub rows: &'static [u16],
}

impl Bitmap {
    #[inline]
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        x < self.width
            && self
                .rows
                .get(y as usize)
                .is_some_and(|row| row & (0x8000u16 >> x) != 0)
    }
}

/// Drawing surface the view renders onto. Coordinates are signed so that
/// aligned text may start off-screen; implementations clip.
pub trait Canvas {
    fn clear(&mut self);

    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        for row in 0..bitmap.height {
            for col in 0..bitmap.width {
                if bitmap.pixel(col, row) {
                    self.set_pixel(x + col as i32, y + row as i32, true);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, align: Align, font: Font) {
        let width = font.text_width(text);
        let (left, top) = align.origin(x, y, width, GLYPH_SIZE);
        let strikes: &[i32] = match font {
            Font::Heading => &[0, 1],
            Font::Body => &[0],
        };

        for (i, c) in text.chars().enumerate() {
            let glyph = font8x8::BASIC_FONTS
                .get(c)
                .or_else(|| font8x8::BASIC_FONTS.get('?'))
                .unwrap_or([0; 8]);
            let gx = left + i as i32 * GLYPH_SIZE;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    // font8x8 rows are LSB-left
                    if (bits >> col) & 1 == 1 {
                        for dx in strikes {
                            self.set_pixel(gx + col + dx, top + row as i32, true);
                        }
                    }
                }
            }
        }
    }
}
