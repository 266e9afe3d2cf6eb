//! Icons shown next to the menu and pause screen text.

use super::canvas::Bitmap;

pub const CROSS: Bitmap = Bitmap {
    width: 7,
    height: 7,
    rows: &[
        0b1000_0010_0000_0000,
        0b0100_0100_0000_0000,
        0b0010_1000_0000_0000,
        0b0001_0000_0000_0000,
        0b0010_1000_0000_0000,
        0b0100_0100_0000_0000,
        0b1000_0010_0000_0000,
    ],
};

pub const CHECK: Bitmap = Bitmap {
    width: 8,
    height: 6,
    rows: &[
        0b0000_0001_0000_0000,
        0b0000_0010_0000_0000,
        0b0000_0100_0000_0000,
        0b1000_1000_0000_0000,
        0b0101_0000_0000_0000,
        0b0010_0000_0000_0000,
    ],
};

pub const BADGE_DASHBOARD: Bitmap = Bitmap {
    width: 14,
    height: 14,
    rows: &[
        0b0011_1111_1111_0000,
        0b0100_0000_0000_1000,
        0b1000_0000_0000_0100,
        0b1000_0000_1110_0100,
        0b1000_0000_1010_0100,
        0b1000_1000_1010_0100,
        0b1001_1000_1010_0100,
        0b1011_1111_1010_0100,
        0b1001_1000_1010_0100,
        0b1000_1000_1010_0100,
        0b1000_0000_1110_0100,
        0b1000_0000_0000_0100,
        0b0100_0000_0000_1000,
        0b0011_1111_1111_0000,
    ],
};

pub const BADGE_CROSS: Bitmap = Bitmap {
    width: 14,
    height: 14,
    rows: &[
        0b0011_1111_1111_0000,
        0b0100_0000_0000_1000,
        0b1000_0000_0000_0100,
        0b1001_0000_0010_0100,
        0b1000_1000_0100_0100,
        0b1000_0100_1000_0100,
        0b1000_0011_0000_0100,
        0b1000_0011_0000_0100,
        0b1000_0100_1000_0100,
        0b1000_1000_0100_0100,
        0b1001_0000_0010_0100,
        0b1000_0000_0000_0100,
        0b0100_0000_0000_1000,
        0b0011_1111_1111_0000,
    ],
};
