//! Slide geometry in English Metric Units.

pub const EMU_PER_INCH: i64 = 914_400;

/// Length of `tenths` tenths of an inch.
pub const fn tenths_of_inch(tenths: i64) -> i64 {
    tenths * EMU_PER_INCH / 10
}

/// Font size in hundredths of a point, as DrawingML expects.
pub const fn points(pt: u32) -> u32 {
    pt * 100
}

pub const SLIDE_WIDTH: i64 = tenths_of_inch(100);
pub const SLIDE_HEIGHT: i64 = tenths_of_inch(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

pub const IMAGE_TITLE_FRAME: Frame = Frame {
    x: tenths_of_inch(5),
    y: tenths_of_inch(5),
    cx: tenths_of_inch(90),
    cy: tenths_of_inch(8),
};

pub const CAPTION_FRAME: Frame = Frame {
    x: tenths_of_inch(10),
    y: tenths_of_inch(65),
    cx: tenths_of_inch(80),
    cy: tenths_of_inch(5),
};

pub const PICTURE_LEFT: i64 = tenths_of_inch(10);
pub const PICTURE_TOP: i64 = tenths_of_inch(15);
pub const PICTURE_WIDTH: i64 = tenths_of_inch(80);

pub const BODY_FONT_SIZE: u32 = points(18);
pub const IMAGE_TITLE_FONT_SIZE: u32 = points(32);
pub const CAPTION_FONT_SIZE: u32 = points(14);

/// Frame for a picture of `width_px` x `height_px` pixels at the fixed width,
/// height scaled to keep the aspect ratio.
pub fn picture_frame(width_px: u32, height_px: u32) -> Frame {
    let cy = if width_px == 0 {
        PICTURE_WIDTH
    } else {
        PICTURE_WIDTH * i64::from(height_px) / i64::from(width_px)
    };
    Frame {
        x: PICTURE_LEFT,
        y: PICTURE_TOP,
        cx: PICTURE_WIDTH,
        cy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_is_ten_by_seven_and_a_half_inches() {
        assert_eq!(SLIDE_WIDTH, 9_144_000);
        assert_eq!(SLIDE_HEIGHT, 6_858_000);
    }

    #[test]
    fn picture_height_follows_aspect_ratio() {
        let wide = picture_frame(1600, 800);
        assert_eq!(wide.cx, 7_315_200);
        assert_eq!(wide.cy, 3_657_600);
        assert_eq!((wide.x, wide.y), (914_400, 1_371_600));

        let square = picture_frame(500, 500);
        assert_eq!(square.cy, square.cx);
    }
}
