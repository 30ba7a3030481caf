use ggez::graphics::Color;
use hsl::HSL;

lazy_static! {
    static ref DEFAULT_BACKGROUND_COLOR: Color = Color::from_rgb(24, 24, 28);
    static ref DEFAULT_BOARD_COLOR: Color = Color::from_rgb(40, 40, 46);
    static ref DEFAULT_BORDER_COLOR: Color = Color::from_rgb(90, 90, 100);
    static ref DEFAULT_FOOD_COLOR: Color = Color::from_rgb(255, 0, 128);
    static ref DEFAULT_TEXT_COLOR: Color = Color::from_rgb(230, 230, 230);
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub background_color: Color,
    pub board_color: Color,
    pub border_color: Color,
    pub food_color: Color,
    pub text_color: Color,

    // the snake fades from head_hue to tail_hue
    pub head_hue: f64,
    pub tail_hue: f64,
    pub lightness: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_color: *DEFAULT_BACKGROUND_COLOR,
            board_color: *DEFAULT_BOARD_COLOR,
            border_color: *DEFAULT_BORDER_COLOR,
            food_color: *DEFAULT_FOOD_COLOR,
            text_color: *DEFAULT_TEXT_COLOR,

            head_hue: 120.,
            tail_hue: 200.,
            lightness: 0.5,
        }
    }
}

impl Palette {
    /// `seg_idx` counts from the head
    pub fn segment_color(&self, seg_idx: usize, len: usize) -> Color {
        let ratio = if len > 1 {
            seg_idx as f64 / (len - 1) as f64
        } else {
            0.
        };
        let hsl = HSL {
            h: self.head_hue + (self.tail_hue - self.head_hue) * ratio,
            s: 1.,
            l: self.lightness,
        };
        Color::from(hsl.to_rgb())
    }
}

#[test]
fn test_gradient_ends() {
    let palette = Palette::default();
    let head = |hue| Color::from(HSL { h: hue, s: 1., l: 0.5 }.to_rgb());
    assert_eq!(palette.segment_color(0, 1), head(120.));
    assert_eq!(palette.segment_color(0, 5), head(120.));
    assert_eq!(palette.segment_color(4, 5), head(200.));
}
