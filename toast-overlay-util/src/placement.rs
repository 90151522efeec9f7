//! Screen-relative geometry of the card overlay.
//!
//! Rectangles follow the inclusive-edge convention of desktop screen APIs:
//! `right()` and `bottom()` name the last column and row inside the rect.

use toast_overlay_config::ToastConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn right(&self) -> i32 {
        last_inside(self.x, self.width)
    }

    pub const fn bottom(&self) -> i32 {
        last_inside(self.y, self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Inclusive far edge, saturated to the `i32` range.
const fn last_inside(origin: i32, extent: i32) -> i32 {
    let edge = origin as i64 + extent as i64 - 1;
    if edge > i32::MAX as i64 {
        i32::MAX
    } else if edge < i32::MIN as i64 {
        i32::MIN
    } else {
        edge as i32
    }
}

/// How the overlay rectangle tracks the card stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Top-right, spanning the whole available height.
    Fixed,
    /// Bottom-right, exactly as tall as the stack and growing upward.
    Dynamic,
}

/// Overlay metrics derived from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub sizing: Sizing,
    pub width: i32,
    pub card_height: i32,
    pub gap: i32,
    pub inset: i32,
    pub margin: i32,
    pub headroom: i32,
}

impl Placement {
    pub fn from_config(config: &ToastConfig) -> Self {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self {
            sizing: if config.fixed_height_overlay {
                Sizing::Fixed
            } else {
                Sizing::Dynamic
            },
            width: clamp(config.card_width),
            card_height: clamp(config.card_height()),
            gap: clamp(config.card_gap),
            inset: clamp(config.screen_inset),
            margin: clamp(config.screen_margin),
            headroom: clamp(config.capacity_headroom),
        }
    }

    /// Vertical distance between the tops of two stacked cards.
    pub fn pitch(&self) -> i64 {
        i64::from(self.card_height) + i64::from(self.gap)
    }

    /// Height of the area the stack may occupy on the given screen.
    fn usable_height(&self, available: Rect) -> i64 {
        i64::from(available.bottom()) - i64::from(available.top()) - i64::from(self.margin)
    }

    /// How many cards fit on screen at once. Degenerate screens give zero.
    pub fn capacity(&self, available: Rect) -> usize {
        let pitch = self.pitch();
        if pitch <= 0 || available.is_empty() {
            return 0;
        }
        let fitting = (self.usable_height(available) - i64::from(self.margin)).div_euclid(pitch);
        usize::try_from(fitting - i64::from(self.headroom)).unwrap_or(0)
    }

    /// Rectangle the overlay occupies while holding `card_count` cards.
    pub fn region(&self, available: Rect, card_count: usize) -> Rect {
        let x = saturate(
            i64::from(available.right()) - i64::from(self.width) - i64::from(self.inset),
        );

        match self.sizing {
            Sizing::Fixed => Rect::new(
                x,
                available.top(),
                self.width,
                saturate(self.usable_height(available).max(0)),
            ),
            Sizing::Dynamic => {
                let count = i64::try_from(card_count).unwrap_or(i64::MAX);
                let height = count.saturating_mul(self.pitch());
                let y = i64::from(available.bottom()) - i64::from(self.margin) - height + 1;
                Rect::new(x, saturate(y), self.width, saturate(height))
            }
        }
    }
}

fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    fn placement(fixed: bool) -> Placement {
        Placement::from_config(&ToastConfig {
            fixed_height_overlay: fixed,
            ..Default::default()
        })
    }

    #[test]
    fn test_rect_edges_are_inclusive() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 109);
        assert_eq!(r.bottom(), 69);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 10).is_empty());
    }

    #[test]
    fn test_rect_edges_saturate() {
        let far = Rect::new(i32::MAX - 5, i32::MIN, 100, 0);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.bottom(), i32::MIN);
    }

    #[test]
    fn test_region_on_screen_at_coordinate_limit() {
        let screen = Rect::new(i32::MAX - 5, 0, 100, 1080);
        let p = placement(false);

        assert_eq!(p.capacity(screen), 5);
        let region = p.region(screen, 2);
        assert_eq!(region.x, i32::MAX - 300 - 3);
        assert_eq!(region.height, 380);
    }

    #[test]
    fn test_capacity_on_full_hd() {
        // usable 1069, minus margin 1059, pitch 190
        assert_eq!(placement(true).capacity(SCREEN), 5);
        assert_eq!(placement(false).capacity(SCREEN), 5);
    }

    #[test]
    fn test_capacity_headroom() {
        let mut p = placement(true);
        p.headroom = 1;
        assert_eq!(p.capacity(SCREEN), 4);
        p.headroom = 10;
        assert_eq!(p.capacity(SCREEN), 0);
    }

    #[test]
    fn test_capacity_degenerate_screens() {
        let p = placement(true);
        assert_eq!(p.capacity(Rect::new(0, 0, 1920, 0)), 0);
        assert_eq!(p.capacity(Rect::new(0, 0, 1920, 15)), 0);
        assert_eq!(p.capacity(Rect::new(0, 0, 0, 0)), 0);
    }

    #[test]
    fn test_capacity_exact_fit() {
        // bottom - top - margin - margin == 2 * pitch
        let screen = Rect::new(0, 0, 800, 190 * 2 + 21);
        assert_eq!(placement(true).capacity(screen), 2);
    }

    #[test]
    fn test_fixed_region_anchors_top_right() {
        let region = placement(true).region(SCREEN, 3);
        assert_eq!(region, Rect::new(1616, 0, 300, 1069));
        // independent of the card count
        assert_eq!(placement(true).region(SCREEN, 0), region);
    }

    #[test]
    fn test_dynamic_region_grows_upward() {
        let p = placement(false);
        let one = p.region(SCREEN, 1);
        let two = p.region(SCREEN, 2);

        assert_eq!(two, Rect::new(1616, 690, 300, 380));
        assert_eq!(one.height, 190);
        assert_eq!(one.bottom(), two.bottom());
        assert_eq!(one.bottom(), SCREEN.bottom() - 10);
        assert!(two.top() < one.top());
    }

    #[test]
    fn test_region_respects_screen_origin() {
        let screen = Rect::new(1920, 30, 1280, 1000);
        let region = placement(true).region(screen, 1);
        assert_eq!(region.x, screen.right() - 300 - 3);
        assert!(region.right() < screen.right());
        assert_eq!(region.top(), 30);
    }
}
