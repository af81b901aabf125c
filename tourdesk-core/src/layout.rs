use serde::{Deserialize, Serialize};
use crate::{CoreError, CoreResult};

/// Default inset kept between a modal and every viewport edge.
pub const DEFAULT_INSET_PX: f64 = 16.0;

/// On-screen bounds of the element that triggered a modal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacementRect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One element in a click target's ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementNode {
    pub is_card: bool,
    pub rect: PlacementRect,
}

impl ElementNode {
    pub fn card(rect: PlacementRect) -> Self {
        Self { is_card: true, rect }
    }

    pub fn plain(rect: PlacementRect) -> Self {
        Self { is_card: false, rect }
    }
}

/// Bounds of the closest card element, walking from the click target
/// (first element) outwards.
pub fn nearest_card_rect(path: &[ElementNode]) -> Option<PlacementRect> {
    path.iter().find(|node| node.is_card).map(|node| node.rect)
}

/// Size limits of a modal relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalSize {
    pub width_fraction: f64,
    pub max_width_px: f64,
    pub height_fraction: f64,
}

impl ModalSize {
    pub fn details() -> Self {
        Self {
            width_fraction: 0.9,
            max_width_px: 672.0,
            height_fraction: 0.9,
        }
    }

    pub fn booking() -> Self {
        Self {
            width_fraction: 0.9,
            max_width_px: 512.0,
            height_fraction: 0.9,
        }
    }

    pub fn width_for(&self, viewport: Viewport) -> f64 {
        (viewport.width * self.width_fraction).min(self.max_width_px)
    }

    pub fn max_height_for(&self, viewport: Viewport) -> f64 {
        viewport.height * self.height_fraction
    }

    pub fn validate(&self) -> CoreResult<()> {
        let fraction_ok = |f: f64| f > 0.0 && f <= 1.0;
        if !fraction_ok(self.width_fraction) || !fraction_ok(self.height_fraction) {
            return Err(CoreError::InvalidLayout(format!(
                "modal fractions must be in (0, 1], got width={} height={}",
                self.width_fraction, self.height_fraction
            )));
        }
        if self.max_width_px <= 0.0 {
            return Err(CoreError::InvalidLayout(format!(
                "max_width_px must be positive, got {}",
                self.max_width_px
            )));
        }
        Ok(())
    }
}

impl Default for ModalSize {
    fn default() -> Self {
        Self::details()
    }
}

/// Where a modal should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// Absolute coordinates near the trigger element.
    Anchored {
        top: f64,
        left: f64,
        width: f64,
        max_height: f64,
    },
    /// No trigger geometry: the layout centers the modal itself.
    Centered { width: f64, max_height: f64 },
}

impl Placement {
    pub fn width(&self) -> f64 {
        match self {
            Placement::Anchored { width, .. } | Placement::Centered { width, .. } => *width,
        }
    }

    pub fn max_height(&self) -> f64 {
        match self {
            Placement::Anchored { max_height, .. } | Placement::Centered { max_height, .. } => {
                *max_height
            }
        }
    }
}

/// Center the modal on the trigger element, then clamp each axis into
/// `[inset, viewport - modal - inset]`. The lower bound wins when the
/// modal does not fit.
pub fn place_modal(
    trigger: Option<PlacementRect>,
    viewport: Viewport,
    size: &ModalSize,
    inset: f64,
) -> Placement {
    let width = size.width_for(viewport);
    let max_height = size.max_height_for(viewport);

    let Some(rect) = trigger else {
        return Placement::Centered { width, max_height };
    };

    let top = clamp_axis(rect.center_y() - max_height / 2.0, max_height, viewport.height, inset);
    let left = clamp_axis(rect.center_x() - width / 2.0, width, viewport.width, inset);

    Placement::Anchored { top, left, width, max_height }
}

fn clamp_axis(start: f64, modal: f64, viewport: f64, inset: f64) -> f64 {
    let upper = viewport - modal - inset;
    start.min(upper).max(inset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport { width: 1280.0, height: 800.0 };

    #[test]
    fn test_modal_width_is_capped() {
        let size = ModalSize::details();
        assert_eq!(size.width_for(VIEWPORT), 672.0);
        assert_eq!(size.width_for(Viewport::new(400.0, 800.0)), 360.0);
        assert_eq!(size.max_height_for(VIEWPORT), 720.0);
    }

    #[test]
    fn test_centered_without_trigger() {
        let placement = place_modal(None, VIEWPORT, &ModalSize::booking(), DEFAULT_INSET_PX);
        assert_eq!(placement, Placement::Centered { width: 512.0, max_height: 720.0 });
    }

    #[test]
    fn test_anchored_on_trigger_center() {
        let size = ModalSize { width_fraction: 0.5, max_width_px: 400.0, height_fraction: 0.5 };
        let rect = PlacementRect::new(300.0, 500.0, 200.0, 100.0);

        let placement = place_modal(Some(rect), VIEWPORT, &size, DEFAULT_INSET_PX);

        // center (600, 350); modal 400x400
        assert_eq!(
            placement,
            Placement::Anchored { top: 150.0, left: 400.0, width: 400.0, max_height: 400.0 }
        );
    }

    #[test]
    fn test_offscreen_trigger_is_clamped() {
        let size = ModalSize { width_fraction: 0.5, max_width_px: 400.0, height_fraction: 0.5 };

        let bottom_right = PlacementRect::new(2000.0, 3000.0, 100.0, 100.0);
        match place_modal(Some(bottom_right), VIEWPORT, &size, DEFAULT_INSET_PX) {
            Placement::Anchored { top, left, width, max_height } => {
                assert_eq!(top, VIEWPORT.height - max_height - 16.0);
                assert_eq!(left, VIEWPORT.width - width - 16.0);
            }
            other => panic!("expected anchored placement, got {:?}", other),
        }

        let top_left = PlacementRect::new(-500.0, -500.0, 10.0, 10.0);
        match place_modal(Some(top_left), VIEWPORT, &size, DEFAULT_INSET_PX) {
            Placement::Anchored { top, left, .. } => {
                assert_eq!(top, 16.0);
                assert_eq!(left, 16.0);
            }
            other => panic!("expected anchored placement, got {:?}", other),
        }
    }

    #[test]
    fn test_inset_wins_when_modal_does_not_fit() {
        let size = ModalSize { width_fraction: 1.0, max_width_px: 5000.0, height_fraction: 1.0 };
        let rect = PlacementRect::new(100.0, 100.0, 10.0, 10.0);

        let placement = place_modal(Some(rect), VIEWPORT, &size, DEFAULT_INSET_PX);
        assert!(matches!(
            placement,
            Placement::Anchored { top, left, .. } if top == 16.0 && left == 16.0
        ));
    }

    #[test]
    fn test_nearest_card_rect() {
        let button = PlacementRect::new(10.0, 10.0, 20.0, 20.0);
        let card = PlacementRect::new(0.0, 0.0, 300.0, 400.0);
        let grid = PlacementRect::new(0.0, 0.0, 1200.0, 2000.0);

        let path = [ElementNode::plain(button), ElementNode::card(card), ElementNode::card(grid)];
        assert_eq!(nearest_card_rect(&path), Some(card));
        assert_eq!(nearest_card_rect(&[ElementNode::plain(button)]), None);
    }

    #[test]
    fn test_validate_rejects_bad_fractions() {
        let size = ModalSize { width_fraction: 1.5, ..ModalSize::details() };
        assert!(size.validate().is_err());
        assert!(ModalSize::booking().validate().is_ok());
    }
}
