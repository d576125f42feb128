use serde::Serialize;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Grid zoom factor, always within `MIN_ZOOM..=MAX_ZOOM`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

impl Zoom {
    /// Accepts a stored level only if it is already in range.
    pub fn from_stored(level: f64) -> Option<Self> {
        (level.is_finite() && (MIN_ZOOM..=MAX_ZOOM).contains(&level)).then_some(Self(level))
    }

    /// Slider input: snapped to the step, then clamped.
    pub fn from_slider(level: f64) -> Self {
        if !level.is_finite() {
            return Self::default();
        }
        let snapped = (level / ZOOM_STEP).round() * ZOOM_STEP;
        Self(snapped.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn level(self) -> f64 {
        self.0
    }

    pub fn percentage(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    pub fn zoom_in(self) -> Self {
        Self((self.0 + ZOOM_STEP).min(MAX_ZOOM))
    }

    pub fn zoom_out(self) -> Self {
        Self((self.0 - ZOOM_STEP).max(MIN_ZOOM))
    }

    pub fn can_zoom_in(self) -> bool {
        self.0 < MAX_ZOOM
    }

    pub fn can_zoom_out(self) -> bool {
        self.0 > MIN_ZOOM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_in_and_out_stop_at_bounds() {
        let mut zoom = Zoom::default();
        for _ in 0..20 {
            zoom = zoom.zoom_in();
        }
        assert_eq!(zoom.level(), MAX_ZOOM);
        assert!(!zoom.can_zoom_in());
        for _ in 0..20 {
            zoom = zoom.zoom_out();
        }
        assert_eq!(zoom.level(), MIN_ZOOM);
        assert!(!zoom.can_zoom_out());
    }

    #[test]
    fn slider_snaps_and_clamps() {
        assert_eq!(Zoom::from_slider(1.3).level(), 1.25);
        assert_eq!(Zoom::from_slider(9.0).level(), MAX_ZOOM);
        assert_eq!(Zoom::from_slider(0.0).level(), MIN_ZOOM);
        assert_eq!(Zoom::from_slider(f64::NAN), Zoom::default());
    }

    #[test]
    fn stored_level_must_be_in_range() {
        assert_eq!(Zoom::from_stored(2.0).map(Zoom::level), Some(2.0));
        assert!(Zoom::from_stored(0.25).is_none());
        assert!(Zoom::from_stored(f64::INFINITY).is_none());
    }

    #[test]
    fn percentage_rounds() {
        assert_eq!(Zoom::from_slider(1.75).percentage(), 175);
    }
}
