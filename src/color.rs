//! Photo age to marker color.

use chrono::NaiveDateTime;

use crate::constants::{AGE_HORIZON_DAYS, GRADIENT_STOPS, NEUTRAL_COLOR};

/// Linear colormap over equally spaced RGB stops, violet (new) to red (old).
#[derive(Debug, Clone)]
pub struct AgeColormap {
    horizon_days: i64,
    stops: Vec<[u8; 3]>,
    neutral: String,
}

impl Default for AgeColormap {
    fn default() -> Self {
        Self::new(AGE_HORIZON_DAYS)
    }
}

impl AgeColormap {
    pub fn new(horizon_days: i64) -> Self {
        Self {
            horizon_days: horizon_days.max(1),
            stops: GRADIENT_STOPS.to_vec(),
            neutral: NEUTRAL_COLOR.to_string(),
        }
    }

    /// Whole days between capture and `now`, scaled by the horizon and clamped to [0, 1].
    pub fn normalized_age(&self, captured_at: NaiveDateTime, now: NaiveDateTime) -> f64 {
        let days = (now - captured_at).num_days();
        (days as f64 / self.horizon_days as f64).clamp(0.0, 1.0)
    }

    /// Hex color for a position in [0, 1] along the gradient.
    pub fn color_at(&self, position: f64) -> String {
        let position = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
        let segments = self.stops.len() - 1;
        let scaled = position * segments as f64;
        let idx = (scaled.floor() as usize).min(segments - 1);
        let t = scaled - idx as f64;

        let (from, to) = (self.stops[idx], self.stops[idx + 1]);
        let channel = |i: usize| {
            let v = f64::from(from[i]) + (f64::from(to[i]) - f64::from(from[i])) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        format!("#{:02x}{:02x}{:02x}", channel(0), channel(1), channel(2))
    }

    /// Marker color for a photo. Unknown capture time gets the neutral gray,
    /// never a gradient color.
    pub fn color_for(&self, captured_at: Option<NaiveDateTime>, now: NaiveDateTime) -> String {
        match captured_at {
            Some(at) => self.color_at(self.normalized_age(at, now)),
            None => self.neutral.clone(),
        }
    }
}
