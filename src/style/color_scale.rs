use crate::error::MapError;

use super::color::Rgb;

/// Piecewise-linear mapping of a numeric domain onto a sequence of control colors.
///
/// The control colors are spread evenly over `[min, max]`. Values outside the domain
/// are clamped to it, and NaN maps to the first color. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueColorScale {
    min: f64,
    max: f64,
    colors: Vec<Rgb>,
}

impl ValueColorScale {
    /// Build a scale over `[min, max]`.
    ///
    /// Fails with `MapError::InvalidDomain` if `min > max`, if either bound is not finite,
    /// or if fewer than two control colors are given.
    pub fn build(min: f64, max: f64, colors: Vec<Rgb>) -> Result<Self, MapError> {
        let invalid = |reason: &str| MapError::InvalidDomain {
            min,
            max,
            reason: reason.to_string(),
        };
        if !min.is_finite() || !max.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if min > max {
            return Err(invalid("lower bound exceeds upper bound"));
        }
        if colors.len() < 2 {
            return Err(invalid(&format!(
                "at least 2 control colors are required, got {}",
                colors.len()
            )));
        }
        Ok(Self { min, max, colors })
    }

    /// Build a scale whose domain is the min/max of `values`, NaN excluded.
    pub fn fit<I: IntoIterator<Item = f64>>(values: I, colors: Vec<Rgb>) -> Result<Self, MapError> {
        let (min, max) = values
            .into_iter()
            .filter(|value| !value.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                (min.min(value), max.max(value))
            });
        if min > max {
            return Err(MapError::InvalidDomain {
                min,
                max,
                reason: "no numeric values to fit".to_string(),
            });
        }
        Self::build(min, max, colors)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Position of `value` in the domain, clamped to [0, 1].
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() || self.max == self.min {
            return 0.0;
        }
        (value.clamp(self.min, self.max) - self.min) / (self.max - self.min)
    }

    pub fn color_at(&self, value: f64) -> Rgb {
        let t = self.normalize(value);
        let last_segment = self.colors.len() - 2;
        let position = t * (self.colors.len() - 1) as f64;
        let segment = (position.floor() as usize).min(last_segment);
        let local_t = (position - segment as f64).clamp(0.0, 1.0);
        self.colors[segment].lerp(&self.colors[segment + 1], local_t)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{error::MapError, style::color::Rgb};

    use super::ValueColorScale;

    fn ylorbr() -> Vec<Rgb> {
        ["#ffffd4", "#fed98e", "#fe9929", "#d95f0e", "#993404"]
            .iter()
            .map(|hex| hex.parse().unwrap())
            .collect()
    }

    /// Each channel only ever increases from one control color to the next.
    fn increasing() -> Vec<Rgb> {
        vec![Rgb::new(0, 10, 20), Rgb::new(120, 10, 90), Rgb::new(255, 200, 91)]
    }

    #[rstest]
    #[case(300.0, 100.0, 3)]
    #[case(0.0, 10.0, 1)]
    #[case(0.0, 10.0, 0)]
    #[case(f64::NAN, 10.0, 3)]
    #[case(0.0, f64::INFINITY, 3)]
    fn test_build_rejects_invalid_domain(
        #[case] min: f64,
        #[case] max: f64,
        #[case] num_colors: usize,
    ) {
        let colors = ylorbr().into_iter().take(num_colors).collect();
        let result = ValueColorScale::build(min, max, colors);
        assert!(matches!(result, Err(MapError::InvalidDomain { .. })));
    }

    #[test]
    fn test_boundaries_are_exact() {
        let colors = ylorbr();
        let scale = ValueColorScale::build(60.0, 600.0, colors.clone()).unwrap();
        assert_eq!(scale.color_at(60.0), colors[0]);
        assert_eq!(scale.color_at(600.0), colors[4]);
    }

    #[test]
    fn test_control_colors_sit_on_even_stops() {
        let colors = ylorbr();
        let scale = ValueColorScale::build(0.0, 400.0, colors.clone()).unwrap();
        for (index, color) in colors.iter().enumerate() {
            assert_eq!(scale.color_at(index as f64 * 100.0), *color);
        }
    }

    #[test]
    fn test_out_of_domain_values_are_clamped() {
        let colors = ylorbr();
        let scale = ValueColorScale::build(60.0, 600.0, colors.clone()).unwrap();
        assert_eq!(scale.color_at(-1000.0), colors[0]);
        assert_eq!(scale.color_at(1e9), colors[4]);
        assert_eq!(scale.color_at(f64::INFINITY), colors[4]);
    }

    #[test]
    fn test_nan_maps_to_first_color() {
        let colors = ylorbr();
        let scale = ValueColorScale::build(60.0, 600.0, colors.clone()).unwrap();
        assert_eq!(scale.color_at(f64::NAN), colors[0]);
    }

    #[test]
    fn test_degenerate_domain_maps_to_first_color() {
        let colors = ylorbr();
        let scale = ValueColorScale::build(120.0, 120.0, colors.clone()).unwrap();
        for value in [0.0, 120.0, 5000.0] {
            assert_eq!(scale.color_at(value), colors[0]);
        }
    }

    #[test]
    fn test_monotonic_for_increasing_controls() {
        let scale = ValueColorScale::build(0.0, 1000.0, increasing()).unwrap();
        let samples: Vec<Rgb> = (0..=1000).map(|v| scale.color_at(v as f64)).collect();
        for pair in samples.windows(2) {
            assert!(pair[0].r <= pair[1].r);
            assert!(pair[0].g <= pair[1].g);
            assert!(pair[0].b <= pair[1].b);
        }
    }

    #[test]
    fn test_values_in_different_segments_are_distinguishable() {
        let scale = ValueColorScale::build(0.0, 400.0, ylorbr()).unwrap();
        // 50, 150, 250 and 350 each fall in a different segment.
        let colors: Vec<Rgb> = [50.0, 150.0, 250.0, 350.0]
            .iter()
            .map(|value| scale.color_at(*value))
            .collect();
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
    }

    #[test]
    fn test_fit_ignores_nan() {
        let scale = ValueColorScale::fit([f64::NAN, 600.0, 60.0, 300.0], ylorbr()).unwrap();
        assert_eq!(scale.min(), 60.0);
        assert_eq!(scale.max(), 600.0);
    }

    #[test]
    fn test_fit_without_values_fails() {
        let result = ValueColorScale::fit([f64::NAN], ylorbr());
        assert!(matches!(result, Err(MapError::InvalidDomain { .. })));
    }
}
