/// The OS reference density: 96 DPI is a scale factor of 1.0.
pub const BASE_DPI: u32 = 96;

/// Converts a window DPI to a logical-to-physical scale factor.
///
/// A DPI of 0 (what the OS reports for an invalid window) is treated
/// as the reference density.
pub fn scale_factor(dpi: u32) -> f64 {
    if dpi == 0 {
        return 1.0;
    }
    f64::from(dpi) / f64::from(BASE_DPI)
}

/// Scales a logical pixel length to physical pixels, truncating.
pub fn to_physical(logical: i32, scale: f64) -> i32 {
    (f64::from(logical) * scale) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_dpi_is_identity() {
        assert_eq!(scale_factor(96), 1.0);
        assert_eq!(to_physical(56, scale_factor(96)), 56);
    }

    #[test]
    fn one_and_a_half_scale() {
        let scale = scale_factor(144);

        assert_eq!(scale, 1.5);
        assert_eq!(to_physical(56, scale), 84);
        assert_eq!(to_physical(960, scale), 1440);
    }

    #[test]
    fn fractional_results_truncate() {
        // 125%: 68 * 1.25 = 85, 34 * 1.25 = 42.5
        let scale = scale_factor(120);

        assert_eq!(to_physical(68, scale), 85);
        assert_eq!(to_physical(34, scale), 42);
    }

    #[test]
    fn zero_dpi_falls_back_to_reference() {
        assert_eq!(scale_factor(0), 1.0);
    }
}
