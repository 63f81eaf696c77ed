//! Energy-to-emissions conversion

/// Grams of CO2e for `energy_kwh` at a regional grid intensity.
/// Pure and total over non-negative reals.
pub fn co2_grams(energy_kwh: f64, intensity_g_per_kwh: f64) -> f64 {
    energy_kwh * intensity_g_per_kwh
}
