/// Summary statistics of a distance sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceStats {
    pub mean: f64,
    /// Middle value; the average of the two middle values for even counts.
    pub median: f64,
    pub max: f64,
    /// Fraction of distances `<=` the perfect tolerance.
    pub ratio_perfect: f64,
    /// Fraction of distances `<=` the acceptable tolerance.
    pub ratio_acceptable: f64,
}

impl DistanceStats {
    /// `None` for an empty sample.
    pub fn compute(distances: &[f64], tolerance_perfect: f64, tolerance_acceptable: f64) -> Option<Self> {
        if distances.is_empty() {
            return None;
        }
        let n = distances.len() as f64;
        let mut sorted = distances.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        let within = |tol: f64| distances.iter().filter(|&&d| d <= tol).count() as f64 / n;

        Some(Self {
            mean: distances.iter().sum::<f64>() / n,
            median,
            max: sorted[sorted.len() - 1],
            ratio_perfect: within(tolerance_perfect),
            ratio_acceptable: within(tolerance_acceptable),
        })
    }
}
