use crate::classifier_client::interface::ClassificationResult;

#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityRow {
    pub class_name: String,
    pub probability: f64,
    /// Bar width in percent of the track, relative to the top probability.
    pub bar_width: f64,
    pub percentage: String,
}

/// Rows sorted by probability, highest first. Ties keep the server's order.
pub fn probability_rows(result: &ClassificationResult) -> Vec<ProbabilityRow> {
    let max = max_probability(result);

    let mut pairs: Vec<(&str, f64)> = result.probabilities.iter().collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));

    pairs
        .into_iter()
        .map(|(class_name, probability)| ProbabilityRow {
            class_name: class_name.to_string(),
            probability,
            bar_width: bar_width(probability, max),
            percentage: format_percentage(probability),
        })
        .collect()
}

pub fn max_probability(result: &ClassificationResult) -> f64 {
    result
        .probabilities
        .iter()
        .map(|(_, p)| p)
        .fold(f64::NEG_INFINITY, f64::max)
}

pub fn bar_width(probability: f64, max_probability: f64) -> f64 {
    if max_probability > 0.0 {
        probability / max_probability * 100.0
    } else {
        0.0
    }
}

/// `0.7` -> `"70.0%"`. Halves round away from zero.
pub fn format_percentage(probability: f64) -> String {
    let tenths = (probability * 1000.0).round();
    format!("{:.1}%", tenths / 10.0)
}
