use crate::classifier_client::interface::{ClassificationResult, ClassifierClient, ClassifyError};
use crate::classifier_client::probabilities::Probabilities;
use crate::image_file::ImageFile;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// The eight building categories served by the real model: (class, label).
pub const BUILDING_CLASSES: [(&str, &str); 8] = [
    ("apartment", "Apartment"),
    ("church", "Church"),
    ("garage", "Garage"),
    ("house", "House"),
    ("industrial", "Industrial"),
    ("officebuilding", "Office Bldg"),
    ("retail", "Retail"),
    ("roof", "Roof"),
];

enum Outcome {
    Random,
    #[cfg(test)]
    Fixed(Result<ClassificationResult, ClassifyError>),
}

pub struct ClassifierClientFake {
    outcome: Outcome,
    calls: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierClientFake {
    /// Random probabilities over the building categories, for running the
    /// page without a server.
    pub fn random(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            outcome: Outcome::Random,
            calls: AtomicUsize::new(0),
            logger: logger.with_namespace("fake"),
        }
    }

    #[cfg(test)]
    pub fn fixed(
        outcome: Result<ClassificationResult, ClassifyError>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            outcome: Outcome::Fixed(outcome),
            calls: AtomicUsize::new(0),
            logger: logger.with_namespace("fake"),
        }
    }

    #[cfg(test)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_result() -> Result<ClassificationResult, ClassifyError> {
        let mut rng = rand::rng();

        let weight_dist =
            Uniform::new(0.05, 1.0).map_err(|e| ClassifyError::network(e.to_string()))?;

        let weights: Vec<f64> = BUILDING_CLASSES
            .iter()
            .map(|_| weight_dist.sample(&mut rng))
            .collect();
        let total: f64 = weights.iter().sum();

        let probabilities: Probabilities = BUILDING_CLASSES
            .iter()
            .zip(&weights)
            .map(|((_, label), w)| (*label, round4(w / total)))
            .collect();

        let (top, confidence) = probabilities
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, (_, p))| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });
        let (class_id, label) = BUILDING_CLASSES[top];

        Ok(ClassificationResult {
            class_id: class_id.to_string(),
            label: label.to_string(),
            confidence,
            probabilities,
        })
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

impl ClassifierClient for ClassifierClientFake {
    fn classify(&self, file: &ImageFile) -> Result<ClassificationResult, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self
            .logger
            .info(&format!("Classifying {} with fake classifier...", file.name()));

        match &self.outcome {
            Outcome::Random => Self::random_result(),
            #[cfg(test)]
            Outcome::Fixed(outcome) => outcome.clone(),
        }
    }
}
