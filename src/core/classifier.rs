// AgroCast - core/classifier.rs
//
// Leaf disease classification.
//
// `classify` is the simulated model: a pure function that maps file metadata
// through a normalised seed onto "Healthy" or one of the five catalog
// diseases. It has no hidden state, performs no I/O, and cannot fail.
// Callers own any simulated latency, logging, and UI updates.
//
// Seed bands:
//   [0.00, 0.30) Healthy         confidence 0.85 + seed * 0.12
//   [0.30, 0.50) Leaf Blight     confidence 0.72 + seed * 0.23
//   [0.50, 0.65) Powdery Mildew
//   [0.65, 0.78) Bacterial Spot
//   [0.78, 0.90) Rust Disease
//   [0.90, 1.00) Anthracnose

use crate::core::catalog::{self, DISEASES};
use crate::core::model::{ClassificationInput, ClassificationResult, SeedValue};
use crate::util::constants::{
    DISEASE_CONFIDENCE_BASE, DISEASE_CONFIDENCE_SCALE, DISEASE_SEED_BOUNDS,
    HEALTHY_CONFIDENCE_BASE, HEALTHY_CONFIDENCE_SCALE, HEALTHY_SEED_THRESHOLD,
};

/// Seam between the app layer and whatever produces classifications.
///
/// `MockClassifier` is the only implementation; a real inference backend
/// would slot in here.
pub trait Classifier: Send + Sync {
    fn classify(&self, input: &ClassificationInput) -> ClassificationResult;
}

/// Deterministic stand-in for a trained model.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockClassifier;

impl Classifier for MockClassifier {
    fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        classify(input)
    }
}

/// Classify a leaf image from its metadata.
pub fn classify(input: &ClassificationInput) -> ClassificationResult {
    classify_seed(SeedValue::derive(input))
}

/// Classify from an already-derived seed.
pub fn classify_seed(seed: SeedValue) -> ClassificationResult {
    let s = seed.value();

    if s < HEALTHY_SEED_THRESHOLD {
        return ClassificationResult {
            label: catalog::HEALTHY_LABEL.to_string(),
            confidence: HEALTHY_CONFIDENCE_BASE + s * HEALTHY_CONFIDENCE_SCALE,
            treatment: catalog::HEALTHY_TREATMENT_EN.to_string(),
            is_healthy: true,
            catalog_index: None,
        };
    }

    let index = disease_index(s);
    let entry = &DISEASES[index];
    ClassificationResult {
        label: entry.name.to_string(),
        confidence: DISEASE_CONFIDENCE_BASE + s * DISEASE_CONFIDENCE_SCALE,
        treatment: entry.treatment_english.to_string(),
        is_healthy: false,
        catalog_index: Some(index),
    }
}

/// Catalog index for a non-healthy seed: the first band whose upper bound
/// exceeds the seed, or the last entry.
fn disease_index(seed: f64) -> usize {
    DISEASE_SEED_BOUNDS
        .iter()
        .position(|&bound| seed < bound)
        .unwrap_or(DISEASES.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    /// Input whose metadata sums to `residue` modulo 1000, using the
    /// name/size pair from the documented scenario.
    fn input_with_residue(residue: u64) -> ClassificationInput {
        // 10 + 2000 + (1_700_000_000_000 - 2010 + residue) = 1_700_000_000_000 + residue.
        ClassificationInput::new(10, 2000, 1_700_000_000_000 - 2010 + residue)
    }

    #[test]
    fn test_healthy_scenario_seed_025() {
        let r = classify(&input_with_residue(250));
        assert!(r.is_healthy);
        assert_eq!(r.label, "Healthy");
        assert!((r.confidence - 0.88).abs() < EPS, "got {}", r.confidence);
        assert_eq!(r.treatment, catalog::HEALTHY_TREATMENT_EN);
        assert_eq!(r.catalog_index, None);
    }

    #[test]
    fn test_powdery_mildew_scenario_seed_060() {
        let r = classify(&input_with_residue(600));
        assert!(!r.is_healthy);
        assert_eq!(r.label, "Powdery Mildew");
        assert_eq!(r.catalog_index, Some(1));
        assert!((r.confidence - 0.858).abs() < EPS, "got {}", r.confidence);
        assert_eq!(r.treatment, DISEASES[1].treatment_english);
    }

    #[test]
    fn test_seed_exactly_030_is_disease() {
        let r = classify(&input_with_residue(300));
        assert!(!r.is_healthy);
        assert_eq!(r.label, DISEASES[0].name);
    }

    #[test]
    fn test_seed_just_below_030_is_healthy() {
        assert!(classify(&input_with_residue(299)).is_healthy);
    }

    #[test]
    fn test_band_boundaries_select_higher_index() {
        let cases = [(499, 0), (500, 1), (649, 1), (650, 2), (779, 2), (780, 3), (899, 3), (900, 4), (999, 4)];
        for (residue, expected) in cases {
            let r = classify(&input_with_residue(residue));
            assert_eq!(
                r.catalog_index,
                Some(expected),
                "residue {residue} should select index {expected}"
            );
            assert_eq!(r.label, DISEASES[expected].name);
        }
    }

    #[test]
    fn test_confidence_ranges_hold_for_every_residue() {
        for residue in 0..1000 {
            let r = classify(&input_with_residue(residue));
            let seed = residue as f64 / 1000.0;
            if seed < 0.3 {
                assert!(r.is_healthy);
                assert!((0.85..=0.97).contains(&r.confidence), "seed {seed}: {}", r.confidence);
            } else {
                assert!(!r.is_healthy);
                assert!((0.72..=0.95).contains(&r.confidence), "seed {seed}: {}", r.confidence);
                assert!(DISEASES.iter().any(|d| d.name == r.label));
            }
            if (0.3..0.5).contains(&seed) {
                assert_eq!(r.label, DISEASES[0].name);
                assert!(r.confidence < 0.72 + 0.5 * 0.23);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let input = ClassificationInput::new(17, 48_213, 1_712_345_678_901);
        assert_eq!(classify(&input), classify(&input));
        assert_eq!(MockClassifier.classify(&input), classify(&input));
    }

    #[test]
    fn test_classify_seed_matches_classify() {
        let input = ClassificationInput::new(3, 4, 5);
        assert_eq!(classify_seed(SeedValue::derive(&input)), classify(&input));
    }
}
