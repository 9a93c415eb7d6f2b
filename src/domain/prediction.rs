//! The per-request classification result.

use serde::Serialize;
use std::fmt;

/// A predicted class with its raw model score.
///
/// `confidence` is the score exactly as the model produced it; it is neither
/// calibrated nor renormalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Human-readable class name.
    pub label: String,
    /// Index of the class in the model output.
    pub class_id: usize,
    /// Raw model score for the class.
    pub confidence: f32,
}

impl Prediction {
    /// Confidence scaled to a percentage.
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }
}

/// Renders the two-line summary shown to users.
impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Prediction: {}\nConfidence: {:.2}%",
            self.label,
            self.confidence_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_lines_two_decimals() {
        let prediction = Prediction {
            label: "Cat".to_string(),
            class_id: 0,
            confidence: 0.98761,
        };
        assert_eq!(prediction.to_string(), "Prediction: Cat\nConfidence: 98.76%");
    }

    #[test]
    fn test_display_full_and_zero_confidence() {
        let full = Prediction {
            label: "Dog".to_string(),
            class_id: 1,
            confidence: 1.0,
        };
        assert_eq!(full.to_string(), "Prediction: Dog\nConfidence: 100.00%");

        let zero = Prediction {
            confidence: 0.0,
            ..full
        };
        assert_eq!(zero.to_string(), "Prediction: Dog\nConfidence: 0.00%");
    }

    #[test]
    fn test_serializes_to_json() {
        let prediction = Prediction {
            label: "Cat".to_string(),
            class_id: 0,
            confidence: 0.5,
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["label"], "Cat");
        assert_eq!(json["class_id"], 0);
        assert_eq!(json["confidence"], 0.5);
    }
}
