use serde::Serialize;

/// A scored input and the weight it carries inside its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub source: &'static str,
    pub score: f64,
    pub weight: f64,
}

/// Contributions of one dimension. Absent optional inputs are never pushed,
/// so their weight drops out of both the numerator and the denominator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contributions {
    items: Vec<Contribution>,
}

impl Contributions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: &'static str, score: f64, weight: f64) -> &mut Self {
        self.items.push(Contribution {
            source,
            score,
            weight,
        });
        self
    }

    pub fn push_optional(
        &mut self,
        source: &'static str,
        score: Option<f64>,
        weight: f64,
    ) -> &mut Self {
        if let Some(score) = score {
            self.push(source, score, weight);
        }
        self
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(|item| item.weight).sum()
    }

    pub fn weighted_average(&self) -> f64 {
        let total_weight = self.total_weight();
        if total_weight <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self.items.iter().map(|item| item.score * item.weight).sum();
        weighted / total_weight
    }

    pub fn items(&self) -> &[Contribution] {
        &self.items
    }

    pub fn contains(&self, source: &str) -> bool {
        self.items.iter().any(|item| item.source == source)
    }
}

/// Mean of the sub-scores that are present, `None` when there are none.
pub(crate) fn mean_of_present(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_inputs_leave_the_denominator() {
        let mut full = Contributions::new();
        full.push("a", 80.0, 60.0)
            .push("b", 40.0, 25.0)
            .push_optional("c", Some(100.0), 15.0);
        let mut partial = Contributions::new();
        partial
            .push("a", 80.0, 60.0)
            .push("b", 40.0, 25.0)
            .push_optional("c", None, 15.0);

        assert_eq!(full.total_weight() - partial.total_weight(), 15.0);
        assert!(!partial.contains("c"));
        let expected = (80.0 * 60.0 + 40.0 * 25.0) / 85.0;
        assert!((partial.weighted_average() - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_set_averages_to_zero() {
        assert_eq!(Contributions::new().weighted_average(), 0.0);
    }

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean_of_present(&[Some(100.0), None]), Some(100.0));
        assert_eq!(mean_of_present(&[Some(100.0), Some(50.0)]), Some(75.0));
        assert_eq!(mean_of_present(&[None, None]), None);
    }
}
