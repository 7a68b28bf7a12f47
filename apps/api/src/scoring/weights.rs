use serde::{Deserialize, Serialize};

/// Percentage weights steering which resume aspects matter most to the score.
///
/// Supplied per evaluation call and never persisted. Fields missing from a
/// request default to 0. The total is not required to be 100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub skills_matching: u32,
    pub experience: u32,
    pub education: u32,
    pub keyword_usage: u32,
    pub certifications: u32,
    pub achievements: u32,
    pub job_stability: u32,
    pub cultural_fit: u32,
}

impl WeightConfig {
    /// The standard profile used by the resume editor.
    pub fn standard() -> Self {
        Self {
            skills_matching: 30,
            experience: 20,
            education: 10,
            keyword_usage: 15,
            certifications: 10,
            achievements: 10,
            job_stability: 5,
            cultural_fit: 0,
        }
    }

    /// Sum of all weights, widened so client-supplied values cannot overflow.
    pub fn total(&self) -> u64 {
        [
            self.skills_matching,
            self.experience,
            self.education,
            self.keyword_usage,
            self.certifications,
            self.achievements,
            self.job_stability,
            self.cultural_fit,
        ]
        .iter()
        .map(|&w| u64::from(w))
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_profile_totals_100() {
        assert_eq!(WeightConfig::standard().total(), 100);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let weights: WeightConfig =
            serde_json::from_str(r#"{"skills_matching": 40, "experience": 60}"#).unwrap();
        assert_eq!(weights.skills_matching, 40);
        assert_eq!(weights.experience, 60);
        assert_eq!(weights.cultural_fit, 0);
        assert_eq!(weights.total(), 100);
    }

    #[test]
    fn test_total_is_not_capped() {
        let weights = WeightConfig {
            skills_matching: 90,
            experience: 90,
            ..WeightConfig::default()
        };
        assert_eq!(weights.total(), 180);
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let weights: WeightConfig = serde_json::from_str(
            r#"{"skills_matching": 4000000000, "experience": 4000000000}"#,
        )
        .unwrap();
        assert_eq!(weights.total(), 8_000_000_000);

        let maxed = WeightConfig {
            skills_matching: u32::MAX,
            experience: u32::MAX,
            education: u32::MAX,
            keyword_usage: u32::MAX,
            certifications: u32::MAX,
            achievements: u32::MAX,
            job_stability: u32::MAX,
            cultural_fit: u32::MAX,
        };
        assert_eq!(maxed.total(), 8 * u64::from(u32::MAX));
    }
}
