use serde::{Deserialize, Serialize};

use crate::disc::{default_questions, Question};
use crate::income::{Estimator, LifeCostTable};

/// Where the "talk to an advisor" buttons point by default.
pub const DEFAULT_CTA_LINK: &str = "https://line.me/R/ti/p/@advisor-kit";

fn default_cta_link() -> String {
    DEFAULT_CTA_LINK.to_string()
}

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// cta_link: "https://line.me/R/ti/p/@my-team"
/// disc:
///   questions:
///     - { text: "I make decisions quickly", trait: D }
/// income:
///   life_cost:
///     under_3: 2.8
///     from_3_to_5: 4
///     from_5_to_8: 6.5
///     over_8: 9
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Contact link offered after either tool (default: LINE invite)
    #[serde(default = "default_cta_link")]
    pub cta_link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disc: Option<DiscConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<IncomeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cta_link: default_cta_link(),
            disc: None,
            income: None,
        }
    }
}

impl Config {
    /// Configured questionnaire, or the built-in twelve questions.
    pub fn questions(&self) -> Vec<Question> {
        self.disc
            .as_ref()
            .and_then(|d| d.questions.clone())
            .unwrap_or_else(default_questions)
    }

    pub fn life_cost(&self) -> LifeCostTable {
        self.income
            .as_ref()
            .and_then(|i| i.life_cost)
            .unwrap_or_default()
    }

    pub fn estimator(&self) -> Estimator {
        Estimator::new(self.life_cost())
    }
}

/// DISC questionnaire overrides.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DiscConfig {
    /// Replaces the built-in questionnaire when present
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
}

/// Lifetime income calculator overrides.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IncomeConfig {
    /// Representative monthly cost per bracket, in 萬
    #[serde(default)]
    pub life_cost: Option<LifeCostTable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::Trait;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cta_link, DEFAULT_CTA_LINK);
        assert_eq!(config.questions().len(), 12);
        assert_eq!(config.life_cost(), LifeCostTable::default());
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
cta_link: "https://example.com/contact"
disc:
  questions:
    - text: "I push for results"
      trait: D
    - text: "I enjoy meeting people"
      trait: I
income:
  life_cost:
    under_3: 2.5
    from_3_to_5: 4
    from_5_to_8: 6
    over_8: 10
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.cta_link, "https://example.com/contact");

        let questions = config.questions();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].trait_, Trait::I);

        let costs = config.life_cost();
        assert_eq!(costs.under_3, 2.5);
        assert_eq!(costs.over_8, 10.0);
    }

    #[test]
    fn test_partial_income_section_keeps_default_costs() {
        let yaml = r#"
income: {}
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.life_cost(), LifeCostTable::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
cta_link: "https://example.com"
queries: []
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            cta_link: "https://example.com".to_string(),
            disc: None,
            income: Some(IncomeConfig {
                life_cost: Some(LifeCostTable::default()),
            }),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
