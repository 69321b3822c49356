use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let link = config.cta_link.trim();
    if link.is_empty() {
        errors.push("cta_link: must not be empty".to_string());
    } else if !(link.starts_with("https://") || link.starts_with("http://")) {
        errors.push(format!(
            "cta_link: '{}' must start with http:// or https://",
            link
        ));
    }

    if let Some(questions) = config.disc.as_ref().and_then(|d| d.questions.as_ref()) {
        if questions.is_empty() {
            errors.push("disc.questions: must contain at least one question".to_string());
        }
        for (i, question) in questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                errors.push(format!("disc.questions[{}].text: must not be empty", i));
            }
        }
    }

    if let Some(costs) = config.income.as_ref().and_then(|i| i.life_cost.as_ref()) {
        for (key, value) in costs.entries() {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!(
                    "income.life_cost.{}: must be a non-negative number, got {}",
                    key, value
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiscConfig, IncomeConfig};
    use crate::disc::{Question, Trait};
    use crate::income::LifeCostTable;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_cta_link() {
        let config = Config {
            cta_link: "  ".to_string(),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("cta_link"));
    }

    #[test]
    fn test_cta_link_needs_scheme() {
        let config = Config {
            cta_link: "line.me/R/ti/p/@team".to_string(),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("http"));
    }

    #[test]
    fn test_empty_questionnaire() {
        let config = Config {
            disc: Some(DiscConfig {
                questions: Some(vec![]),
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("disc.questions"));
    }

    #[test]
    fn test_blank_question_text() {
        let config = Config {
            disc: Some(DiscConfig {
                questions: Some(vec![
                    Question::new("fine", Trait::D),
                    Question::new(" ", Trait::S),
                ]),
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec!["disc.questions[1].text: must not be empty".to_string()]);
    }

    #[test]
    fn test_negative_cost() {
        let config = Config {
            income: Some(IncomeConfig {
                life_cost: Some(LifeCostTable {
                    over_8: -1.0,
                    ..LifeCostTable::default()
                }),
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("income.life_cost.over_8"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            cta_link: String::new(),                           // Error 1
            disc: Some(DiscConfig {
                questions: Some(vec![]),                       // Error 2
            }),
            income: Some(IncomeConfig {
                life_cost: Some(LifeCostTable {
                    under_3: f64::NAN,                         // Error 3
                    ..LifeCostTable::default()
                }),
            }),
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
