use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::{get_config_path, save_config, Config, IncomeConfig, DEFAULT_CTA_LINK};
use crate::income::{Choice, LifeCostBracket, LifeCostTable};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn parse_link(input: &str) -> Result<String, String> {
    let link = input.trim();
    if link.starts_with("https://") || link.starts_with("http://") {
        Ok(link.to_string())
    } else {
        Err("link must start with http:// or https://".to_string())
    }
}

fn parse_cost(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(_) => Err("must be non-negative".to_string()),
        Err(_) => Err("must be a non-negative number".to_string()),
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the suggested config file path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Advisor Kit Configuration Wizard");
    println!("================================");
    println!();

    // 1. Contact link
    println!("Both tools end with a button that sends the client to you.");
    println!("Paste your LINE invite, booking page or any other http(s) link.");
    let cta_link = loop {
        let input = prompt_with_default("Contact link", DEFAULT_CTA_LINK)?;
        match parse_link(&input) {
            Ok(link) => break link,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 2. Living cost brackets
    println!();
    println!("The income calculator maps each monthly living-cost bracket to one");
    println!("representative value, in 萬 per month.");
    let defaults = LifeCostTable::default();
    let customize = prompt_yes_no(
        "Customize bracket values? (n keeps 2.8 / 4 / 6.5 / 9)",
        false,
    )?;

    let income = if customize {
        let mut costs = defaults;
        for bracket in LifeCostBracket::ALL {
            let current = defaults.monthly_cost(*bracket);
            let value = loop {
                let input = prompt_with_default(
                    &format!("  {} monthly cost", bracket.label()),
                    &current.to_string(),
                )?;
                match parse_cost(&input) {
                    Ok(v) => break v,
                    Err(e) => println!("  Invalid: {}. Try again.", e),
                }
            };
            match bracket {
                LifeCostBracket::Under3 => costs.under_3 = value,
                LifeCostBracket::From3To5 => costs.from_3_to_5 = value,
                LifeCostBracket::From5To8 => costs.from_5_to_8 = value,
                LifeCostBracket::Over8 => costs.over_8 = value,
            }
        }
        Some(IncomeConfig {
            life_cost: Some(costs),
        })
    } else {
        None
    };

    // 3. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 4. Write config
    let config = Config {
        cta_link,
        disc: None,
        income,
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("To use your own DISC questions, add a `disc.questions` list to that file.");
    println!("Run `advisor-kit` to get started.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link() {
        assert_eq!(
            parse_link(" https://line.me/R/ti/p/@team ").unwrap(),
            "https://line.me/R/ti/p/@team"
        );
        assert!(parse_link("line.me/@team").is_err());
    }

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost("4.5").unwrap(), 4.5);
        assert_eq!(parse_cost("0").unwrap(), 0.0);
        assert!(parse_cost("-1").is_err());
        assert!(parse_cost("abc").is_err());
        assert!(parse_cost("inf").is_err());
    }
}
