use std::path::{Path, PathBuf};

use factly_common::config::FactlyConfig;

/// Load and validate configuration from the given config directory.
///
/// Fails loudly with clear error messages if anything is
/// misconfigured. The server refuses to start on validation failure;
/// a weight table that does not sum to 1.0 must never score anything.
pub fn load_config(config_dir: &Path) -> Result<FactlyConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let path = config_dir.join("factly.toml");
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
        path: path.clone(),
        source: e,
    })?;

    let config: FactlyConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path,
        detail: e.to_string(),
    })?;

    validate(&config)?;

    tracing::info!(
        mode = ?config.scoring.mode,
        components = config.scoring.active_weights().len(),
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate the complete configuration, accumulating every problem
/// into one message instead of stopping at the first.
pub fn validate(config: &FactlyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_weights(config, &mut errors);
    validate_providers(config, &mut errors);
    validate_credibility(config, &mut errors);

    if config.cache.search_ttl_seconds == 0 {
        errors.push("cache.search_ttl_seconds must be > 0".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_weights(config: &FactlyConfig, errors: &mut Vec<String>) {
    let tables = [
        ("baseline", &config.scoring.weights.baseline),
        ("enhanced", &config.scoring.weights.enhanced),
    ];
    for (name, table) in tables {
        if table.is_empty() {
            errors.push(format!("scoring.weights.{} must not be empty", name));
            continue;
        }
        for (component, weight) in table {
            if !(0.0..=1.0).contains(weight) {
                errors.push(format!(
                    "scoring.weights.{}.{} must be between 0.0 and 1.0",
                    name, component
                ));
            }
        }
        let sum: f64 = table.values().sum();
        if (sum - 1.0).abs() > 1e-6 {
            errors.push(format!(
                "scoring.weights.{} must sum to 1.0 (got {})",
                name, sum
            ));
        }
    }
}

fn validate_providers(config: &FactlyConfig, errors: &mut Vec<String>) {
    let providers = [
        ("google_fact_check", &config.evidence.providers.google_fact_check),
        ("news", &config.evidence.providers.news),
    ];
    for (name, p) in providers {
        if p.base_url.is_empty() {
            errors.push(format!("evidence.providers.{}.base_url must not be empty", name));
        }
        if p.timeout_ms == 0 {
            errors.push(format!("evidence.providers.{}.timeout_ms must be > 0", name));
        }
        if p.rate_per_second <= 0.0 {
            errors.push(format!(
                "evidence.providers.{}.rate_per_second must be > 0",
                name
            ));
        }
        if p.max_results == 0 {
            errors.push(format!("evidence.providers.{}.max_results must be > 0", name));
        }
    }
}

fn validate_credibility(config: &FactlyConfig, errors: &mut Vec<String>) {
    if !(0.0..=1.0).contains(&config.credibility.default) {
        errors.push("credibility.default must be between 0.0 and 1.0".into());
    }
    for (domain, rating) in &config.credibility.domains {
        if !(0.0..=1.0).contains(rating) {
            errors.push(format!(
                "credibility.domains.{} must be between 0.0 and 1.0",
                domain
            ));
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}
