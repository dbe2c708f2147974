use sm_domain::config::{Config, ConfigSeverity};

/// Parse and validate the config, printing any issues followed by the
/// settings the engine will actually run with.
///
/// Returns false when errors are found.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let (lines, ok) = validation_report(config, config_path);
    for line in &lines {
        println!("{line}");
    }
    ok
}

fn validation_report(config: &Config, config_path: &str) -> (Vec<String>, bool) {
    let issues = config.validate();
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();

    let mut lines: Vec<String> = issues.iter().map(ToString::to_string).collect();
    if issues.is_empty() {
        lines.push(format!("Config OK ({config_path})"));
    } else {
        lines.push(format!(
            "\n{errors} error(s), {} warning(s) in {config_path}",
            issues.len() - errors
        ));
    }
    lines.extend(effective_settings(config));

    (lines, errors == 0)
}

/// What resolution produces from this file, fallbacks included.
fn effective_settings(config: &Config) -> Vec<String> {
    let Some(resolved) = config.resolve() else {
        return vec!["  show-more: inactive (no mode configured)".to_string()];
    };
    let mut lines = vec![
        format!(
            "  show-more: {} mode, limit {}{}",
            resolved.truncation.mode,
            resolved.truncation.limit,
            if !resolved.truncation.is_active() {
                " (never truncates)"
            } else {
                ""
            }
        ),
        format!(
            "  expand all: {}",
            if resolved.expand_all_enabled { "enabled" } else { "disabled" }
        ),
    ];
    if resolved.excluded_fields.is_empty() {
        lines.push("  excluded: none".to_string());
    } else {
        lines.push(format!(
            "  excluded ({:?} match): {}",
            resolved.exclusion_match,
            resolved.excluded_fields.join(", ")
        ));
    }
    lines
}

/// Dump the config (with all defaults filled in) as TOML, followed by a
/// note on what the engine will actually use.
pub fn show(config: &Config) -> anyhow::Result<()> {
    let output = toml::to_string_pretty(config)
        .map_err(|e| anyhow::anyhow!("serializing config: {e}"))?;
    print!("{output}");
    println!();
    for line in effective_settings(config) {
        println!("#{line}");
    }
    Ok(())
}
