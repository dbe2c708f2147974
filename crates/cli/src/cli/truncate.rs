use sm_domain::config::Config;
use sm_domain::{Mode, TruncationConfig};
use sm_truncate::{truncate, ContentUnit};

/// Print the collapsed rendering of `text`.
///
/// Flags override the configured mode and limit. Without a configured
/// mode the built-in defaults apply, so a preview always truncates.
pub fn run(
    config: &Config,
    text: &str,
    mode: Option<Mode>,
    limit: Option<usize>,
    markup: bool,
) -> anyhow::Result<()> {
    println!("{}", render(config, text, mode, limit, markup));
    Ok(())
}

fn render(
    config: &Config,
    text: &str,
    mode: Option<Mode>,
    limit: Option<usize>,
    markup: bool,
) -> String {
    let base = config
        .resolve()
        .map(|c| c.truncation)
        .unwrap_or_default();
    let truncation = TruncationConfig::new(mode.unwrap_or(base.mode), limit.unwrap_or(base.limit));

    let unit = if markup {
        ContentUnit::markup(text)
    } else {
        ContentUnit::from_value(text)
    };
    let result = truncate(unit, &truncation);
    tracing::debug!(
        mode = %truncation.mode,
        limit = truncation.limit,
        truncated = result.was_truncated,
        "truncate command"
    );
    result.collapsed.source().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::default();
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(
            render(&config, text, None, Some(5), false),
            "The quick brown fox jumps..."
        );
        assert_eq!(
            render(&config, "Hello wonderful world", Some(Mode::Characters), Some(10), false),
            "Hello wond..."
        );
        assert_eq!(render(&config, text, None, None, false), text);
    }

    #[test]
    fn markup_flag_keeps_tags() {
        let out = render(
            &Config::default(),
            "<p>Alpha <b>bravo charlie</b> delta</p>",
            None,
            Some(2),
            true,
        );
        assert_eq!(out, "<p>Alpha <b>bravo</b></p>...");
    }
}
