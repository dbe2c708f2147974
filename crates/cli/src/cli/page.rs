use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use sm_domain::config::ShowMoreConfig;
use sm_toggle::{Field, Page};

/// A control activation replayed against the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Activate the control of the n-th truncated value (0-based).
    Toggle(usize),
    ExpandAll,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("expand-all") {
            return Ok(Self::ExpandAll);
        }
        match s.split_once(':') {
            Some(("toggle", n)) => n
                .trim()
                .parse()
                .map(Self::Toggle)
                .map_err(|_| format!("invalid instance index '{n}'")),
            _ => Err(format!(
                "unknown action '{s}' (expected toggle:<n> or expand-all)"
            )),
        }
    }
}

/// Read fields from `path`, run the page pass, replay `actions` and print
/// the page.
pub fn run(
    config: &ShowMoreConfig,
    path: &str,
    actions: &[Action],
    json: bool,
) -> anyhow::Result<()> {
    let fields = read_fields(Path::new(path))?;
    let page = replay(&fields, config, actions);

    if json {
        let report = page.report();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", page.render());
    }
    Ok(())
}

fn read_fields(path: &Path) -> anyhow::Result<Vec<Field>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn replay(fields: &[Field], config: &ShowMoreConfig, actions: &[Action]) -> Page {
    let mut page = Page::process(fields, config);
    for action in actions {
        match *action {
            Action::Toggle(index) => {
                if page.toggle(index).is_none() {
                    tracing::warn!(
                        index,
                        instances = page.instances().len(),
                        "no such instance, action skipped"
                    );
                }
            }
            Action::ExpandAll => {
                if page.activate_expand_all().is_none() {
                    tracing::warn!("aggregate control is not shown, action skipped");
                }
            }
        }
    }
    page
}
