//! Built-in checks of the offline components, run with `--self-checking`.

use chrono::{DateTime, Duration, Utc};

use crate::classify::{classify, parse_date, AnalysisWindow, Classification};
use crate::error::Result;
use crate::identity::RepositoryIdentity;
use crate::models::WorkItem;
use crate::output::render_table;
use crate::pagination::Links;

/// Outcome of one named check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
}

impl CheckOutcome {
    pub fn status(&self) -> &'static str {
        if self.passed {
            "ok"
        } else {
            "FAILED"
        }
    }
}

type Check = fn() -> Result<bool>;

const CHECKS: &[(&str, Check)] = &[
    ("window bounds", window_bounds),
    ("closed as of window end", closed_as_of_end),
    ("staleness threshold", staleness_threshold),
    ("link relations", link_relations),
    ("repository identity", repository_identity),
    ("table rendering", table_rendering),
];

/// Run every check. A check that errors counts as failed.
pub fn run() -> Vec<CheckOutcome> {
    CHECKS
        .iter()
        .map(|(name, check)| {
            let passed = check().unwrap_or_else(|error| {
                tracing::warn!(%error, check = *name, "self-check errored");
                false
            });
            CheckOutcome {
                name: *name,
                passed,
            }
        })
        .collect()
}

struct Sample {
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

impl WorkItem for Sample {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }
}

fn sample(created: &str, closed: Option<&str>) -> Result<Sample> {
    Ok(Sample {
        created_at: parse_date(created)?,
        closed_at: closed.map(parse_date).transpose()?,
    })
}

fn january() -> Result<AnalysisWindow> {
    AnalysisWindow::new(
        Some(parse_date("2024-01-01 00:00:00")?),
        Some(parse_date("2024-02-01 00:00:00")?),
        Utc::now(),
    )
}

fn window_bounds() -> Result<bool> {
    let items = [
        sample("2024-01-01 00:00:00", None)?,
        sample("2024-02-01 00:00:00", None)?,
    ];
    let counts = classify(&items, &january()?, Duration::days(30));
    Ok(counts.total() == 1)
}

fn closed_as_of_end() -> Result<bool> {
    let items = [
        sample("2024-01-10 00:00:00", Some("2024-02-01 00:00:00"))?,
        sample("2024-01-10 00:00:00", Some("2024-02-01 00:00:01"))?,
    ];
    let counts = classify(&items, &january()?, Duration::days(30));
    Ok(counts == Classification { open: 1, closed: 1, stale: 0 })
}

fn staleness_threshold() -> Result<bool> {
    let window = january()?;
    let exactly = [sample("2024-01-18 00:00:00", None)?];
    let short = [sample("2024-01-18 00:00:01", None)?];
    let threshold = Duration::days(14);
    Ok(classify(&exactly, &window, threshold).stale == 1
        && classify(&short, &window, threshold).stale == 0)
}

fn link_relations() -> Result<bool> {
    let links = Links::parse(
        "<https://api.github.com/x?page=2>; rel=\"next\", <https://api.github.com/x?page=3>; rel=\"last\"",
    );
    let last_page = Links::parse("<https://api.github.com/x?page=1>; rel=\"prev\"");
    Ok(links.get("next") == Some("https://api.github.com/x?page=2") && !last_page.has_next())
}

fn repository_identity() -> Result<bool> {
    let identity = RepositoryIdentity::parse("https://github.com/octo/widgets")?;
    Ok(identity.full_name() == "octo/widgets"
        && RepositoryIdentity::parse("https://github.com/octo").is_err())
}

fn table_rendering() -> Result<bool> {
    let table = render_table("t", [("a", 1), ("bb", 22)]);
    let lines: Vec<&str> = table.lines().map(str::trim_end).collect();
    Ok(lines == ["===", "t", "a  1", "bb 22"])
}
