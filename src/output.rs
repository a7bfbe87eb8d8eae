//! Output formatting for console display.
//!
//! Every block starts with a `===` marker line and a title, followed by
//! either one item per line or a two-column table. Blocks with nothing to
//! show print [`EMPTY`] instead of a body.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Padding, Style};

use crate::analysis::RepositoryReport;
use crate::models::Contributor;
use crate::notifications::Notifications;

/// Marker line printed above every block title.
pub const MARKER: &str = "===";

/// Body printed for a block without items.
pub const EMPTY: &str = "Empty";

/// Title of the trailing notification block.
pub const NOTIFICATIONS_TITLE: &str = "System notifications";

/// Trait for human-readable console output.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: &str) -> String {
    format!("{MARKER}\n{title}")
}

/// Render a titled list with one item per line.
pub fn render_list<I, T>(title: &str, items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    let lines: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    let body = if lines.is_empty() {
        EMPTY.to_string()
    } else {
        lines.join("\n")
    };
    format!("{}\n{body}", header(title))
}

/// Render a titled two-column table.
///
/// Columns are left-aligned and as wide as their widest cell; the first
/// column is followed by a single space.
pub fn render_table<I, A, B>(title: &str, rows: I) -> String
where
    I: IntoIterator<Item = (A, B)>,
    A: ToString,
    B: ToString,
{
    let mut builder = Builder::default();
    let mut count = 0usize;
    for (left, right) in rows {
        builder.push_record([left.to_string(), right.to_string()]);
        count += 1;
    }

    if count == 0 {
        return format!("{}\n{EMPTY}", header(title));
    }

    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Padding::zero())
        .modify(Columns::first(), Padding::new(0, 1, 0, 0));

    format!("{}\n{table}", header(title))
}

/// Render organization repositories as a list of full names.
pub fn render_repositories(org: &str, full_names: &[String]) -> String {
    render_list(&format!("Repositories of {org}"), full_names)
}

/// Render contributors as a `handle / contributions` table.
pub fn render_contributors(full_name: &str, contributors: &[Contributor]) -> String {
    render_table(
        &format!("Contributors of {full_name}"),
        contributors.iter().map(|c| (c.handle(), c.contributions)),
    )
}

/// Render the trailing notification block, or nothing if there are none.
pub fn render_notifications(notes: &Notifications) -> Option<String> {
    if notes.is_empty() {
        None
    } else {
        Some(render_list(NOTIFICATIONS_TITLE, notes.iter()))
    }
}

impl PrettyPrint for RepositoryReport {
    fn pretty_print(&self) -> String {
        let full_name = self.identity.full_name();
        [
            render_contributors(&full_name, &self.contributors),
            render_list(&format!("Pull requests of {full_name}"), [self.pull_requests]),
            render_list(&format!("Issues of {full_name}"), [self.issues]),
        ]
        .join("\n")
    }
}
