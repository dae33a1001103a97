//! Ranked table rendering.

use debstats::RankedEntry;

/// Render entries as a borderless, 1-indexed table.
///
/// ```text
/// 1.  busybox-syslogd  3
/// 2.  swift-object     2
/// 3.  tlp              1
/// ```
pub fn render_table(entries: &[RankedEntry]) -> String {
    let rows: Vec<(String, &str, String)> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (format!("{}.", i + 1), e.name.as_str(), e.count.to_string()))
        .collect();

    let rank_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0);
    let name_width = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(0);
    let count_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (rank, name, count) in rows {
        out.push_str(&format!(
            "{:<rank_width$}  {:<name_width$}  {:>count_width$}\n",
            rank, name, count
        ));
    }
    out
}
