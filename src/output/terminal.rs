// Text report for the terminal.
//
// The layout is fixed: one block per cluster headed by its first member, the
// noise block, then the cluster count. Color only decorates the header lines;
// with color off the bytes are plain ASCII markers plus the input text.

use std::io::{self, Write};

use colored::Colorize;

use crate::grouping::ClusterGroups;
use crate::pipeline::ClusterResult;

/// Write the grouping report to `out`.
///
/// Clusters appear in ascending label order, noise last.
pub fn write_report<W: Write>(out: &mut W, groups: &ClusterGroups, color: bool) -> io::Result<()> {
    for (_, members) in groups.clusters() {
        // Groups are never empty: a label exists only because a member has it
        let name = members.first().map(String::as_str).unwrap_or_default();
        let header = format!("[*] --- Cluster: {name} ---");
        writeln!(out, "{}", paint(&header, color, |s| s.bold().bright_cyan().to_string()))?;
        write_members(out, members)?;
    }

    if let Some(noise) = groups.noise() {
        let header = "[*] --- Outside any cluster ---";
        writeln!(out, "{}", paint(header, color, |s| s.bold().yellow().to_string()))?;
        write_members(out, noise)?;
    }

    let summary = format!("[*] Estimated number of clusters: {}", groups.cluster_count());
    writeln!(out, "{}", paint(&summary, color, |s| s.bold().to_string()))?;
    Ok(())
}

/// Render the report into a string (no color).
pub fn render_report(groups: &ClusterGroups) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report(&mut buf, groups, false);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Print run statistics to stderr.
pub fn display_stats(result: &ClusterResult) {
    eprintln!("{}", "--- Run statistics ---".dimmed());
    eprintln!("  Lines:              {}", result.labels.len());
    eprintln!("  N-gram vocabulary:  {}", result.vocabulary_size);
    eprintln!("  Constant columns:   {}", result.degenerate_columns);
    eprintln!("  PCA components:     {}", result.components);
    eprintln!("  Clusters:           {}", result.cluster_count());
    eprintln!("  Noise lines:        {}", result.noise_count());
}

fn write_members<W: Write>(out: &mut W, members: &[String]) -> io::Result<()> {
    for member in members {
        writeln!(out, "[+] {member}")?;
    }
    Ok(())
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> String) -> String {
    if color {
        style(text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(items: &[(&str, i32)]) -> ClusterGroups {
        let corpus: Vec<String> = items.iter().map(|(s, _)| s.to_string()).collect();
        let labels: Vec<i32> = items.iter().map(|(_, l)| *l).collect();
        ClusterGroups::from_labels(&corpus, &labels).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let g = groups(&[("foo1", 0), ("bar1", 1), ("odd", -1), ("foo2", 0), ("bar2", 1)]);
        let report = render_report(&g);
        let expected = "\
[*] --- Cluster: foo1 ---
[+] foo1
[+] foo2
[*] --- Cluster: bar1 ---
[+] bar1
[+] bar2
[*] --- Outside any cluster ---
[+] odd
[*] Estimated number of clusters: 2
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_without_noise_or_clusters() {
        let g = groups(&[("a", 0), ("b", 0)]);
        let report = render_report(&g);
        assert!(!report.contains("Outside any cluster"));
        assert!(report.ends_with("[*] Estimated number of clusters: 1\n"));

        let g = groups(&[("a", -1)]);
        assert_eq!(
            render_report(&g),
            "[*] --- Outside any cluster ---\n[+] a\n[*] Estimated number of clusters: 0\n"
        );
    }

    #[test]
    fn test_empty_member_keeps_marker() {
        let g = groups(&[("", -1)]);
        assert!(render_report(&g).contains("[+] \n"));
    }
}
