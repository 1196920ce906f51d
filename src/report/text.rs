use {
    crate::report::{Report, ReportPage},
    std::fmt,
};

const PAGE_BREAK: char = '\u{000C}';

/// Plain-text rendering of a report, one form feed between pages.
pub fn render_text(report: &Report) -> String {
    TextReport(report).to_string()
}

/// [`Report`] formatted as aligned plain-text tables.
pub struct TextReport<'a>(pub &'a Report);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let widths = column_widths(report);

        for (index, page) in report.pages.iter().enumerate() {
            if index == 0 {
                writeln!(f, "{}", report.title)?;
                writeln!(f)?;
                for line in &report.summary {
                    writeln!(f, "{}: {}", line.label, line.value)?;
                }
                writeln!(f)?;
            } else {
                write!(f, "{PAGE_BREAK}")?;
            }

            write_table(f, report, page, &widths)?;
            writeln!(f)?;
            writeln!(f, "{}    {}", page.footer, page.page_label)?;
        }

        Ok(())
    }
}

fn column_widths(report: &Report) -> [usize; 4] {
    let mut widths = report.columns.map(str::len);
    for row in report.rows() {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn write_table(
    f: &mut fmt::Formatter<'_>,
    report: &Report,
    page: &ReportPage,
    widths: &[usize; 4],
) -> fmt::Result {
    write_line(f, &report.columns, widths)?;

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    write_line(f, &rule, widths)?;

    for row in &page.rows {
        write_line(f, &row.cells(), widths)?;
    }
    Ok(())
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize; 4]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, &width))| {
            // Amounts are right-aligned
            if column == 2 {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect();
    writeln!(f, "{}", line.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{directory::seed::seed_users, report::render},
        chrono::{TimeZone, Utc},
    };

    #[test]
    fn test_text_contains_header_rows_and_footer() {
        let user = seed_users().remove(1);
        let report = render(&user, Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap(), 25);

        let text = render_text(&report);

        assert!(text.starts_with("Transaction History Report\n"));
        assert!(text.contains("User: Fatima Benali\n"));
        assert!(text.contains("Status: ACTIVE\n"));
        assert!(text.contains("Date        Type        Amount (MAD)  Status"));
        assert!(text.contains("2024-04-18  Withdrawal       -250.75  Completed"));
        assert!(text.contains("WafR Management Console - Confidential    Page 1 of 1"));
        assert!(!text.contains(PAGE_BREAK));
    }

    #[test]
    fn test_pages_are_separated_by_form_feed() {
        let user = seed_users().remove(2);
        let report = render(&user, Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap(), 1);

        let text = render_text(&report);

        assert_eq!(text.matches(PAGE_BREAK).count(), 2);
        assert_eq!(text.matches("Amount (MAD)").count(), 3);
        assert!(text.contains("Page 3 of 3"));
        assert_eq!(text.matches("Report Generated").count(), 1);
    }
}
