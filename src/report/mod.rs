//! Transaction history report for a single user.
//!
//! [`render`] lays a user's transactions out into pages. It is pure: the same
//! user, timestamp and page size always produce the same [`Report`].
//! [`ReportGenerator`] wraps it with a clock and a configured page size.

pub mod text;

use {
    crate::{
        latency::Clock,
        metrics::REPORTS_RENDERED_TOTAL,
        models::{Transaction, User},
    },
    chrono::{DateTime, Utc},
    serde::Serialize,
    std::sync::Arc,
    tracing::debug,
};

pub const TITLE: &str = "Transaction History Report";
pub const FOOTER: &str = "WafR Management Console - Confidential";
pub const COLUMNS: [&str; 4] = ["Date", "Type", "Amount (MAD)", "Status"];
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub status: String,
}

impl ReportRow {
    fn from_transaction(transaction: &Transaction) -> Self {
        ReportRow {
            date: transaction.date.format("%Y-%m-%d").to_string(),
            kind: capitalize(transaction.kind().as_str()),
            amount: format!("{:.2}", transaction.amount),
            status: capitalize(transaction.status.as_str()),
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [&self.date, &self.kind, &self.amount, &self.status]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub number: usize,
    pub rows: Vec<ReportRow>,
    pub footer: String,
    pub page_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: &'static str,
    pub generated_at: DateTime<Utc>,
    pub summary: Vec<SummaryLine>,
    pub columns: [&'static str; 4],
    pub pages: Vec<ReportPage>,
    pub file_stem: String,
}

impl Report {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.pages.iter().flat_map(|page| page.rows.iter())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lays out `user`'s transactions, `rows_per_page` to a page. There is always
/// at least one page.
pub fn render(user: &User, generated_at: DateTime<Utc>, rows_per_page: usize) -> Report {
    let summary = vec![
        SummaryLine {
            label: "User",
            value: user.name.clone(),
        },
        SummaryLine {
            label: "Phone",
            value: user.phone.clone(),
        },
        SummaryLine {
            label: "Balance",
            value: format!("{:.2} MAD", user.balance),
        },
        SummaryLine {
            label: "Status",
            value: user.status.as_str().to_uppercase(),
        },
        SummaryLine {
            label: "Report Generated",
            value: generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        },
    ];

    let rows: Vec<ReportRow> = user
        .transactions
        .iter()
        .map(ReportRow::from_transaction)
        .collect();

    let mut chunks: Vec<Vec<ReportRow>> = rows
        .chunks(rows_per_page.max(1))
        .map(<[ReportRow]>::to_vec)
        .collect();
    if chunks.is_empty() {
        chunks.push(vec![]);
    }

    let page_count = chunks.len();
    let pages = chunks
        .into_iter()
        .enumerate()
        .map(|(index, rows)| ReportPage {
            number: index + 1,
            rows,
            footer: FOOTER.to_string(),
            page_label: format!("Page {} of {}", index + 1, page_count),
        })
        .collect();

    Report {
        title: TITLE,
        generated_at,
        summary,
        columns: COLUMNS,
        pages,
        file_stem: format!(
            "transactions_{}_{}",
            user.phone,
            generated_at.format("%Y-%m-%d")
        ),
    }
}

pub struct ReportGenerator {
    clock: Arc<dyn Clock>,
    rows_per_page: usize,
}

impl ReportGenerator {
    pub fn new(clock: Arc<dyn Clock>, rows_per_page: usize) -> Self {
        ReportGenerator {
            clock,
            rows_per_page,
        }
    }

    pub fn render(&self, user: &User) -> Report {
        let report = render(user, self.clock.now(), self.rows_per_page);

        REPORTS_RENDERED_TOTAL.inc();
        debug!(
            "Rendered {} transactions for user {} on {} pages",
            user.transactions.len(),
            user.id,
            report.page_count()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            directory::seed::seed_users,
            latency::FixedClock,
            models::{NewUser, TransactionStatus, UserId},
        },
        chrono::{NaiveDate, TimeZone},
        rust_decimal::Decimal,
    };

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    fn alami() -> User {
        seed_users().remove(0)
    }

    #[test]
    fn test_header_and_rows() {
        let report = render(&alami(), at(), DEFAULT_ROWS_PER_PAGE);

        assert_eq!(report.title, "Transaction History Report");
        let summary: Vec<(&str, &str)> = report
            .summary
            .iter()
            .map(|line| (line.label, line.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("User", "Mohammed Alami"),
                ("Phone", "0612345678"),
                ("Balance", "1250.75 MAD"),
                ("Status", "ACTIVE"),
                ("Report Generated", "2026-10-14 09:30 UTC"),
            ]
        );

        let rows: Vec<[&str; 4]> = report.rows().map(ReportRow::cells).collect();
        assert_eq!(
            rows,
            vec![
                ["2024-04-22", "Deposit", "250.00", "Completed"],
                ["2024-04-20", "Withdrawal", "-75.50", "Completed"],
                ["2024-04-15", "Deposit", "500.00", "Completed"],
            ]
        );
        assert_eq!(report.file_stem, "transactions_0612345678_2026-10-14");
    }

    #[test]
    fn test_pagination_labels_every_page() {
        let mut user = alami();
        user.transactions = (0..7)
            .map(|i| {
                Transaction::new(
                    format!("p{i}").as_str(),
                    NaiveDate::from_ymd_opt(2024, 5, 1 + i).unwrap(),
                    Decimal::new(1000 + i64::from(i), 2),
                    TransactionStatus::Pending,
                )
            })
            .collect();

        let report = render(&user, at(), 3);

        assert_eq!(report.page_count(), 3);
        let sizes: Vec<usize> = report.pages.iter().map(|page| page.rows.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        for page in &report.pages {
            assert_eq!(page.footer, FOOTER);
            assert_eq!(page.page_label, format!("Page {} of 3", page.number));
        }
        assert_eq!(report.pages[0].rows[0].status, "Pending");
        assert_eq!(report.pages[2].rows[0].amount, "10.06");
    }

    #[test]
    fn test_user_without_transactions_has_one_page() {
        let user = User::from_new(
            UserId(4),
            NewUser::named("New", "000"),
            NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        );

        let report = render(&user, at(), DEFAULT_ROWS_PER_PAGE);

        assert_eq!(report.page_count(), 1);
        assert!(report.pages[0].rows.is_empty());
        assert_eq!(report.pages[0].page_label, "Page 1 of 1");
        assert_eq!(report.summary[2].value, "0.00 MAD");
    }

    #[test]
    fn test_deterministic_with_frozen_clock() {
        let generator = ReportGenerator::new(Arc::new(FixedClock(at())), 2);
        let user = alami();

        assert_eq!(generator.render(&user), generator.render(&user));
        assert_eq!(generator.render(&user).page_count(), 2);
    }
}
