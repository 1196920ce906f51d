//! Demo accounts the console starts with.

use {
    crate::models::{Transaction, TransactionStatus, User, UserId, UserStatus},
    chrono::NaiveDate,
    rust_decimal::Decimal,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn completed(id: &str, on: NaiveDate, cents: i64) -> Transaction {
    Transaction::new(id, on, Decimal::new(cents, 2), TransactionStatus::Completed)
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: u64,
    name: &str,
    phone: &str,
    email: &str,
    balance_cents: i64,
    status: UserStatus,
    registered_on: NaiveDate,
    transactions: Vec<Transaction>,
) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        balance: Decimal::new(balance_cents, 2),
        status,
        registered_on,
        address: None,
        birthday: None,
        transactions,
    }
}

pub fn seed_users() -> Vec<User> {
    vec![
        user(
            1,
            "Mohammed Alami",
            "0612345678",
            "malami@example.com",
            125075,
            UserStatus::Active,
            date(2023, 9, 15),
            vec![
                completed("t1", date(2024, 4, 22), 25000),
                completed("t2", date(2024, 4, 20), -7550),
                completed("t3", date(2024, 4, 15), 50000),
            ],
        ),
        user(
            2,
            "Fatima Benali",
            "0698765432",
            "fbenali@example.com",
            345025,
            UserStatus::Active,
            date(2023, 10, 5),
            vec![
                completed("t4", date(2024, 4, 25), 100000),
                completed("t5", date(2024, 4, 18), -25075),
                completed("t6", date(2024, 4, 10), 75050),
            ],
        ),
        user(
            3,
            "Karim Idrissi",
            "0654321987",
            "kidrissi@example.com",
            78030,
            UserStatus::Blocked,
            date(2023, 11, 20),
            vec![
                completed("t7", date(2024, 4, 15), 30000),
                completed("t8", date(2024, 4, 12), -5000),
                completed("t9", date(2024, 4, 5), 20000),
            ],
        ),
    ]
}
