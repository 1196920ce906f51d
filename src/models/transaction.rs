use {
    chrono::NaiveDate,
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Identifier of a transaction, unique within its owning user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        TransactionId(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Negative amounts are withdrawals, everything else is a deposit.
    pub fn from_amount(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            TransactionKind::Withdrawal
        } else {
            TransactionKind::Deposit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state of a transaction. Unknown states are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Other(status) => status,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "completed" => TransactionStatus::Completed,
            "pending" => TransactionStatus::Pending,
            _ => TransactionStatus::Other(value),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single movement on a user's account. The signed amount is authoritative;
/// the kind is derived from it. Serialized records carry the kind as `type`,
/// which is ignored when reading one back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TransactionRecord")]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        date: NaiveDate,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Self {
        Transaction {
            id: id.into(),
            date,
            amount,
            status,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from_amount(self.amount)
    }
}

#[derive(Serialize)]
struct TransactionRecord {
    id: TransactionId,
    date: NaiveDate,
    amount: Decimal,
    #[serde(rename = "type")]
    kind: TransactionKind,
    status: TransactionStatus,
}

impl From<Transaction> for TransactionRecord {
    fn from(transaction: Transaction) -> Self {
        let kind = transaction.kind();
        let Transaction {
            id,
            date,
            amount,
            status,
        } = transaction;

        TransactionRecord {
            id,
            date,
            amount,
            kind,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_amount_sign() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
        let withdrawal = Transaction::new(
            "t2",
            date,
            Decimal::new(-7550, 2),
            TransactionStatus::Completed,
        );
        let deposit = Transaction::new("t1", date, Decimal::new(25000, 2), TransactionStatus::Completed);
        let zero = Transaction::new("t0", date, Decimal::ZERO, TransactionStatus::Pending);

        assert_eq!(withdrawal.kind(), TransactionKind::Withdrawal);
        assert_eq!(deposit.kind(), TransactionKind::Deposit);
        assert_eq!(zero.kind(), TransactionKind::Deposit);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = TransactionStatus::from("reversed".to_string());
        assert_eq!(status, TransactionStatus::Other("reversed".to_string()));
        assert_eq!(status.to_string(), "reversed");
        assert_eq!(
            TransactionStatus::from("completed".to_string()),
            TransactionStatus::Completed
        );
    }

    #[test]
    fn test_transaction_json_shape() {
        let transaction = Transaction::new(
            "t5",
            NaiveDate::from_ymd_opt(2024, 4, 18).unwrap(),
            Decimal::new(-25075, 2),
            TransactionStatus::Completed,
        );

        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json["id"], "t5");
        assert_eq!(json["date"], "2024-04-18");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["type"], "withdrawal");

        let read_back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(read_back, transaction);
    }

    #[test]
    fn test_stored_type_never_overrides_amount_sign() {
        let json = serde_json::json!({
            "id": "t1",
            "date": "2024-04-15",
            "amount": "250.00",
            "type": "withdrawal",
            "status": "completed"
        });

        let transaction: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(transaction.kind(), TransactionKind::Deposit);
        assert_eq!(serde_json::to_value(&transaction).unwrap()["type"], "deposit");
    }
}
