use {
    crate::models::Transaction,
    chrono::NaiveDate,
    rust_decimal::Decimal,
    serde::{Deserialize, Deserializer, Serialize},
    std::{fmt, num::ParseIntError, str::FromStr},
    thiserror::Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(UserId)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Blocked,
            UserStatus::Blocked => UserStatus::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown user status {0:?}, expected active or blocked")]
pub struct UnknownStatus(pub String);

impl FromStr for UserStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "blocked" => Ok(UserStatus::Blocked),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A user account as shown in the console.
///
/// `balance` is stored on its own and is not kept in sync with the
/// transactions list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub balance: Decimal,
    pub status: UserStatus,
    pub registered_on: NaiveDate,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
    // Display order, not necessarily sorted by date
    pub transactions: Vec<Transaction>,
}

impl User {
    /// Builds a record from creation fields, defaulting whatever was left unset.
    pub fn from_new(id: UserId, fields: NewUser, today: NaiveDate) -> Self {
        User {
            id,
            name: fields.name.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            balance: fields.balance.unwrap_or(Decimal::ZERO),
            status: fields.status.unwrap_or_default(),
            registered_on: fields.registered_on.unwrap_or(today),
            address: fields.address,
            birthday: fields.birthday,
            transactions: vec![],
        }
    }

    /// Merges the fields present in `patch` over this record.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            name,
            phone,
            email,
            balance,
            status,
            registered_on,
            address,
            birthday,
            transactions,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(balance) = balance {
            self.balance = balance;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(registered_on) = registered_on {
            self.registered_on = registered_on;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(birthday) = birthday {
            self.birthday = birthday;
        }
        if let Some(transactions) = transactions {
            self.transactions = transactions;
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Fields accepted when creating a user. Anything left `None` is defaulted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub balance: Option<Decimal>,
    pub status: Option<UserStatus>,
    pub registered_on: Option<NaiveDate>,
    pub address: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl NewUser {
    pub fn named(name: impl Into<String>, phone: impl Into<String>) -> Self {
        NewUser {
            name: Some(name.into()),
            phone: Some(phone.into()),
            ..Default::default()
        }
    }
}

/// Partial update of a user. Identifiers are immutable and have no field here.
///
/// The optional attributes take `Some(None)` to clear them. In JSON an absent
/// key leaves the field alone and `null` clears it; any other key, `id`
/// included, is rejected.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UserPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub balance: Option<Decimal>,
    pub status: Option<UserStatus>,
    pub registered_on: Option<NaiveDate>,
    #[serde(deserialize_with = "present")]
    pub address: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub birthday: Option<Option<NaiveDate>>,
    pub transactions: Option<Vec<Transaction>>,
}

impl UserPatch {
    pub fn clearing_address(self) -> Self {
        UserPatch {
            address: Some(None),
            ..self
        }
    }

    pub fn clearing_birthday(self) -> Self {
        UserPatch {
            birthday: Some(None),
            ..self
        }
    }
}

/// Every field given on the creation form replaces the stored one.
impl From<NewUser> for UserPatch {
    fn from(fields: NewUser) -> Self {
        UserPatch {
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            balance: fields.balance,
            status: fields.status,
            registered_on: fields.registered_on,
            address: fields.address.map(Some),
            birthday: fields.birthday.map(Some),
            transactions: None,
        }
    }
}

// A key that is present always yields `Some`, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Dashboard aggregate over the whole directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub total_users: usize,
    pub active_users: usize,
    pub blocked_users: usize,
    pub total_balance: Decimal,
}
