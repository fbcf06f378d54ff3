//! Basic types shared by the forms, the store and the workflows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The three independent user workflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    /// Create a new account
    CreateAccount,
    /// Look up an account's balance
    Lookup,
    /// Transfer funds between two accounts
    Transfer,
}

impl std::str::FromStr for FormKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create-account" => Ok(FormKind::CreateAccount),
            "lookup" => Ok(FormKind::Lookup),
            "transfer" => Ok(FormKind::Transfer),
            _ => Err(format!("Invalid form: {}", s)),
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormKind::CreateAccount => write!(f, "create-account"),
            FormKind::Lookup => write!(f, "lookup"),
            FormKind::Transfer => write!(f, "transfer"),
        }
    }
}

/// Input fields across all forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    AccountId,
    InitialBalance,
    SourceAccountId,
    DestinationAccountId,
    Amount,
}

impl Field {
    /// Form field name as used in requests and HTML
    pub fn name(&self) -> &'static str {
        match self {
            Field::AccountId => "account_id",
            Field::InitialBalance => "initial_balance",
            Field::SourceAccountId => "source_account_id",
            Field::DestinationAccountId => "destination_account_id",
            Field::Amount => "amount",
        }
    }

    /// Account id fields only ever hold digits
    pub fn is_account_id(&self) -> bool {
        matches!(self, Field::AccountId | Field::SourceAccountId | Field::DestinationAccountId)
    }
}

impl std::str::FromStr for Field {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account_id" => Ok(Field::AccountId),
            "initial_balance" => Ok(Field::InitialBalance),
            "source_account_id" => Ok(Field::SourceAccountId),
            "destination_account_id" => Ok(Field::DestinationAccountId),
            "amount" => Ok(Field::Amount),
            _ => Err(format!("Invalid field: {}", s)),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an account reference has been seen by the backend since it was added locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    /// Appended after a successful create, not yet read back
    Projected,
    /// A lookup of this id succeeded
    Confirmed,
}

/// Minimal client-side record of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRef {
    pub account_id: u64,
    pub created_at: DateTime<Utc>,
    pub sync: SyncState,
}

impl AccountRef {
    /// A freshly created account, projected locally
    pub fn projected(account_id: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            account_id,
            created_at,
            sync: SyncState::Projected,
        }
    }

    /// Creation time as shown in account lists, e.g. `Mar 04, 2025, 02:07 PM`
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%b %d, %Y, %I:%M %p").to_string()
    }
}

/// Account detail returned by `GET /accounts/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetail {
    #[serde(default)]
    pub account_id: Option<u64>,
    #[serde(deserialize_with = "string_or_number")]
    pub balance: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Values carried by the confirmation display after a successful transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub source_account_id: String,
    pub destination_account_id: String,
    pub amount: String,
    pub completed_at: DateTime<Utc>,
}

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}
