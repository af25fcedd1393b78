use crate::contract::{Account, AccountChanges};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAttribute {
    Id,
    SkId,
    Role,
    Permissions,
    SubmittedAt,
    UpdatedAt,
}

impl AccountAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::SkId => "sk_id",
            Self::Role => "role",
            Self::Permissions => "permissions",
            Self::SubmittedAt => "submittedAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Expression attribute name. `role` is a reserved word in DynamoDB
    /// expressions, so every attribute goes through a `#` alias.
    pub fn name_placeholder(self) -> String {
        format!("#{}", self.as_str())
    }

    pub fn value_placeholder(self) -> String {
        format!(":{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Text(String),
    Millis(i64),
}

pub const PARTITION_KEY: AccountAttribute = AccountAttribute::Id;

pub fn insert_if_absent_condition() -> String {
    format!(
        "attribute_not_exists({})",
        PARTITION_KEY.name_placeholder()
    )
}

pub fn record_exists_condition() -> String {
    format!("attribute_exists({})", PARTITION_KEY.name_placeholder())
}

pub fn account_attributes(account: &Account) -> Vec<(AccountAttribute, StoredValue)> {
    vec![
        (AccountAttribute::Id, StoredValue::Text(account.id.clone())),
        (
            AccountAttribute::SkId,
            StoredValue::Text(account.sk_id.clone()),
        ),
        (
            AccountAttribute::Role,
            StoredValue::Text(account.role.clone()),
        ),
        (
            AccountAttribute::Permissions,
            StoredValue::Text(account.permissions.clone()),
        ),
        (
            AccountAttribute::SubmittedAt,
            StoredValue::Millis(account.submitted_at),
        ),
        (
            AccountAttribute::UpdatedAt,
            StoredValue::Millis(account.updated_at),
        ),
    ]
}

/// Conditional partial update derived from [`AccountChanges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub assignments: Vec<(AccountAttribute, StoredValue)>,
}

impl UpdatePlan {
    pub fn from_changes(changes: &AccountChanges) -> Self {
        Self {
            assignments: vec![
                (
                    AccountAttribute::Role,
                    StoredValue::Text(changes.role.clone()),
                ),
                (
                    AccountAttribute::Permissions,
                    StoredValue::Text(changes.permissions.clone()),
                ),
                (
                    AccountAttribute::UpdatedAt,
                    StoredValue::Millis(changes.updated_at),
                ),
            ],
        }
    }

    pub fn update_expression(&self) -> String {
        let clauses: Vec<String> = self
            .assignments
            .iter()
            .map(|(attribute, _)| {
                format!(
                    "{} = {}",
                    attribute.name_placeholder(),
                    attribute.value_placeholder()
                )
            })
            .collect();
        format!("SET {}", clauses.join(", "))
    }

    /// Name aliases used by the update and its existence condition.
    pub fn expression_attribute_names(&self) -> Vec<(String, &'static str)> {
        let mut names = vec![(PARTITION_KEY.name_placeholder(), PARTITION_KEY.as_str())];
        names.extend(
            self.assignments
                .iter()
                .map(|(attribute, _)| (attribute.name_placeholder(), attribute.as_str())),
        );
        names
    }

    pub fn expression_attribute_values(&self) -> Vec<(String, StoredValue)> {
        self.assignments
            .iter()
            .map(|(attribute, value)| (attribute.value_placeholder(), value.clone()))
            .collect()
    }
}
