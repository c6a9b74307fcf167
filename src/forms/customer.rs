//! Customer form draft and the field validation rules applied on submit.

use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::UserId;

/// Letters (any script, accented included) and whitespace only.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").expect("name pattern compiles"));

/// Basic `local@domain.tld` shape; no whitespace on either side of the `@`.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// A customer field a violation can attach to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Region,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Region => "region",
        };
        write!(f, "{name}")
    }
}

/// One field-scoped complaint, either local (validation) or remote (conflict).
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: Field,
    pub message: String,
}

/// Ordered set of violations collected from a single validation pass.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// First message attached to `field`, if any.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }
}

/// Transient, unsaved candidate customer record edited through the form.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    #[validate(
        regex(path = *NAME_RE, message = "First name must contain only letters and spaces."),
        length(
            min = 3,
            max = 16,
            message = "First name must be at least 3 characters and at most 16 characters."
        )
    )]
    pub first_name: String,
    #[validate(
        regex(path = *NAME_RE, message = "Last name must contain only letters and spaces."),
        length(
            min = 3,
            max = 16,
            message = "Last name must be at least 3 characters and at most 16 characters."
        )
    )]
    pub last_name: String,
    #[validate(regex(path = *EMAIL_RE, message = "Invalid email address."))]
    pub email: String,
    #[validate(
        regex(path = *NAME_RE, message = "Region must contain only letters and spaces."),
        length(
            min = 3,
            max = 24,
            message = "Region must be at least 3 characters and at most 24 characters."
        )
    )]
    pub region: String,
}

impl CustomerForm {
    /// Runs every field rule and collects all violations; never short-circuits
    /// and touches neither network nor state.
    pub fn check(&self) -> Violations {
        let mut violations = Violations::default();
        let Err(errors) = Validate::validate(self) else {
            return violations;
        };
        let by_field = errors.field_errors();
        // Keyed by struct field name; report in a stable field order.
        for (name, field) in [
            ("first_name", Field::FirstName),
            ("last_name", Field::LastName),
            ("email", Field::Email),
            ("region", Field::Region),
        ] {
            if let Some(field_errors) = by_field.get(name) {
                for error in field_errors.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}."));
                    violations.push(field, message);
                }
            }
        }
        violations
    }

    /// Builds the create payload, stamping the session's user id as owner.
    #[must_use]
    pub fn to_new_customer(&self, owner: UserId) -> NewCustomer {
        NewCustomer::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.region.clone(),
            owner,
        )
    }

    /// Builds the update payload, stamping the session's user id as owner.
    #[must_use]
    pub fn to_update_customer(&self, owner: UserId) -> UpdateCustomer {
        UpdateCustomer::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.region.clone(),
            owner,
        )
    }
}

impl From<&Customer> for CustomerForm {
    /// Copy a stored record into an editable draft.
    fn from(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            region: customer.region.clone(),
        }
    }
}
