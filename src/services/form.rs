//! Form/edit-mode state machine binding drafts, validation and submission.

use crate::domain::customer::Customer;
use crate::domain::types::{CustomerId, UserId};
use crate::forms::customer::{CustomerForm, Field, Violations};
use crate::gateway::CustomerGateway;
use crate::services::collection::CustomerCollection;
use crate::services::{ServiceError, ServiceResult};

/// Whether the open form creates a new record or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CustomerId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        draft: CustomerForm,
        violations: Violations,
    },
}

/// Result of a submit attempt that did not fail outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was saved and the form closed.
    Saved,
    /// The form stays open: violations are populated, or it was not open.
    Rejected,
}

/// Drives the create/edit dialog. The draft exists only while the form is
/// open and is discarded on close or successful submit.
#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FormState::Open { .. })
    }

    /// Open with an empty draft in create mode.
    pub fn open_for_create(&mut self) {
        self.state = FormState::Open {
            mode: FormMode::Create,
            draft: CustomerForm::default(),
            violations: Violations::default(),
        };
    }

    /// Open with a copy of `customer` in edit mode.
    pub fn open_for_edit(&mut self, customer: &Customer) {
        self.state = FormState::Open {
            mode: FormMode::Edit(customer.id),
            draft: CustomerForm::from(customer),
            violations: Violations::default(),
        };
    }

    /// Update one draft field in place; ignored when the form is closed.
    pub fn edit_field(&mut self, field: Field, value: &str) {
        if let FormState::Open { draft, .. } = &mut self.state {
            match field {
                Field::FirstName => draft.first_name = value.to_string(),
                Field::LastName => draft.last_name = value.to_string(),
                Field::Email => draft.email = value.to_string(),
                Field::Region => draft.region = value.to_string(),
            }
        }
    }

    /// Discard the draft from any state.
    pub fn close(&mut self) {
        self.state = FormState::Closed;
    }

    pub fn draft(&self) -> Option<&CustomerForm> {
        match &self.state {
            FormState::Open { draft, .. } => Some(draft),
            FormState::Closed => None,
        }
    }

    pub fn violations(&self) -> Option<&Violations> {
        match &self.state {
            FormState::Open { violations, .. } => Some(violations),
            FormState::Closed => None,
        }
    }

    /// Validate the draft and, if clean, delegate to the collection manager.
    ///
    /// On success the form closes. Validation failures and backend conflicts
    /// keep it open with `violations` populated. A missing session or a
    /// transport failure is returned as an error with the form left open.
    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        collection: &mut CustomerCollection,
        owner: Option<UserId>,
    ) -> ServiceResult<SubmitOutcome>
    where
        G: CustomerGateway + ?Sized,
    {
        let FormState::Open {
            mode,
            draft,
            violations: _,
        } = std::mem::take(&mut self.state)
        else {
            return Ok(SubmitOutcome::Rejected);
        };

        let violations = draft.check();
        if !violations.is_empty() {
            self.state = FormState::Open {
                mode,
                draft,
                violations,
            };
            return Ok(SubmitOutcome::Rejected);
        }

        let Some(owner) = owner else {
            self.state = FormState::Open {
                mode,
                draft,
                violations,
            };
            return Err(ServiceError::NotAuthenticated);
        };

        let result = match mode {
            FormMode::Create => collection
                .create(gateway, &draft.to_new_customer(owner))
                .await
                .map(|_| ()),
            FormMode::Edit(id) => collection
                .update(gateway, id, &draft.to_update_customer(owner))
                .await
                .map(|_| ()),
        };

        match result {
            Ok(()) => Ok(SubmitOutcome::Saved),
            Err(ServiceError::Conflict { field, message }) => {
                let mut violations = Violations::default();
                violations.push(field, message);
                self.state = FormState::Open {
                    mode,
                    draft,
                    violations,
                };
                Ok(SubmitOutcome::Rejected)
            }
            Err(other) => {
                self.state = FormState::Open {
                    mode,
                    draft,
                    violations: Violations::default(),
                };
                Err(other)
            }
        }
    }
}
