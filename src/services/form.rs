use thiserror::Error;
use uuid::Uuid;

use crate::models::store::{Collection, NotFound, Record};
use crate::validation::FieldErrors;

/// One managed entity kind, as the form controller sees it.
pub trait FormEntity: Record + Clone {
    /// Raw, user-entered field values.
    type Draft: Default + Clone;
    /// Parsed field values that passed validation.
    type Fields;

    /// Display name used in notifications ("Skill", "Project", ...).
    const KIND: &'static str;

    fn validate(draft: &Self::Draft) -> Result<Self::Fields, FieldErrors>;

    /// Build a fresh record: assigns the id and any creation-time
    /// fields.
    fn create(fields: Self::Fields) -> Self;

    /// Rebuild an existing record from accepted fields, keeping the id
    /// and whatever must survive an edit.
    fn update(original: &Self, fields: Self::Fields) -> Self;

    /// Pre-populate a draft from a record, for editing.
    fn draft_from(record: &Self) -> Self::Draft;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message for the presentation layer to show once.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Field the message is about, when it is field-specific.
    pub field: Option<String>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            field: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            field: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft failed validation; nothing was touched.
    #[error("{0}")]
    Rejected(FieldErrors),

    /// The record being edited disappeared between `start_edit` and
    /// `submit`.
    #[error("The record being edited no longer exists")]
    Vanished(#[from] NotFound),
}

/// Holds the draft for one entity kind and tracks whether a submit
/// will create a new record or replace an existing one.
pub struct FormController<T: FormEntity> {
    draft: T::Draft,
    editing: Option<Uuid>,
}

impl<T: FormEntity> FormController<T> {
    pub fn new() -> Self {
        Self {
            draft: T::Draft::default(),
            editing: None,
        }
    }

    pub fn draft(&self) -> &T::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T::Draft {
        &mut self.draft
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Load a record into the draft and switch to editing it.
    pub fn start_edit(&mut self, records: &Collection<T>, id: Uuid) -> Result<(), NotFound> {
        let record = records.get(id).ok_or(NotFound { id })?;
        self.draft = T::draft_from(record);
        self.editing = Some(id);
        Ok(())
    }

    /// Drop the draft and go back to creating.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validate the draft, then create or replace. A rejected draft
    /// leaves both the controller and the collection untouched so the
    /// user can fix the reported fields and submit again.
    pub fn submit(&mut self, records: &mut Collection<T>) -> Result<Notification, SubmitError> {
        let fields = T::validate(&self.draft).map_err(SubmitError::Rejected)?;
        let notification = match self.editing {
            None => {
                records.insert(T::create(fields));
                Notification::success(format!("{} added successfully", T::KIND))
            }
            Some(id) => {
                let Some(original) = records.get(id) else {
                    self.reset();
                    return Err(SubmitError::Vanished(NotFound { id }));
                };
                let updated = T::update(original, fields);
                records.replace(id, updated).map_err(SubmitError::Vanished)?;
                Notification::success(format!("{} updated successfully", T::KIND))
            }
        };
        self.reset();
        Ok(notification)
    }

    fn reset(&mut self) {
        self.draft = T::Draft::default();
        self.editing = None;
    }
}

impl<T: FormEntity> Default for FormController<T> {
    fn default() -> Self {
        Self::new()
    }
}
