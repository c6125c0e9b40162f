use slug::slugify;
use uuid::Uuid;

use crate::models::skill::{Skill, SkillLevel};
use crate::services::form::FormEntity;
use crate::validation::FieldErrors;

/// Raw form values for a skill, exactly as entered.
#[derive(Debug, Default, Clone)]
pub struct SkillDraft {
    pub name: String,
    pub level: String,
    pub description: String,
}

/// Accepted skill fields, ready to become a record.
#[derive(Debug)]
pub struct SkillFields {
    pub name: String,
    pub level: SkillLevel,
    pub description: String,
}

impl FormEntity for Skill {
    type Draft = SkillDraft;
    type Fields = SkillFields;

    const KIND: &'static str = "Skill";

    fn validate(draft: &SkillDraft) -> Result<SkillFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = draft.name.trim();
        if name.is_empty() {
            errors.push("name", "Skill name is required");
        }

        let level_input = draft.level.trim();
        let level = if level_input.is_empty() {
            errors.push("level", "Skill level is required");
            None
        } else {
            match level_input.parse::<SkillLevel>() {
                Ok(level) => Some(level),
                Err(_) => {
                    errors.push("level", "Level must be Beginner, Intermediate or Advanced");
                    None
                }
            }
        };

        let description = draft.description.trim();
        if description.is_empty() {
            errors.push("description", "Description is required");
        }

        match (level, errors.is_empty()) {
            (Some(level), true) => Ok(SkillFields {
                name: name.to_string(),
                level,
                description: description.to_string(),
            }),
            _ => Err(errors),
        }
    }

    fn create(fields: SkillFields) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            slug: slugify(&fields.name),
            name: fields.name,
            level: fields.level,
            description: fields.description,
            date_added: jiff::Zoned::now().date(),
        }
    }

    fn update(original: &Skill, fields: SkillFields) -> Skill {
        Skill {
            id: original.id,
            slug: slugify(&fields.name),
            name: fields.name,
            level: fields.level,
            description: fields.description,
            // the added-on date never changes after creation
            date_added: original.date_added,
        }
    }

    fn draft_from(record: &Skill) -> SkillDraft {
        SkillDraft {
            name: record.name.clone(),
            level: record.level.to_string(),
            description: record.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store::{Collection, Record};
    use crate::services::form::{FormController, NotificationKind, SubmitError};

    fn draft(name: &str, level: &str, description: &str) -> SkillDraft {
        SkillDraft {
            name: name.to_string(),
            level: level.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn empty_draft_is_rejected_per_field() {
        let errors = Skill::validate(&SkillDraft::default()).unwrap_err();
        assert_eq!(errors.get("name"), Some("Skill name is required"));
        assert_eq!(errors.get("level"), Some("Skill level is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
    }

    #[test]
    fn minimal_draft_is_accepted() {
        let fields = Skill::validate(&draft("Rust", "advanced", "Systems work")).expect("valid");
        assert_eq!(fields.name, "Rust");
        assert_eq!(fields.level, SkillLevel::Advanced);
    }

    #[test]
    fn unknown_level_is_a_field_error() {
        let errors = Skill::validate(&draft("Rust", "wizard", "Systems work")).unwrap_err();
        assert_eq!(
            errors.get("level"),
            Some("Level must be Beginner, Intermediate or Advanced")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn whitespace_only_fields_count_as_empty() {
        let errors = Skill::validate(&draft("   ", "Beginner", "\t")).unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("description").is_some());
    }

    #[test]
    fn submit_creates_a_record_and_clears_the_draft() {
        let mut records: Collection<Skill> = Collection::new();
        let mut form: FormController<Skill> = FormController::new();

        *form.draft_mut() = draft("React.js", "Intermediate", "Front-end work");
        let notification = form.submit(&mut records).expect("accepted");

        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, "Skill added successfully");
        assert_eq!(records.len(), 1);
        let skill = records.iter().next().expect("one record");
        assert_eq!(skill.name, "React.js");
        assert_eq!(skill.slug, "react-js");
        assert!(form.draft().name.is_empty());
        assert!(!form.is_editing());
    }

    #[test]
    fn rejected_submit_keeps_state_so_a_fixed_draft_goes_through() {
        let mut records: Collection<Skill> = Collection::new();
        let mut form: FormController<Skill> = FormController::new();

        *form.draft_mut() = draft("Rust", "", "Systems work");
        let err = form.submit(&mut records).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(_)));
        assert_eq!(records.len(), 0);
        assert_eq!(form.draft().name, "Rust");

        form.draft_mut().level = "Advanced".to_string();
        form.submit(&mut records).expect("fixed draft accepted");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn edit_prefills_the_draft_and_update_keeps_position_and_date() {
        let mut records: Collection<Skill> = Collection::new();
        let mut form: FormController<Skill> = FormController::new();

        *form.draft_mut() = draft("Python", "Beginner", "Scripting");
        form.submit(&mut records).expect("accepted");
        *form.draft_mut() = draft("SQL", "Beginner", "Queries");
        form.submit(&mut records).expect("accepted");

        let id = records.iter().next().expect("first record").id();
        let date_added = records.get(id).expect("record").date_added;

        form.start_edit(&records, id).expect("known id");
        assert_eq!(form.draft().name, "Python");
        assert_eq!(form.editing_id(), Some(id));

        form.draft_mut().level = "Intermediate".to_string();
        let notification = form.submit(&mut records).expect("accepted");
        assert_eq!(notification.message, "Skill updated successfully");

        assert_eq!(records.position(id), Some(0));
        let updated = records.get(id).expect("record");
        assert_eq!(updated.level, SkillLevel::Intermediate);
        assert_eq!(updated.date_added, date_added);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn editing_a_vanished_record_surfaces_not_found_and_resets() {
        let mut records: Collection<Skill> = Collection::new();
        let mut form: FormController<Skill> = FormController::new();

        *form.draft_mut() = draft("Go", "Beginner", "Small services");
        form.submit(&mut records).expect("accepted");
        let id = records.iter().next().expect("record").id();

        form.start_edit(&records, id).expect("known id");
        records.remove(id);

        let err = form.submit(&mut records).unwrap_err();
        assert!(matches!(err, SubmitError::Vanished(_)));
        assert!(!form.is_editing());
        assert_eq!(records.len(), 0);
    }

    #[test]
    fn cancel_clears_the_editing_state() {
        let mut records: Collection<Skill> = Collection::new();
        let mut form: FormController<Skill> = FormController::new();

        *form.draft_mut() = draft("Go", "Beginner", "Small services");
        form.submit(&mut records).expect("accepted");
        let id = records.iter().next().expect("record").id();

        form.start_edit(&records, id).expect("known id");
        form.cancel();
        assert!(!form.is_editing());
        assert!(form.draft().name.is_empty());
    }
}
