use slug::slugify;
use uuid::Uuid;

use crate::models::project::Project;
use crate::services::form::FormEntity;
use crate::validation::{self, FieldErrors};

/// Raw form values for a project. Empty optional fields mean "not
/// provided".
#[derive(Debug, Default, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub technology: String,
    pub url: String,
    pub description: String,
    pub duration: String,
}

#[derive(Debug)]
pub struct ProjectFields {
    pub title: String,
    pub technology: String,
    pub url: Option<url::Url>,
    pub description: String,
    pub duration: Option<String>,
}

impl FormEntity for Project {
    type Draft = ProjectDraft;
    type Fields = ProjectFields;

    const KIND: &'static str = "Project";

    fn validate(draft: &ProjectDraft) -> Result<ProjectFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = draft.title.trim();
        if title.is_empty() {
            errors.push("title", "Project title is required");
        }

        let technology = draft.technology.trim();
        if technology.is_empty() {
            errors.push("technology", "Technology is required");
        }

        let description = draft.description.trim();
        if description.is_empty() {
            errors.push("description", "Description is required");
        }

        let url = validation::parse_optional_url(&mut errors, "url", &draft.url);

        let duration = draft.duration.trim();
        let duration = (!duration.is_empty()).then(|| duration.to_string());

        let fields = ProjectFields {
            title: title.to_string(),
            technology: technology.to_string(),
            url,
            description: description.to_string(),
            duration,
        };
        errors.into_result(fields)
    }

    fn create(fields: ProjectFields) -> Project {
        Project {
            id: Uuid::new_v4(),
            slug: slugify(&fields.title),
            title: fields.title,
            technology: fields.technology,
            url: fields.url,
            description: fields.description,
            duration: fields.duration,
        }
    }

    fn update(original: &Project, fields: ProjectFields) -> Project {
        Project {
            id: original.id,
            slug: slugify(&fields.title),
            title: fields.title,
            technology: fields.technology,
            url: fields.url,
            description: fields.description,
            duration: fields.duration,
        }
    }

    fn draft_from(record: &Project) -> ProjectDraft {
        ProjectDraft {
            title: record.title.clone(),
            technology: record.technology.clone(),
            url: record
                .url
                .as_ref()
                .map(|u| u.to_string())
                .unwrap_or_default(),
            description: record.description.clone(),
            duration: record.duration.clone().unwrap_or_default(),
        }
    }
}
