use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::models::store::Record;

#[derive(Serialize, Debug, Clone)]
pub struct Project {
    /// UUID to identify the project
    pub id: Uuid,
    /// Stable lookup handle, derived from the title
    pub slug: String,
    /// Title of the project
    pub title: String,
    /// Main technology or stack used
    pub technology: String,
    /// Link to the live project or its repository
    pub url: Option<Url>,
    /// What the project does
    pub description: String,
    /// How long it took, free form ("3 months", "1 semester")
    pub duration: Option<String>,
}

impl Record for Project {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}
