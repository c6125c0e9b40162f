use jiff::civil::Date;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::models::store::Record;

#[derive(Serialize, Debug, Clone)]
pub struct Certificate {
    /// UUID to identify the certificate
    pub id: Uuid,
    /// Stable lookup handle, derived from the title
    pub slug: String,
    /// Title of the certificate
    pub title: String,
    /// Organization that issued it
    pub issuer: String,
    /// Day the certificate was issued
    pub issue_date: Date,
    /// Public link to the credential
    pub certificate_link: Option<Url>,
    /// Name of the attached file; the file itself never leaves the
    /// machine and its bytes are never read
    pub file_name: Option<String>,
}

impl Record for Certificate {
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
