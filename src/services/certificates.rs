use jiff::civil::Date;
use slug::slugify;
use url::Url;
use uuid::Uuid;

use crate::models::certificate::Certificate;
use crate::services::form::FormEntity;
use crate::validation::{self, FieldErrors, FileHandle};

/// Raw form values for a certificate. The file, when present, is the
/// handle the presentation layer built from the picked path.
#[derive(Debug, Default, Clone)]
pub struct CertificateDraft {
    pub title: String,
    pub issuer: String,
    pub issue_date: String,
    pub certificate_link: String,
    pub file: Option<FileHandle>,
}

#[derive(Debug)]
pub struct CertificateFields {
    pub title: String,
    pub issuer: String,
    pub issue_date: Date,
    pub certificate_link: Option<Url>,
    pub file_name: Option<String>,
}

impl FormEntity for Certificate {
    type Draft = CertificateDraft;
    type Fields = CertificateFields;

    const KIND: &'static str = "Certificate";

    fn validate(draft: &CertificateDraft) -> Result<CertificateFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = draft.title.trim();
        if title.is_empty() {
            errors.push("title", "Certificate title is required");
        }

        let issuer = draft.issuer.trim();
        if issuer.is_empty() {
            errors.push("issuer", "Issuer is required");
        }

        let issue_date = validation::parse_required_date(
            &mut errors,
            "issue_date",
            &draft.issue_date,
            "Issue date is required",
        );

        let certificate_link =
            validation::parse_optional_url(&mut errors, "certificate_link", &draft.certificate_link);

        let file_name = match &draft.file {
            Some(file) => {
                validation::check_file(&mut errors, "file", file);
                Some(file.name.clone())
            }
            None => None,
        };

        match (issue_date, errors.is_empty()) {
            (Some(issue_date), true) => Ok(CertificateFields {
                title: title.to_string(),
                issuer: issuer.to_string(),
                issue_date,
                certificate_link,
                file_name,
            }),
            _ => Err(errors),
        }
    }

    fn create(fields: CertificateFields) -> Certificate {
        Certificate {
            id: Uuid::new_v4(),
            slug: slugify(&fields.title),
            title: fields.title,
            issuer: fields.issuer,
            issue_date: fields.issue_date,
            certificate_link: fields.certificate_link,
            file_name: fields.file_name,
        }
    }

    fn update(original: &Certificate, fields: CertificateFields) -> Certificate {
        Certificate {
            id: original.id,
            slug: slugify(&fields.title),
            title: fields.title,
            issuer: fields.issuer,
            issue_date: fields.issue_date,
            certificate_link: fields.certificate_link,
            // a new attachment replaces the old one; editing without
            // picking a file keeps what was attached before
            file_name: fields.file_name.or_else(|| original.file_name.clone()),
        }
    }

    fn draft_from(record: &Certificate) -> CertificateDraft {
        CertificateDraft {
            title: record.title.clone(),
            issuer: record.issuer.clone(),
            issue_date: record.issue_date.to_string(),
            certificate_link: record
                .certificate_link
                .as_ref()
                .map(|u| u.to_string())
                .unwrap_or_default(),
            file: None,
        }
    }
}
