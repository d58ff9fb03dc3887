//! Form field extraction shared by the handlers
//!
//! Image endpoints take `multipart/form-data`; `/speak` also accepts
//! `application/x-www-form-urlencoded`. Both end up as [`FormFields`].

use std::{collections::HashMap, str::FromStr};

use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};

use crate::error::ApiError;

/// A file part of a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name supplied by the client
    pub file_name: Option<String>,
    /// File contents
    pub bytes: Bytes,
}

/// Text fields plus file parts of a submitted form
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormFields {
    /// Drain a multipart body
    ///
    /// Parts with a file name are kept as files, all others as text. A
    /// repeated field keeps its first value.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await?;
                form.files.entry(name).or_insert(UploadedFile {
                    file_name: Some(file_name),
                    bytes,
                });
            } else {
                let value = field.text().await?;
                form.fields.entry(name).or_insert(value);
            }
        }

        Ok(form)
    }

    /// Build from already decoded url-encoded pairs
    pub fn from_pairs(fields: HashMap<String, String>) -> Self {
        Self {
            fields,
            files: HashMap::new(),
        }
    }

    /// Text value of a field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Text value of a field, or `default` when absent
    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.text(name).unwrap_or(default)
    }

    /// Text value of a required field
    pub fn require_text(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name).ok_or_else(|| ApiError::missing_field(name))
    }

    /// Parsed value of a field, or `default` when absent
    pub fn parse_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, ApiError> {
        self.text(name).map_or(Ok(default), |raw| {
            raw.trim().parse().map_err(|_| {
                ApiError::Unprocessable(format!("Invalid value for {name}: {raw:?}"))
            })
        })
    }

    /// Boolean value of a field, or `default` when absent
    pub fn flag_or(&self, name: &str, default: bool) -> Result<bool, ApiError> {
        self.text(name).map_or(Ok(default), |raw| {
            parse_flag(raw).ok_or_else(|| {
                ApiError::Unprocessable(format!("Invalid boolean for {name}: {raw:?}"))
            })
        })
    }

    /// Take a required file part
    pub fn take_file(&mut self, name: &str) -> Result<UploadedFile, ApiError> {
        self.files
            .remove(name)
            .ok_or_else(|| ApiError::missing_field(name))
    }
}

/// Parse the boolean spellings accepted by HTML forms
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Form fields from either a multipart or a url-encoded body
#[derive(Debug)]
pub struct AnyForm(pub FormFields);

impl<S> FromRequest<S> for AnyForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::Unprocessable(e.body_text()))?;
            Ok(Self(FormFields::from_multipart(multipart).await?))
        } else {
            let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Unprocessable(e.body_text()))?;
            Ok(Self(FormFields::from_pairs(pairs)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn flags_accept_common_spellings() {
        for raw in ["true", "True", "1", "yes", "ON"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["false", "0", "no", "Off"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn parse_or_uses_default_when_absent() {
        let fields = form(&[]);
        assert_eq!(fields.parse_or("rate", 200_u32).unwrap(), 200);
    }

    #[test]
    fn parse_or_rejects_garbage() {
        let fields = form(&[("rate", "fast")]);
        let err = fields.parse_or("rate", 200_u32).unwrap_err();
        assert!(matches!(err, ApiError::Unprocessable(_)));
        assert!(err.to_string().contains("rate"));
    }

    #[test]
    fn parse_or_trims_whitespace() {
        let fields = form(&[("inpaint_radius", " 5 ")]);
        assert_eq!(fields.parse_or("inpaint_radius", 3_i32).unwrap(), 5);
    }

    #[test]
    fn require_text_reports_missing_field() {
        let fields = form(&[("engine", "gtts")]);
        assert_eq!(
            fields.require_text("text").unwrap_err().to_string(),
            "Field required: text"
        );
        assert_eq!(fields.text_or("engine", "x"), "gtts");
        assert_eq!(fields.text_or("language", "en"), "en");
    }

    #[test]
    fn take_file_reports_missing_file() {
        let mut fields = form(&[]);
        assert!(matches!(
            fields.take_file("image"),
            Err(ApiError::Unprocessable(_))
        ));
    }
}
