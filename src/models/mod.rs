use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

use crate::utils::format::format_phone;
use crate::utils::validation::detect_mime_type;

/// An image picked by the user, held in memory for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    /// Builds a file from its payload. When `declared_type` is missing or empty the
    /// type is detected from the content, then from the name.
    pub fn new(name: impl Into<String>, declared_type: Option<&str>, data: Bytes) -> Self {
        let name = name.into();
        let mime_type = match declared_type.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t.to_lowercase(),
            None => detect_mime_type(&data, &name),
        };

        Self {
            size: data.len() as u64,
            name,
            mime_type,
            data,
        }
    }

    pub fn is_image(&self) -> bool {
        crate::utils::validation::is_image_mime(&self.mime_type)
    }
}

/// Who the handoff is for. Only built from a validated [`CustomerForm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: Option<String>,
}

/// Raw identification form input, as typed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CustomerForm {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub phone: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Por favor, preencha o nome completo".into());
        return Err(err);
    }
    Ok(())
}

impl CustomerForm {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Trims the name and masks the phone; a phone without digits becomes `None`.
    pub fn into_customer(self) -> CustomerInfo {
        let phone = format_phone(&self.phone);
        CustomerInfo {
            name: self.name.trim().to_string(),
            phone: (!phone.is_empty()).then_some(phone),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    FilesSelected,
    AwaitingCustomerInfo,
    HandoffInProgress,
    HandoffComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
            NotificationKind::Info => "ℹ️",
            NotificationKind::Warning => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}

/// Shown once the cosmetic organization sequence finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationSummary {
    pub folder_name: String,
    pub file_count: usize,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for OrganizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✅ Imagens Organizadas!")?;
        writeln!(f, "📁 Pasta Criada: {}", self.folder_name)?;
        writeln!(f, "Arquivos ({}):", self.file_count)?;
        for name in &self.files {
            writeln!(f, "• {}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_file_detects_type_from_content() {
        let png = Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0]);
        let file = SelectedFile::new("no_extension", None, png);
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.size, 10);
        assert!(file.is_image());
    }

    #[test]
    fn test_selected_file_prefers_declared_type() {
        let file = SelectedFile::new("notes.txt", Some("Image/JPEG"), Bytes::from_static(b"abc"));
        assert_eq!(file.mime_type, "image/jpeg");
        assert!(file.is_image());

        let file = SelectedFile::new("notes.txt", Some(""), Bytes::from_static(b"plain text"));
        assert_eq!(file.mime_type, "text/plain");
        assert!(!file.is_image());
    }

    #[test]
    fn test_customer_form_validation() {
        assert!(CustomerForm::new("Maria", "").validate().is_ok());
        assert!(CustomerForm::new("", "").validate().is_err());
        assert!(CustomerForm::new("   ", "(61) 99999-9999").validate().is_err());
    }

    #[test]
    fn test_customer_form_trims_fields() {
        let customer = CustomerForm::new("  João Silva ", "   ").into_customer();
        assert_eq!(customer.name, "João Silva");
        assert_eq!(customer.phone, None);

        let customer = CustomerForm::new("Ana", " (61) 99999-9999 ").into_customer();
        assert_eq!(customer.phone.as_deref(), Some("(61) 99999-9999"));
    }

    #[test]
    fn test_customer_form_masks_raw_phone() {
        let customer = CustomerForm::new("Ana", "61999999999").into_customer();
        assert_eq!(customer.phone.as_deref(), Some("(61) 99999-9999"));

        let customer = CustomerForm::new("Ana", "6133334444").into_customer();
        assert_eq!(customer.phone.as_deref(), Some("(61) 3333-4444"));

        let customer = CustomerForm::new("Ana", "sem telefone").into_customer();
        assert_eq!(customer.phone, None);
    }

    #[test]
    fn test_summary_display_lists_files() {
        let summary = OrganizationSummary {
            folder_name: "ANA".to_string(),
            file_count: 2,
            files: vec!["a.jpg".to_string(), "b.png".to_string()],
            created_at: Utc::now(),
        };
        let text = summary.to_string();
        assert!(text.contains("📁 Pasta Criada: ANA"));
        assert!(text.contains("Arquivos (2):"));
        assert!(text.contains("• a.jpg\n• b.png"));
    }
}
