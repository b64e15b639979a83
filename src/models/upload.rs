use serde::{Deserialize, Serialize};

use super::{error::AppError, product::ProductType};

/// Supplier choice that switches the text uploader to a free-form name.
pub const CUSTOM_SUPPLIER: &str = "Інший";

/// A price report file read from the browser, ready for multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub fn new(product: ProductType, name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AppError> {
        let name = name.into();
        validate_report_file_name(product, Some(&name))?;
        validate_report_bytes(&bytes)?;
        Ok(Self { name, bytes })
    }
}

/// Rejects an empty file after it has been read.
pub fn validate_report_bytes(bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::ValidationError("Файл порожній".to_string()));
    }
    Ok(())
}

/// Checks a selected file before anything is read or sent.
pub fn validate_report_file_name(product: ProductType, name: Option<&str>) -> Result<(), AppError> {
    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        return Err(AppError::ValidationError(
            "Будь ласка, виберіть файл для завантаження".to_string(),
        ));
    };

    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let accepted = product.accepted_report_extensions();
    if accepted.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Будь ласка, виберіть файл у форматі {}",
            accepted
                .iter()
                .map(|ext| ext.to_uppercase())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Body of `POST /upload_{product}/ai_upload/upload_reports_text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextReport {
    pub text: String,
    pub supplier_name: String,
}

impl TextReport {
    /// Both the report text and the supplier name must be non-blank.
    pub fn new(text: &str, supplier_name: &str) -> Result<Self, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Будь ласка, введіть текст звіту".to_string(),
            ));
        }
        let supplier_name = supplier_name.trim();
        if supplier_name.is_empty() || supplier_name == CUSTOM_SUPPLIER {
            return Err(AppError::ValidationError(
                "Будь ласка, вкажіть назву постачальника".to_string(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            supplier_name: supplier_name.to_string(),
        })
    }
}

/// Whatever an upload or parser endpoint answered.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ActionAck {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ActionAck {
    /// Accepts any JSON body; a bare string is treated as the detail.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(detail) => Self {
                detail: Some(detail),
                ..Self::default()
            },
            serde_json::Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Message for the user: the backend's detail, or `fallback`.
    pub fn message(&self, fallback: &str) -> String {
        match self.detail.as_deref().map(str::trim) {
            Some(detail) if !detail.is_empty() => format!("{fallback} ({detail})"),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_rejected() {
        let err = validate_report_file_name(ProductType::Batteries, None).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(validate_report_file_name(ProductType::Batteries, Some("prices.XLSX")).is_ok());
        assert!(validate_report_file_name(ProductType::Batteries, Some("prices")).is_err());
        assert!(validate_report_file_name(ProductType::SolarPanels, Some("list.pdf")).is_ok());
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = ReportFile::new(ProductType::Batteries, "prices.xlsx", Vec::new()).unwrap_err();
        assert_eq!(err, AppError::ValidationError("Файл порожній".to_string()));

        let file = ReportFile::new(ProductType::Batteries, "prices.xlsx", b"PK".to_vec()).unwrap();
        assert_eq!(file.bytes.len(), 2);
    }

    #[test]
    fn test_text_report_requires_supplier() {
        assert!(TextReport::new("Varta 60Ah - 3899", "  ").is_err());
        assert!(TextReport::new("Varta 60Ah - 3899", CUSTOM_SUPPLIER).is_err());
        assert!(TextReport::new(" \n ", "MAKB").is_err());

        let report = TextReport::new("Varta 60Ah - 3899", " MAKB ").unwrap();
        assert_eq!(report.supplier_name, "MAKB");
    }

    #[test]
    fn test_ack_message() {
        let ack = ActionAck::from_value(json!({"detail": "Import completed"}));
        assert_eq!(ack.message("Готово"), "Готово (Import completed)");

        let ack = ActionAck::from_value(serde_json::Value::Null);
        assert_eq!(ack.message("Готово"), "Готово");
    }
}
