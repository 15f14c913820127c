use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Academic year category. The four labels below are the only values that
/// exist; anything else is rejected at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
    #[serde(rename = "3rd Year")]
    Third,
    #[serde(rename = "4th Year")]
    Fourth,
}

impl Year {
    /// All categories, in display order.
    pub const ALL: [Year; 4] = [Year::First, Year::Second, Year::Third, Year::Fourth];

    pub fn label(&self) -> &'static str {
        match self {
            Year::First => "1st Year",
            Year::Second => "2nd Year",
            Year::Third => "3rd Year",
            Year::Fourth => "4th Year",
        }
    }

    /// Storage prefix for this category's blobs (`"2nd Year/"`).
    pub fn prefix(&self) -> String {
        format!("{}/", self.label())
    }

    pub fn parse(s: &str) -> Option<Year> {
        Year::ALL.into_iter().find(|y| y.label() == s)
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// MIME types accepted for upload alongside the `.ppt`/`.pptx` extensions.
pub const POWERPOINT_MIME_TYPES: [&str; 2] = [
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

/// Whether an uploaded file passes the presentation allow-list: a recognized
/// PowerPoint MIME type, or a `.ppt`/`.pptx` extension (case-insensitive).
pub fn is_allowed_upload(file_name: &str, mime_type: Option<&str>) -> bool {
    if let Some(mime) = mime_type {
        if POWERPOINT_MIME_TYPES.contains(&mime) {
            return true;
        }
    }
    let lower = file_name.to_lowercase();
    lower.ends_with(".ppt") || lower.ends_with(".pptx")
}

/// Derive the stored file name: `{roll_number}_{sanitized title}.{extension}`,
/// where every non-alphanumeric character of the title becomes `_`.
pub fn derive_file_name(roll_number: &str, title: &str, extension: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{roll_number}_{sanitized}.{extension}")
}

/// Derive the blob path for a presentation: `{year label}/{file_name}`.
pub fn derive_file_path(year: Year, file_name: &str) -> String {
    format!("{}/{file_name}", year.label())
}

/// A presentation record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationRecord {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub title: String,
    pub year: Year,
    /// Public URL the service serves the blob at.
    pub file_url: String,
    pub file_name: String,
    /// Blob path in the object store (`{year}/{file_name}`).
    pub file_path: String,
    pub mime_type: String,
    pub byte_size: u64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_labels_round_trip() {
        for year in Year::ALL {
            assert_eq!(Year::parse(year.label()), Some(year));
        }
        assert_eq!(Year::parse("5th Year"), None);
        assert_eq!(Year::parse("1st year"), None);
        assert_eq!(Year::parse(""), None);
    }

    #[test]
    fn year_serializes_as_label() {
        let json = serde_json::to_string(&Year::Second).unwrap();
        assert_eq!(json, "\"2nd Year\"");
        let parsed: Year = serde_json::from_str("\"4th Year\"").unwrap();
        assert_eq!(parsed, Year::Fourth);
        assert!(serde_json::from_str::<Year>("\"Fifth Year\"").is_err());
    }

    #[test]
    fn file_name_sanitizes_title() {
        assert_eq!(
            derive_file_name("R1", "My Talk!", "pptx"),
            "R1_My_Talk_.pptx"
        );
        assert_eq!(
            derive_file_name("21A91A0501", "Rust & WebAssembly", "ppt"),
            "21A91A0501_Rust___WebAssembly.ppt"
        );
        assert_eq!(derive_file_name("R2", "plain", "pptx"), "R2_plain.pptx");
    }

    #[test]
    fn file_path_is_year_prefixed() {
        let file_name = derive_file_name("R1", "My Talk!", "pptx");
        assert_eq!(
            derive_file_path(Year::Second, &file_name),
            "2nd Year/R1_My_Talk_.pptx"
        );
    }

    #[test]
    fn upload_allow_list() {
        assert!(is_allowed_upload("deck.pptx", None));
        assert!(is_allowed_upload("deck.PPT", None));
        assert!(is_allowed_upload(
            "deck.bin",
            Some("application/vnd.ms-powerpoint")
        ));
        assert!(!is_allowed_upload("deck.pdf", Some("application/pdf")));
        assert!(!is_allowed_upload("deck", None));
    }
}
