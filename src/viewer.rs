//! Viewer resolution: choosing an external URL capable of rendering a stored
//! file inline. PowerPoint decks get the Office embed viewer; other document
//! formats fall back to the generic Google Docs viewer; everything else is
//! download-only.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

const OFFICE_EMBED_BASE: &str = "https://view.officeapps.live.com/op/embed.aspx?src=";
const GENERIC_VIEWER_BASE: &str = "https://docs.google.com/viewer?url=";

/// Extensions the generic document viewer can render.
pub const PREVIEWABLE_EXTENSIONS: [&str; 7] =
    ["pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx"];

/// Matches JavaScript's encodeURIComponent: everything except alphanumerics
/// and `- _ . ~ ! * ' ( )` is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Lowercased extension after the last `.`, or `None` for dotless names.
pub fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Percent-encode a string the way `encodeURIComponent` would.
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Office Online embed URL for a publicly reachable file.
pub fn office_embed_url(file_url: &str) -> String {
    format!("{OFFICE_EMBED_BASE}{}", encode_uri_component(file_url))
}

/// Generic document viewer URL wrapping the raw file URL.
pub fn generic_viewer_url(file_url: &str) -> String {
    format!(
        "{GENERIC_VIEWER_BASE}{}&embedded=true",
        encode_uri_component(file_url)
    )
}

/// Which external viewer engine a resolution picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerKind {
    Office,
    Generic,
}

/// Outcome of resolving a viewer for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An embeddable preview URL exists.
    Embed { kind: ViewerKind, embed_url: String },
    /// No viewer renders this format; offer a direct download instead.
    Unsupported,
}

/// Pick a viewer for a file by extension.
pub fn resolve(file_url: &str, file_name: &str) -> Resolution {
    let ext = match extension(file_name) {
        Some(ext) => ext,
        None => return Resolution::Unsupported,
    };

    if ext == "ppt" || ext == "pptx" {
        return Resolution::Embed {
            kind: ViewerKind::Office,
            embed_url: office_embed_url(file_url),
        };
    }

    if PREVIEWABLE_EXTENSIONS.contains(&ext.as_str()) {
        return Resolution::Embed {
            kind: ViewerKind::Generic,
            embed_url: generic_viewer_url(file_url),
        };
    }

    Resolution::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://decks.example.edu/files/2nd%20Year/R1_My_Talk_.pptx";

    #[test]
    fn powerpoint_resolves_to_office_viewer() {
        for name in ["deck.pptx", "deck.ppt", "DECK.PPTX", "a.b.PpT"] {
            match resolve(URL, name) {
                Resolution::Embed { kind, embed_url } => {
                    assert_eq!(kind, ViewerKind::Office);
                    assert!(embed_url.starts_with(OFFICE_EMBED_BASE));
                    assert!(embed_url.contains("https%3A%2F%2Fdecks.example.edu"));
                }
                other => panic!("expected office embed for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn documents_resolve_to_generic_viewer() {
        for name in ["notes.pdf", "report.docx", "sheet.XLSX"] {
            match resolve(URL, name) {
                Resolution::Embed { kind, embed_url } => {
                    assert_eq!(kind, ViewerKind::Generic);
                    assert!(embed_url.starts_with(GENERIC_VIEWER_BASE));
                    assert!(embed_url.ends_with("&embedded=true"));
                }
                other => panic!("expected generic embed for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_formats_are_unsupported() {
        assert_eq!(resolve(URL, "archive.zip"), Resolution::Unsupported);
        assert_eq!(resolve(URL, "noextension"), Resolution::Unsupported);
        assert_eq!(resolve(URL, "video.mp4"), Resolution::Unsupported);
    }

    #[test]
    fn encoding_matches_encode_uri_component() {
        // Unreserved marks survive; everything else is escaped.
        assert_eq!(
            encode_uri_component("https://h/a b?x=1&y=~'()!*"),
            "https%3A%2F%2Fh%2Fa%20b%3Fx%3D1%26y%3D~'()!*"
        );
    }

    #[test]
    fn extension_is_lowercased_tail() {
        assert_eq!(extension("deck.PPTX"), Some("pptx".to_string()));
        assert_eq!(extension("a.b.c.Ppt"), Some("ppt".to_string()));
        assert_eq!(extension("none"), None);
    }
}
