//! HTTP implementation of the fragment source and verdict sink.
//!
//! The wire protocol uses camelCase field names and a few shapes that differ
//! from the internal model; all translation happens here, at the boundary:
//!
//! - a bare language string is coerced into a one-element tag list,
//! - the free-text category label is decoded into [`SmellCategory`]
//!   (lossy: anything not explicitly an anti-pattern becomes a code smell),
//! - a missing fragment id serializes as `0` in the verdict.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BackendError;
use crate::session::{FragmentSource, VerdictSink};
use crate::types::{Fragment, SmellCategory, SuggestedAnnotation, Verdict};

/// Review backend reachable over HTTP.
///
/// Cheap to clone: the underlying `reqwest::Client` is an `Arc` around its
/// connection pool, so one backend value can serve as both the fragment
/// source and the verdict sink of a session.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` (trailing slashes stripped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http: Client::new(), base_url }
    }

    async fn fetch_next(&self, after: Option<i64>) -> Result<Fragment, BackendError> {
        let url = match after {
            Some(id) => format!("{}/snippets/next/{id}", self.base_url),
            None => format!("{}/snippets/next", self.base_url),
        };
        debug!(%url, "fetching next fragment");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(BackendError::NoFragment);
        }
        let dto: FragmentDto = response.json().await?;
        Ok(dto.into())
    }

    async fn post_verdict(&self, verdict: &Verdict) -> Result<(), BackendError> {
        let response = self
            .http
            .post(format!("{}/annotations", self.base_url))
            .json(&VerdictDto::from(verdict))
            .send()
            .await?
            .error_for_status()?;
        // Any 2xx acknowledgement counts as recorded; the body is free text.
        let _ = response.text().await?;
        Ok(())
    }
}

#[async_trait]
impl FragmentSource for HttpBackend {
    async fn next_fragment(&self, after: Option<i64>) -> Result<Fragment> {
        Ok(self.fetch_next(after).await?)
    }
}

#[async_trait]
impl VerdictSink for HttpBackend {
    async fn record(&self, verdict: &Verdict) -> Result<()> {
        Ok(self.post_verdict(verdict).await?)
    }
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Fragment record as the source serves it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FragmentDto {
    #[serde(default)]
    id: Option<i64>,
    code: String,
    start_line: u32,
    end_line: u32,
    languages: OneOrMany,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    ai_comment: Option<String>,
    #[serde(default)]
    ai_suggestions: Option<Vec<SuggestionDto>>,
}

/// The source returns either one bare language tag or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<String>),
    One(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionDto {
    smell_type: String,
    /// Free-text category label; decoded via [`SmellCategory::from_label`].
    #[serde(default)]
    category: String,
    #[serde(default)]
    suggestion: String,
    #[serde(default)]
    refactored_code: Option<String>,
}

impl From<FragmentDto> for Fragment {
    fn from(dto: FragmentDto) -> Self {
        Fragment {
            id: dto.id,
            code: dto.code,
            languages: match dto.languages {
                OneOrMany::Many(tags) => tags,
                OneOrMany::One(tag) => vec![tag],
            },
            start_line: dto.start_line,
            end_line: dto.end_line,
            kind: dto.kind,
            assist_comment: dto.ai_comment.filter(|c| !c.is_empty()),
            suggestions: dto
                .ai_suggestions
                .unwrap_or_default()
                .into_iter()
                .map(|s| SuggestedAnnotation {
                    smell_type: s.smell_type,
                    category: SmellCategory::from_label(&s.category),
                    suggestion: s.suggestion,
                    refactored_code: s.refactored_code,
                })
                .collect(),
        }
    }
}

/// Verdict record as the sink expects it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerdictDto<'a> {
    annotator: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    languages: &'a [String],
    start_line: u32,
    end_line: u32,
    code: &'a str,
    status: &'static str,
    /// `0` stands in for a fragment that was never persisted upstream.
    code_snippet_id: i64,
    annotations: Vec<SmellAnnotationDto<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SmellAnnotationDto<'a> {
    smell_type: &'a str,
    category: &'static str,
    suggestion: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    refactored_code: Option<&'a str>,
}

impl<'a> From<&'a Verdict> for VerdictDto<'a> {
    fn from(verdict: &'a Verdict) -> Self {
        VerdictDto {
            annotator: &verdict.reviewer,
            kind: &verdict.kind,
            languages: &verdict.languages,
            start_line: verdict.start_line,
            end_line: verdict.end_line,
            code: &verdict.code,
            status: verdict.status.as_str(),
            code_snippet_id: verdict.fragment_id.unwrap_or(0),
            annotations: verdict
                .annotations
                .iter()
                .map(|a| SmellAnnotationDto {
                    smell_type: &a.smell_type,
                    category: a.category.as_str(),
                    suggestion: &a.suggestion,
                    refactored_code: if a.refactored_code.is_empty() {
                        None
                    } else {
                        Some(&a.refactored_code)
                    },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Annotation, VerdictStatus};

    #[test]
    fn fragment_dto_coerces_bare_language_and_decodes_labels() {
        let json = serde_json::json!({
            "id": 7,
            "code": "const x = 1;",
            "startLine": 10,
            "endLine": 12,
            "languages": "TypeScript",
            "type": "method",
            "aiComment": "looks dense",
            "aiSuggestions": [
                { "smellType": "God Class", "category": "Anti-pattern", "suggestion": "split" },
                { "smellType": "Blob", "suggestion": "" }
            ]
        });
        let dto: FragmentDto = serde_json::from_value(json).unwrap();
        let fragment = Fragment::from(dto);

        assert_eq!(fragment.id, Some(7));
        assert_eq!(fragment.languages, vec!["TypeScript"]);
        assert_eq!(fragment.assist_comment.as_deref(), Some("looks dense"));
        assert_eq!(fragment.suggestions.len(), 2);
        assert_eq!(fragment.suggestions[0].category, SmellCategory::AntiPattern);
        assert_eq!(fragment.suggestions[1].category, SmellCategory::CodeSmell);
    }

    #[test]
    fn fragment_dto_accepts_language_list_and_missing_assist() {
        let json = serde_json::json!({
            "code": "x",
            "startLine": 1,
            "endLine": 1,
            "languages": ["JavaScript", "TypeScript"],
            "type": "block"
        });
        let fragment = Fragment::from(serde_json::from_value::<FragmentDto>(json).unwrap());
        assert_eq!(fragment.id, None);
        assert_eq!(fragment.languages.len(), 2);
        assert!(fragment.assist_comment.is_none());
        assert!(fragment.suggestions.is_empty());
    }

    #[test]
    fn verdict_dto_uses_wire_names_and_zero_for_missing_id() {
        let verdict = Verdict {
            reviewer: "dana".into(),
            kind: "method".into(),
            languages: vec!["JavaScript".into()],
            start_line: 3,
            end_line: 9,
            code: "let a = 1;".into(),
            status: VerdictStatus::Submitted,
            fragment_id: None,
            annotations: vec![Annotation {
                smell_type: "Blob".into(),
                category: SmellCategory::CodeSmell,
                suggestion: "split it".into(),
                refactored_code: String::new(),
            }],
        };
        let value = serde_json::to_value(VerdictDto::from(&verdict)).unwrap();

        assert_eq!(value["annotator"], "dana");
        assert_eq!(value["type"], "method");
        assert_eq!(value["startLine"], 3);
        assert_eq!(value["codeSnippetId"], 0);
        assert_eq!(value["status"], "SUBMITTED");
        assert_eq!(value["annotations"][0]["smellType"], "Blob");
        assert_eq!(value["annotations"][0]["category"], "code-smell");
        // Empty refactored code is omitted from the wire entirely.
        assert!(value["annotations"][0].get("refactoredCode").is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let backend = HttpBackend::new("http://localhost:5500/");
        assert_eq!(backend.base_url, "http://localhost:5500");
    }
}
