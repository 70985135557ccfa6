//! Core data model for smellrev.
//!
//! All types here are fully owned (no borrowed lifetimes) so they can be
//! cloned into snapshots and sent between the session worker and the UI
//! thread without arena allocation.

/// The two-valued classification axis of the taxonomy.
///
/// The wire protocol carries the category as a free-text label; decoding
/// happens once at the backend boundary via [`SmellCategory::from_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmellCategory {
    /// Structural hint that the code could be improved (e.g. Long Method).
    CodeSmell,
    /// A recognized harmful design pattern (e.g. God Class).
    AntiPattern,
}

impl SmellCategory {
    /// Decodes a free-text category label into the two-valued category.
    ///
    /// Only an explicit anti-pattern label (`"Anti-pattern"` as written by
    /// the upstream assist pass, or the internal `"anti-pattern"` spelling)
    /// decodes to `AntiPattern`; every other label, including an empty or
    /// missing one, decodes to `CodeSmell`. This is a lossy translation:
    /// unrecognized labels are not preserved.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Anti-pattern" | "anti-pattern" => SmellCategory::AntiPattern,
            _ => SmellCategory::CodeSmell,
        }
    }

    /// The stable wire/display spelling of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            SmellCategory::CodeSmell => "code-smell",
            SmellCategory::AntiPattern => "anti-pattern",
        }
    }
}

/// One machine-generated annotation hint bundled with a fragment.
///
/// The category label has already been decoded at the source boundary, so
/// consumers never see the raw wire label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedAnnotation {
    pub smell_type: String,
    pub category: SmellCategory,
    pub suggestion: String,
    pub refactored_code: Option<String>,
}

/// The unit under review: one code excerpt with its source metadata.
///
/// A fragment is replaced wholesale on every successful advance; it is never
/// merged with its predecessor. `id` is `None` for synthetic fragments that
/// were never persisted upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub id: Option<i64>,
    /// Raw source text, rendered through the lexer for display.
    pub code: String,
    /// Ordered language tags; the source guarantees at least one.
    pub languages: Vec<String>,
    /// First line number of the excerpt in its original file.
    pub start_line: u32,
    /// Last line number of the excerpt in its original file.
    pub end_line: u32,
    /// Corpus-defined fragment category; opaque to the session engine.
    pub kind: String,
    /// Free-text commentary from the upstream assist pass, if any.
    pub assist_comment: Option<String>,
    /// Machine-suggested annotations used to seed the selection model.
    pub suggestions: Vec<SuggestedAnnotation>,
}

/// One in-progress application of a taxonomy entry to the current fragment.
///
/// At most one annotation per `smell_type` exists at a time; the selection
/// model enforces this. `refactored_code` is optional free text — the empty
/// string means "not provided".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub smell_type: String,
    pub category: SmellCategory,
    pub suggestion: String,
    pub refactored_code: String,
}

/// Outcome classification of a submitted review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictStatus {
    /// Accept with annotations; requires reviewer identity and at least one
    /// selected annotation.
    Submitted,
    /// Pass over the fragment without judging it.
    Skipped,
    /// The fragment is not reviewable (garbage, truncated, wrong corpus).
    Rejected,
    /// Reviewed and found free of smells.
    Clean,
}

impl VerdictStatus {
    /// Wire spelling of the status, as the sink expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictStatus::Submitted => "SUBMITTED",
            VerdictStatus::Skipped => "SKIPPED",
            VerdictStatus::Rejected => "REJECTED",
            VerdictStatus::Clean => "CLEAN",
        }
    }
}

/// The finalized outcome of reviewing one fragment.
///
/// Constructed synchronously at submission time from session state, sent to
/// the verdict sink, and not retained afterward. Fragment fields are
/// snapshotted so a concurrent advance can never corrupt a verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub reviewer: String,
    pub kind: String,
    pub languages: Vec<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub code: String,
    pub status: VerdictStatus,
    pub fragment_id: Option<i64>,
    /// For `Submitted`: the selected annotations whose suggestion text is
    /// non-empty. Empty for every other status.
    pub annotations: Vec<Annotation>,
}

/// Severity of a transient user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A transient notification for the reviewer.
///
/// The notification surface has no state contract: show the text, dismiss
/// it after a short delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_translation_is_lossy_toward_code_smell() {
        assert_eq!(SmellCategory::from_label("Anti-pattern"), SmellCategory::AntiPattern);
        assert_eq!(SmellCategory::from_label("anti-pattern"), SmellCategory::AntiPattern);
        assert_eq!(SmellCategory::from_label("Code smell"), SmellCategory::CodeSmell);
        assert_eq!(SmellCategory::from_label(""), SmellCategory::CodeSmell);
        assert_eq!(SmellCategory::from_label("ANTI-PATTERN"), SmellCategory::CodeSmell);
    }

    #[test]
    fn status_wire_spelling() {
        assert_eq!(VerdictStatus::Submitted.as_str(), "SUBMITTED");
        assert_eq!(VerdictStatus::Clean.as_str(), "CLEAN");
    }
}
