//! Mutable annotation state for the fragment currently under review.
//!
//! `AnnotationSet` owns the in-progress annotations plus the independent
//! "which entries are visually expanded" view state. The whole set is
//! discarded and rebuilt at every fragment advance.

use std::collections::HashSet;

use crate::types::{Annotation, SmellCategory, SuggestedAnnotation};

/// The two mutable free-text fields of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationField {
    Suggestion,
    RefactoredCode,
}

/// In-progress annotations for the current fragment, in selection order.
///
/// Invariant: at most one entry per `smell_type`. Toggling is idempotent per
/// key — selecting an already-selected entry removes it, never duplicates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    entries: Vec<Annotation>,
    expanded: HashSet<String>,
}

impl AnnotationSet {
    /// Builds the set pre-populated from machine-assist suggestions.
    ///
    /// Seeded entries start expanded so their pre-filled text is visible the
    /// moment the fragment loads.
    pub fn seeded(suggestions: &[SuggestedAnnotation]) -> Self {
        let mut set = Self::default();
        for s in suggestions {
            if set.is_selected(&s.smell_type) {
                continue;
            }
            set.entries.push(Annotation {
                smell_type: s.smell_type.clone(),
                category: s.category,
                suggestion: s.suggestion.clone(),
                refactored_code: s.refactored_code.clone().unwrap_or_default(),
            });
            set.expanded.insert(s.smell_type.clone());
        }
        set
    }

    /// Selects or deselects the taxonomy entry `key` as a single atomic
    /// operation.
    ///
    /// Deselecting removes the annotation and forces its section collapsed;
    /// selecting inserts a fresh annotation with empty text fields and forces
    /// its section expanded. Selection and expansion are coupled here by
    /// design — only [`AnnotationSet::toggle_expanded`] moves them
    /// independently.
    pub fn toggle(&mut self, key: &str, category: SmellCategory) {
        if let Some(index) = self.entries.iter().position(|a| a.smell_type == key) {
            self.entries.remove(index);
            self.expanded.remove(key);
        } else {
            self.entries.push(Annotation {
                smell_type: key.to_owned(),
                category,
                suggestion: String::new(),
                refactored_code: String::new(),
            });
            self.expanded.insert(key.to_owned());
        }
    }

    /// Updates one text field of the annotation matching `key` in place.
    ///
    /// No-op when `key` is not selected: editing requires prior selection.
    pub fn set_field(&mut self, key: &str, field: AnnotationField, value: impl Into<String>) {
        if let Some(annotation) = self.entries.iter_mut().find(|a| a.smell_type == key) {
            match field {
                AnnotationField::Suggestion => annotation.suggestion = value.into(),
                AnnotationField::RefactoredCode => annotation.refactored_code = value.into(),
            }
        }
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.entries.iter().any(|a| a.smell_type == key)
    }

    pub fn get(&self, key: &str) -> Option<&Annotation> {
        self.entries.iter().find(|a| a.smell_type == key)
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Collapses or expands a selected entry's section without touching its
    /// fields. No-op for unselected keys (they have no section to expand).
    pub fn toggle_expanded(&mut self, key: &str) {
        if !self.is_selected(key) {
            return;
        }
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_owned());
        }
    }

    /// All current entries in selection order.
    pub fn entries(&self) -> &[Annotation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries that count as meaningfully recorded for a SUBMITTED
    /// verdict: those whose suggestion text is non-empty after trimming.
    pub fn recorded(&self) -> Vec<Annotation> {
        self.entries
            .iter()
            .filter(|a| !a.suggestion.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Whether any selected entry carries text the reviewer typed and has
    /// not yet submitted. Drives the quit-confirmation guard.
    pub fn has_unsaved_text(&self) -> bool {
        self.entries
            .iter()
            .any(|a| !a.suggestion.trim().is_empty() || !a.refactored_code.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(key: &str, category: SmellCategory, text: &str) -> SuggestedAnnotation {
        SuggestedAnnotation {
            smell_type: key.to_owned(),
            category,
            suggestion: text.to_owned(),
            refactored_code: None,
        }
    }

    #[test]
    fn toggle_twice_restores_prior_state() {
        let mut set = AnnotationSet::default();
        set.toggle("Blob", SmellCategory::CodeSmell);
        set.set_field("Blob", AnnotationField::Suggestion, "split it");
        let before = set.clone();

        set.toggle("God Class", SmellCategory::AntiPattern);
        set.toggle("God Class", SmellCategory::AntiPattern);

        assert_eq!(set, before);
        assert_eq!(set.get("Blob").unwrap().suggestion, "split it");
    }

    #[test]
    fn at_most_one_entry_per_smell_type() {
        let mut set = AnnotationSet::default();
        for _ in 0..5 {
            set.toggle("Long Method", SmellCategory::CodeSmell);
        }
        // Odd number of toggles leaves it selected exactly once.
        set.toggle("Long Method", SmellCategory::CodeSmell);
        set.toggle("Long Method", SmellCategory::CodeSmell);
        set.toggle("Long Method", SmellCategory::CodeSmell);
        assert_eq!(
            set.entries().iter().filter(|a| a.smell_type == "Long Method").count(),
            1
        );
    }

    #[test]
    fn selection_couples_expansion() {
        let mut set = AnnotationSet::default();
        set.toggle("Blob", SmellCategory::CodeSmell);
        assert!(set.is_expanded("Blob"));
        set.toggle("Blob", SmellCategory::CodeSmell);
        assert!(!set.is_expanded("Blob"));
        assert!(!set.is_selected("Blob"));
    }

    #[test]
    fn expansion_toggles_independently_after_selection() {
        let mut set = AnnotationSet::default();
        set.toggle("Blob", SmellCategory::CodeSmell);
        set.set_field("Blob", AnnotationField::Suggestion, "keep me");

        set.toggle_expanded("Blob");
        assert!(!set.is_expanded("Blob"));
        assert_eq!(set.get("Blob").unwrap().suggestion, "keep me");

        set.toggle_expanded("Blob");
        assert!(set.is_expanded("Blob"));
    }

    #[test]
    fn toggle_expanded_ignores_unselected_keys() {
        let mut set = AnnotationSet::default();
        set.toggle_expanded("Blob");
        assert!(!set.is_expanded("Blob"));
    }

    #[test]
    fn set_field_requires_prior_selection() {
        let mut set = AnnotationSet::default();
        set.set_field("Blob", AnnotationField::Suggestion, "ignored");
        assert!(set.is_empty());
    }

    #[test]
    fn recorded_drops_empty_suggestions() {
        let mut set = AnnotationSet::default();
        set.toggle("Blob", SmellCategory::CodeSmell);
        set.set_field("Blob", AnnotationField::Suggestion, "x");
        set.toggle("God Class", SmellCategory::AntiPattern);
        // Second entry selected but its suggestion stays empty.

        let recorded = set.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].smell_type, "Blob");

        // Whitespace-only text does not count either.
        set.set_field("God Class", AnnotationField::Suggestion, "   ");
        assert_eq!(set.recorded().len(), 1);
    }

    #[test]
    fn seeding_preserves_order_and_expands() {
        let set = AnnotationSet::seeded(&[
            suggestion("God Class", SmellCategory::AntiPattern, "too big"),
            suggestion("Blob", SmellCategory::CodeSmell, ""),
        ]);
        let keys: Vec<&str> = set.entries().iter().map(|a| a.smell_type.as_str()).collect();
        assert_eq!(keys, vec!["God Class", "Blob"]);
        assert!(set.is_expanded("God Class") && set.is_expanded("Blob"));
        assert_eq!(set.get("God Class").unwrap().suggestion, "too big");
    }

    #[test]
    fn seeding_ignores_duplicate_keys() {
        let set = AnnotationSet::seeded(&[
            suggestion("Blob", SmellCategory::CodeSmell, "first"),
            suggestion("Blob", SmellCategory::CodeSmell, "second"),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Blob").unwrap().suggestion, "first");
    }
}
