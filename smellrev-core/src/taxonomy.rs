//! The fixed review taxonomy and its reference-guide content.
//!
//! Process-wide, immutable, identical across sessions. Not fetched from the
//! backend — the enumerations and the illustrative before/after material are
//! embedded here as static data.

use crate::types::SmellCategory;

/// One fixed classification the reviewer may apply, with the reference-guide
/// material shown in the guide panel.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyEntry {
    /// Stable key; unique across both category tables. Annotations are keyed
    /// by this value.
    pub key: &'static str,
    /// Human label shown in the annotation panel and guide.
    pub label: &'static str,
    pub category: SmellCategory,
    pub definition: &'static str,
    pub symptoms: &'static str,
    pub refactoring_tip: &'static str,
    /// Illustrative excerpt exhibiting the problem.
    pub before: &'static str,
    /// The same excerpt after the suggested refactoring.
    pub after: &'static str,
}

/// The code-smell half of the taxonomy.
pub const CODE_SMELLS: &[TaxonomyEntry] = &[
    TaxonomyEntry {
        key: "Feature Envy",
        label: "Feature Envy",
        category: SmellCategory::CodeSmell,
        definition: "A function or method that accesses another object's properties or \
                     methods more than its own.",
        symptoms: "Frequent access to external object properties, especially deep chaining.",
        refactoring_tip: "Move logic to the object being accessed or extract into a helper.",
        before: "function calculateTotal(order) {\n  return order.customer.discount *\n         order.customer.points *\n         order.amount;\n}",
        after: "function getTotal() {\n  return this.discount * this.points * this.orderAmount;\n}",
    },
    TaxonomyEntry {
        key: "Long Method",
        label: "Long Method",
        category: SmellCategory::CodeSmell,
        definition: "A function that tries to handle too many tasks, reducing readability \
                     and maintainability.",
        symptoms: "Dozens of lines, multiple responsibilities, deeply nested logic.",
        refactoring_tip: "Split into smaller, single-purpose functions.",
        before: "useEffect(() => {\n  if (!user) return;\n  if (user.role === 'Admin') {\n    // navigate to admin\n  } else {\n    // check role, validate data, handle errors...\n    // 40+ lines\n  }\n}, [user]);",
        after: "useEffect(() => {\n  if (!user) return;\n  handleUserRedirect(user);\n}, [user]);",
    },
    TaxonomyEntry {
        key: "Blob",
        label: "Blob",
        category: SmellCategory::CodeSmell,
        definition: "A module or class with too many unrelated responsibilities and data.",
        symptoms: "Centralized object managing state, API, rendering, and logic.",
        refactoring_tip: "Split into smaller modules/components based on responsibility.",
        before: "class UserService {\n  constructor() { this.user = {}; }\n  fetchUser() {...}\n  validateForm() {...}\n  renderUserProfile() {...}\n  updateTheme() {...}\n}",
        after: "class UserAPI { fetchUser() {...} }\nclass UserValidator { validateForm() {...} }\nclass UserUI { renderUserProfile() {...} }",
    },
    TaxonomyEntry {
        key: "Data Class",
        label: "Data Class",
        category: SmellCategory::CodeSmell,
        definition: "A class or interface that only holds data with no behavior or logic.",
        symptoms: "Only fields and simple getters/setters; logic is handled externally.",
        refactoring_tip: "Encapsulate behavior inside the class or simplify to a plain object.",
        before: "interface User {\n  name: string;\n  age: number;\n}",
        after: "class User {\n  constructor(public name, public age) {}\n  isAdult() {\n    return this.age >= 18;\n  }\n}",
    },
];

/// The anti-pattern half of the taxonomy.
pub const ANTI_PATTERNS: &[TaxonomyEntry] = &[
    TaxonomyEntry {
        key: "God Class",
        label: "God Class",
        category: SmellCategory::AntiPattern,
        definition: "A component or service that handles multiple unrelated concerns.",
        symptoms: "Huge files, many hooks or functions; does fetching, rendering, and \
                   business logic.",
        refactoring_tip: "Split into smaller, focused components or services.",
        before: "function Dashboard() {\n  useAuth();\n  fetchData();\n  renderChart();\n  handleExport();\n  sendEmailReport();\n  // hundreds of lines\n}",
        after: "function Dashboard() {\n  useAuth();\n  return (\n    <>\n      <Chart />\n      <ExportButton />\n      <EmailReport />\n    </>\n  );\n}",
    },
    TaxonomyEntry {
        key: "Spaghetti Code",
        label: "Spaghetti Code",
        category: SmellCategory::AntiPattern,
        definition: "Code with messy, deeply nested or interdependent logic.",
        symptoms: "Nested conditionals, poor separation of concerns, hard-to-follow flow.",
        refactoring_tip: "Use early returns, modularize logic, and flatten structure.",
        before: "if (user) {\n  if (user.loggedIn) {\n    if (user.role === 'Admin') {\n      if (route === '/dashboard') {\n        // do something\n      }\n    }\n  }\n}",
        after: "if (!user?.loggedIn) return;\nif (user.role !== 'Admin') return;\nif (route !== '/dashboard') return;\n// clean logic",
    },
    TaxonomyEntry {
        key: "Swiss Army Knife",
        label: "Swiss Army Knife",
        category: SmellCategory::AntiPattern,
        definition: "A module or utility that tries to do too many unrelated things.",
        symptoms: "Many unrelated methods in one file or class.",
        refactoring_tip: "Split into single-purpose modules.",
        before: "export const Utils = {\n  formatDate() {},\n  validateEmail() {},\n  encryptData() {},\n  generateUUID() {},\n  renderChart() {}\n}",
        after: "export const EmailUtils = { validateEmail() {} };\nexport const CryptoUtils = { encryptData() {} };\nexport const DateUtils = { formatDate() {} };",
    },
    TaxonomyEntry {
        key: "Magic Numbers",
        label: "Magic Numbers/Strings",
        category: SmellCategory::AntiPattern,
        definition: "Hardcoded values in code with no explanation or naming.",
        symptoms: "Direct string/number comparisons instead of constants or enums.",
        refactoring_tip: "Use named constants or enums.",
        before: "if (user.role === 'Admin' && score > 70) {\n  grantAccess();\n}",
        after: "const ADMIN_ROLE = 'Admin';\nconst MIN_SCORE = 70;\n\nif (user.role === ADMIN_ROLE && score > MIN_SCORE) {\n  grantAccess();\n}",
    },
];

/// Iterates the whole taxonomy, code smells first, in display order.
pub fn all() -> impl Iterator<Item = &'static TaxonomyEntry> {
    CODE_SMELLS.iter().chain(ANTI_PATTERNS.iter())
}

/// Looks up an entry by its stable key.
pub fn find(key: &str) -> Option<&'static TaxonomyEntry> {
    all().find(|e| e.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_across_both_tables() {
        let mut seen = HashSet::new();
        for entry in all() {
            assert!(seen.insert(entry.key), "duplicate taxonomy key {}", entry.key);
        }
    }

    #[test]
    fn categories_match_their_table() {
        assert!(CODE_SMELLS.iter().all(|e| e.category == SmellCategory::CodeSmell));
        assert!(ANTI_PATTERNS.iter().all(|e| e.category == SmellCategory::AntiPattern));
        assert!(!CODE_SMELLS.is_empty() && !ANTI_PATTERNS.is_empty());
    }

    #[test]
    fn find_resolves_keys_from_both_tables() {
        assert_eq!(find("Blob").unwrap().label, "Blob");
        assert_eq!(find("God Class").unwrap().category, SmellCategory::AntiPattern);
        assert!(find("Nonexistent").is_none());
    }
}
