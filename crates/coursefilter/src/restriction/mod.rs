//! Eligibility checks against the free-text restriction annotations mined
//! from the catalog (`分發條件內容`).
//!
//! Annotations are unstructured, so each clause is matched by a marker
//! followed by a list that runs up to the next full-width period. A course
//! only excludes someone when a clause explicitly names who may enrol; if no
//! clause can be found the course is treated as open.

use regex::Regex;
use std::sync::LazyLock;

static DEPARTMENT_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"系所:限([^。]+)").unwrap());
static GRADE_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"年級:限([^。]+)").unwrap());

/// A kind of eligibility clause found in restriction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionClause {
    /// `系所:限...。` - allowed departments
    Department,
    /// `年級:限...。` - allowed year levels
    Grade,
}

impl RestrictionClause {
    /// The substring that introduces this clause.
    pub const fn marker(self) -> &'static str {
        match self {
            RestrictionClause::Department => "系所:限",
            RestrictionClause::Grade => "年級:限",
        }
    }

    fn list_regex(self) -> &'static Regex {
        match self {
            RestrictionClause::Department => &DEPARTMENT_LIST_REGEX,
            RestrictionClause::Grade => &GRADE_LIST_REGEX,
        }
    }

    /// Returns true if the clause marker appears anywhere in `text`.
    pub fn is_present(self, text: &str) -> bool {
        text.contains(self.marker())
    }

    /// Extracts every list following the marker, in order of appearance.
    ///
    /// A marker directly followed by `。` or the end of text yields no list.
    pub fn extract_lists(self, text: &str) -> Vec<&str> {
        self.list_regex()
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}

fn any_list_contains(lists: &[&str], needle: &str) -> bool {
    lists.iter().any(|list| list.contains(needle))
}

/// Maps a numeric grade (1-4 undergraduate, 5-6 graduate) to the label used
/// in restriction text.
pub fn grade_label(grade: i64) -> Option<&'static str> {
    match grade {
        1 => Some("一"),
        2 => Some("二"),
        3 => Some("三"),
        4 => Some("四"),
        5 => Some("碩一"),
        6 => Some("碩二"),
        _ => None,
    }
}

/// Checks whether `user_department` may take a course with the given
/// restrictions.
///
/// Matching is case-insensitive and by substring, so `資工` matches a list
/// containing `資工系`. Empty inputs are always eligible.
pub fn check_department(restrictions: &str, user_department: &str) -> bool {
    if user_department.is_empty() || restrictions.is_empty() {
        return true;
    }

    let text = restrictions.to_lowercase();
    let department = user_department.to_lowercase();
    let clause = RestrictionClause::Department;

    if clause.is_present(&text) {
        let lists = clause.extract_lists(&text);
        if !lists.is_empty() {
            return any_list_contains(&lists, &department);
        }
    }

    true
}

/// Checks whether a student in `user_grade` may take a course with the given
/// restrictions.
///
/// An exact `年級:限{label}年級` phrase is accepted before falling back to
/// scanning every extracted list for the grade label. Grades outside 1..=6
/// have no label and are always eligible.
pub fn check_grade(restrictions: &str, user_grade: i64) -> bool {
    if restrictions.is_empty() {
        return true;
    }

    let clause = RestrictionClause::Grade;
    if !clause.is_present(restrictions) {
        return true;
    }

    let label = grade_label(user_grade);
    let exact = format!("{}{}年級", clause.marker(), label.unwrap_or_default());
    if restrictions.contains(&exact) {
        return true;
    }

    let lists = clause.extract_lists(restrictions);
    match label {
        Some(label) if !lists.is_empty() => any_list_contains(&lists, label),
        _ => true,
    }
}
