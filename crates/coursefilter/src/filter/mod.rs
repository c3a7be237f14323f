//! Single-pass catalog filtering by schedule conflicts and eligibility.

use serde::Serialize;

use crate::catalog::CourseRecord;
use crate::restriction::{check_department, check_grade};
use crate::schedule::{has_time_conflict, BusySlots};

/// Grade assumed when a request doesn't state one.
pub const DEFAULT_GRADE: i64 = 1;

/// Who is looking for courses and when they are unavailable.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// Department name; empty means "don't filter by department"
    pub department: String,
    /// 1-4 undergraduate years, 5-6 graduate years; `None` has no grade
    /// label and passes every grade restriction
    pub grade: Option<i64>,
    pub busy_times: BusySlots,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            department: String::new(),
            grade: Some(DEFAULT_GRADE),
            busy_times: BusySlots::default(),
        }
    }
}

/// Courses that passed the filter, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct FilterResult<'a> {
    pub count: usize,
    pub courses: Vec<&'a CourseRecord>,
}

/// Decides whether a single course should be offered to the user.
///
/// Checks stop at the first exclusion: time conflict,
/// then department, then grade.
pub fn is_available(course: &CourseRecord, criteria: &FilterCriteria) -> bool {
    if has_time_conflict(&course.raw_time, &criteria.busy_times) {
        return false;
    }

    if !criteria.department.is_empty()
        && !check_department(&course.restrictions, &criteria.department)
    {
        return false;
    }

    criteria
        .grade
        .map_or(true, |grade| check_grade(&course.restrictions, grade))
}

/// Filters the catalog, preserving input order.
///
/// # Arguments
/// * `courses` - The full catalog
/// * `criteria` - Department, grade and busy slots of the requester
///
/// # Returns
/// The matching courses and their count. Courses are borrowed, never copied
/// or modified.
pub fn filter_courses<'a>(courses: &'a [CourseRecord], criteria: &FilterCriteria) -> FilterResult<'a> {
    let courses: Vec<&CourseRecord> = courses
        .iter()
        .filter(|course| is_available(course, criteria))
        .collect();

    FilterResult {
        count: courses.len(),
        courses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_course_time;

    fn course(code: &str, raw_time: &str, restrictions: &str) -> CourseRecord {
        CourseRecord {
            code: code.to_string(),
            name: format!("Course {code}"),
            teacher: "Teacher".to_string(),
            credits: 3,
            raw_time: raw_time.to_string(),
            classroom: "E1-101".to_string(),
            course_type: "選修".to_string(),
            semester: "半".to_string(),
            note: String::new(),
            restrictions: restrictions.to_string(),
        }
    }

    fn catalog() -> Vec<CourseRecord> {
        vec![
            course("A", "一12", ""),
            course("B", "二34", "系所:限資工系。"),
            course("C", "三56", "年級:限三年級。"),
            course("D", "四78,五9", "系所:限電機系。年級:限四年級。"),
            course("E", "", "本課程以英語授課"),
            course("F", "一3", ""),
        ]
    }

    fn codes(result: &FilterResult<'_>) -> Vec<String> {
        result.courses.iter().map(|c| c.code.clone()).collect()
    }

    #[test]
    fn test_default_criteria_keeps_open_courses() {
        let courses = catalog();
        let result = filter_courses(&courses, &FilterCriteria::default());

        // Grade 1 is excluded from C and D only
        assert_eq!(codes(&result), vec!["A", "B", "E", "F"]);
        assert_eq!(result.count, 4);
    }

    #[test]
    fn test_excludes_conflicting_courses() {
        let courses = catalog();
        let criteria = FilterCriteria {
            grade: Some(3),
            busy_times: BusySlots::from_tokens(["1-2", "5-9"]),
            ..FilterCriteria::default()
        };
        let result = filter_courses(&courses, &criteria);

        assert_eq!(codes(&result), vec!["B", "C", "E", "F"]);
        for course in &result.courses {
            let slots = parse_course_time(&course.raw_time);
            assert!(slots.iter().all(|s| !criteria.busy_times.contains(s)));
        }
    }

    #[test]
    fn test_department_filter() {
        let courses = catalog();
        let criteria = FilterCriteria {
            department: "電機系".to_string(),
            grade: Some(4),
            ..FilterCriteria::default()
        };
        let result = filter_courses(&courses, &criteria);

        assert_eq!(codes(&result), vec!["A", "D", "E", "F"]);
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let courses = catalog();
        let criteria = FilterCriteria {
            department: "資工系".to_string(),
            grade: Some(3),
            busy_times: BusySlots::from_tokens(["3-6"]),
        };
        let result = filter_courses(&courses, &criteria);

        let positions: Vec<usize> = result
            .courses
            .iter()
            .map(|c| courses.iter().position(|o| o.code == c.code).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(codes(&result), vec!["A", "B", "E", "F"]);
    }

    #[test]
    fn test_unknown_grade_skips_grade_restrictions() {
        let courses = catalog();
        let criteria = FilterCriteria {
            grade: None,
            ..FilterCriteria::default()
        };
        let result = filter_courses(&courses, &criteria);

        assert_eq!(codes(&result), vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_filter_does_not_modify_catalog() {
        let courses = catalog();
        let before = courses.clone();
        let _ = filter_courses(&courses, &FilterCriteria::default());
        assert_eq!(courses, before);
    }
}
