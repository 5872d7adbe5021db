use crate::model::{FieldMap, ParsedCourseRecord, ParsedExamRecord, MAX_CODE_LEN, MAX_TITLE_LEN};
use crate::parsing::validate::{is_valid_email, within_length};
use serde_json::Value;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_NAME: &str = "name";
pub const FIELD_INSTRUCTORS: &str = "instructor_emails";
pub const FIELD_DATE: &str = "date";
pub const FIELD_START: &str = "start_time";
pub const FIELD_END: &str = "end_time";

const TIME_FORMAT: &str = "%H:%M";

/// A parsed row the import engine can reconcile against a catalog.
pub trait ImportRecord {
    /// Natural key.
    fn code(&self) -> &str;

    /// Re-check the record invariants without the source text.
    fn revalidate(&self) -> Result<(), String>;

    /// Every parsed field, for a new entry. Absent optional fields are left out.
    fn create_fields(&self) -> FieldMap;

    /// Only the fields this import format is authoritative for, for an
    /// existing entry.
    fn authoritative_fields(&self) -> FieldMap;
}

fn check_code(code: &str) -> Result<(), String> {
    if code.trim().is_empty() {
        return Err("missing code".into());
    }
    if !within_length(code, MAX_CODE_LEN) {
        return Err(format!("code exceeds {MAX_CODE_LEN} characters"));
    }
    Ok(())
}

fn check_title(value: &str, name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("missing {name}"));
    }
    if !within_length(value, MAX_TITLE_LEN) {
        return Err(format!("{name} exceeds {MAX_TITLE_LEN} characters"));
    }
    Ok(())
}

impl ImportRecord for ParsedCourseRecord {
    fn code(&self) -> &str {
        &self.code
    }

    fn revalidate(&self) -> Result<(), String> {
        check_code(&self.code)?;
        check_title(&self.full_title, "title")
    }

    fn create_fields(&self) -> FieldMap {
        self.authoritative_fields()
    }

    fn authoritative_fields(&self) -> FieldMap {
        FieldMap::from([(FIELD_TITLE.to_string(), Value::from(self.full_title.as_str()))])
    }
}

impl ImportRecord for ParsedExamRecord {
    fn code(&self) -> &str {
        &self.code
    }

    fn revalidate(&self) -> Result<(), String> {
        check_code(&self.code)?;
        check_title(&self.name, "name")?;
        if self.instructor_emails.is_empty() {
            return Err("missing instructor emails".into());
        }
        let invalid: Vec<&str> = self
            .instructor_emails
            .iter()
            .map(|e| e.as_str())
            .filter(|e| !is_valid_email(e))
            .collect();
        if !invalid.is_empty() {
            return Err(format!("invalid emails: {}", invalid.join(", ")));
        }
        Ok(())
    }

    fn create_fields(&self) -> FieldMap {
        self.authoritative_fields()
    }

    /// Name and instructors always; schedule fields only when the row has them,
    /// so a blank column never clears a schedule already in the catalog.
    fn authoritative_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(FIELD_NAME.into(), Value::from(self.name.as_str()));
        fields.insert(
            FIELD_INSTRUCTORS.into(),
            Value::from(self.instructor_emails.clone()),
        );
        if let Some(date) = self.date {
            fields.insert(FIELD_DATE.into(), Value::from(date.format("%Y-%m-%d").to_string()));
        }
        if let Some(start) = self.start_time {
            fields.insert(FIELD_START.into(), Value::from(start.format(TIME_FORMAT).to_string()));
        }
        if let Some(end) = self.end_time {
            fields.insert(FIELD_END.into(), Value::from(end.format(TIME_FORMAT).to_string()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn exam() -> ParsedExamRecord {
        ParsedExamRecord {
            code: "MATH101".into(),
            name: "Calculus I".into(),
            instructor_emails: vec!["a@x.be".into()],
            date: None,
            start_time: None,
            end_time: None,
        }
    }

    #[test]
    fn test_course_fields_only_title() {
        let course = ParsedCourseRecord {
            code: "LFSAB1101".into(),
            full_title: "Physique".into(),
        };
        let fields = course.authoritative_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[FIELD_TITLE], "Physique");
    }

    #[test]
    fn test_exam_absent_schedule_left_out() {
        let fields = exam().create_fields();
        assert!(fields.contains_key(FIELD_NAME));
        assert!(fields.contains_key(FIELD_INSTRUCTORS));
        assert!(!fields.contains_key(FIELD_DATE));
        assert!(!fields.contains_key(FIELD_START));
    }

    #[test]
    fn test_exam_schedule_formatting() {
        let mut e = exam();
        e.date = NaiveDate::from_ymd_opt(2025, 1, 15);
        e.start_time = NaiveTime::from_hms_opt(9, 5, 0);
        let fields = e.authoritative_fields();
        assert_eq!(fields[FIELD_DATE], "2025-01-15");
        assert_eq!(fields[FIELD_START], "09:05");
    }

    #[test]
    fn test_revalidate_catches_bad_email() {
        let mut e = exam();
        e.instructor_emails.push("broken".into());
        assert_eq!(e.revalidate(), Err("invalid emails: broken".to_string()));
    }

    #[test]
    fn test_revalidate_ok() {
        assert!(exam().revalidate().is_ok());
    }
}
