//! CSV loading for the record store. Every table is required; any failure here
//! aborts startup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::store::models::{Credential, StudentRecord, SubjectMark};

pub const MARKS_FILE: &str = "marks.csv";
pub const CURRICULUM_FILE: &str = "curriculum.csv";
pub const CREDENTIALS_FILE: &str = "credentials.csv";
pub const CONTACTS_FILE: &str = "contacts.csv";
pub const WELL_KNOWN_FILE: &str = "well_known.csv";

/// Leading columns of the marks table that are not subjects.
const MARKS_KEY_COLUMNS: usize = 2;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Required table {} could not be opened: {source}", path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed row in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(
        "{}: expected identifier and name columns before subjects, found {found} column(s)",
        path.display()
    )]
    MissingColumns { path: PathBuf, found: usize },

    #[error("{}: line {line}, column '{column}': '{value}' is not a numeric mark", path.display())]
    InvalidMark {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{}: duplicate student identifier '{user_id}'", path.display())]
    DuplicateStudent { path: PathBuf, user_id: String },
}

fn open(path: &Path) -> Result<Reader<std::fs::File>, StoreError> {
    open_with(path, Trim::All)
}

fn open_with(path: &Path, trim: Trim) -> Result<Reader<std::fs::File>, StoreError> {
    ReaderBuilder::new()
        .trim(trim)
        .from_path(path)
        .map_err(|source| StoreError::Missing {
            path: path.to_path_buf(),
            source,
        })
}

fn malformed(path: &Path) -> impl Fn(csv::Error) -> StoreError + '_ {
    move |source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    }
}

/// Deserializes every row of a table with fixed, named headers.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let mut reader = open(path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(malformed(path))?;
    info!("Loaded {} row(s) from {}", rows.len(), path.display());
    Ok(rows)
}

/// Reads the credentials table. Only headers are trimmed; secrets are kept byte-for-byte
/// so the login check stays an exact match.
pub fn read_credentials(path: &Path) -> Result<Vec<Credential>, StoreError> {
    let mut reader = open_with(path, Trim::Headers)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<Credential>, _>>()
        .map_err(malformed(path))?;
    info!("Loaded {} credential(s) from {}", rows.len(), path.display());
    Ok(rows)
}

/// Like [`read_table`], but header names are lowercased before matching.
pub fn read_table_lowercase<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let mut reader = open(path)?;
    let lowered: Vec<String> = reader
        .headers()
        .map_err(malformed(path))?
        .iter()
        .map(str::to_lowercase)
        .collect();
    reader.set_headers(StringRecord::from(lowered));

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(malformed(path))?;
    info!("Loaded {} row(s) from {}", rows.len(), path.display());
    Ok(rows)
}

/// Reads the marks table. The first two columns are identifier and display name;
/// every further column is a subject, kept in file-column order.
pub fn read_marks(path: &Path) -> Result<Vec<StudentRecord>, StoreError> {
    let mut reader = open(path)?;
    let headers = reader.headers().map_err(malformed(path))?.clone();
    if headers.len() < MARKS_KEY_COLUMNS {
        return Err(StoreError::MissingColumns {
            path: path.to_path_buf(),
            found: headers.len(),
        });
    }
    let subjects: Vec<&str> = headers.iter().skip(MARKS_KEY_COLUMNS).collect();

    let mut seen = HashSet::new();
    let mut students = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed(path))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let user_id = record.get(0).unwrap_or_default().to_string();
        if !seen.insert(user_id.clone()) {
            return Err(StoreError::DuplicateStudent {
                path: path.to_path_buf(),
                user_id,
            });
        }

        let marks = subjects
            .iter()
            .enumerate()
            .map(|(i, subject)| {
                let raw = record.get(i + MARKS_KEY_COLUMNS).unwrap_or_default();
                // `f64` parsing accepts "NaN" and "inf"; neither is a mark.
                raw.parse::<f64>()
                    .ok()
                    .filter(|mark| mark.is_finite())
                    .map(|mark| SubjectMark {
                        subject: subject.to_string(),
                        mark,
                    })
                    .ok_or_else(|| StoreError::InvalidMark {
                        path: path.to_path_buf(),
                        line,
                        column: subject.to_string(),
                        value: raw.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        students.push(StudentRecord {
            user_id,
            name: record.get(1).unwrap_or_default().to_string(),
            marks,
        });
    }

    info!(
        "Loaded {} student(s) across {} subject(s) from {}",
        students.len(),
        subjects.len(),
        path.display()
    );
    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{CurriculumRow, SkillContact};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_marks_keep_column_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            MARKS_FILE,
            "User ID,Student Name,Math,Physics,Chem\ns1,Asha,30,55,85\ns2,Ravi,72.5,40,10\n",
        );

        let students = read_marks(&path).unwrap();
        assert_eq!(students.len(), 2);
        let subjects: Vec<_> = students[0].marks.iter().map(|m| m.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Math", "Physics", "Chem"]);
        assert_eq!(students[1].name, "Ravi");
        assert_eq!(students[1].marks[0].mark, 72.5);
    }

    #[test]
    fn test_non_numeric_mark_names_line_and_column() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            MARKS_FILE,
            "User ID,Student Name,Math\ns1,Asha,30\ns2,Ravi,absent\n",
        );

        let err = read_marks(&path).unwrap_err();
        match err {
            StoreError::InvalidMark {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Math");
                assert_eq!(value, "absent");
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nan_and_infinite_marks_rejected() {
        let dir = TempDir::new().unwrap();
        for bad in ["NaN", "inf", "-infinity"] {
            let path = write(
                &dir,
                MARKS_FILE,
                &format!("User ID,Student Name,Math,Phys\ns1,Asha,45,{bad}\n"),
            );
            match read_marks(&path) {
                Err(StoreError::InvalidMark { column, value, .. }) => {
                    assert_eq!(column, "Phys");
                    assert_eq!(value, bad);
                }
                other => panic!("Expected InvalidMark for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_credentials_keep_surrounding_spaces() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, CREDENTIALS_FILE, " UserID , Password \ns1, pw \n");

        let creds = read_credentials(&path).unwrap();
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].user_id, "s1");
        assert_eq!(creds[0].password, " pw ");
    }

    #[test]
    fn test_duplicate_student_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            MARKS_FILE,
            "User ID,Student Name,Math\ns1,Asha,30\ns1,Asha again,40\n",
        );
        assert!(matches!(
            read_marks(&path),
            Err(StoreError::DuplicateStudent { .. })
        ));
    }

    #[test]
    fn test_marks_without_name_column_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, MARKS_FILE, "User ID\ns1\n");
        assert!(matches!(
            read_marks(&path),
            Err(StoreError::MissingColumns { found: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let err = read_table::<CurriculumRow>(&dir.path().join(CURRICULUM_FILE)).unwrap_err();
        assert!(matches!(err, StoreError::Missing { .. }));
        assert!(err.to_string().contains(CURRICULUM_FILE), "{err}");
    }

    #[test]
    fn test_contact_headers_matched_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            CONTACTS_FILE,
            "Name,Skill1,SKILL2,LinkedIn\nMeera,Rust,Go,https://example.com/meera\n",
        );

        let contacts: Vec<SkillContact> = read_table_lowercase(&path).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].primary_skill, "Rust");
        assert_eq!(contacts[0].secondary_skill, "Go");
    }

    #[test]
    fn test_curriculum_fields_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            CURRICULUM_FILE,
            "SUBJECT,UNIT,TOPIC,YOUTUBE LINK,FAST BLOOMER,MEDIUM BLOOMER,SLOW BLOOMER\n\
             Mathematics , 1 ,Limits,https://youtu.be/x,Proofs,Worked examples,Basics\n",
        );

        let rows: Vec<CurriculumRow> = read_table(&path).unwrap();
        assert_eq!(rows[0].subject, "Mathematics");
        assert_eq!(rows[0].unit, "1");
    }
}
