//! Record store: the read-only tables every handler queries.
//!
//! Built once at startup from the CSV files in `DATA_DIR` and shared through
//! `AppState` as `Arc<Store>`. Nothing mutates it after construction.

pub mod loader;
pub mod models;

use std::collections::HashMap;
use std::path::Path;

use crate::store::loader::{
    read_credentials, read_marks, read_table, read_table_lowercase, StoreError, CONTACTS_FILE,
    CREDENTIALS_FILE, CURRICULUM_FILE, MARKS_FILE, WELL_KNOWN_FILE,
};
use crate::store::models::{Credential, CurriculumRow, SkillContact, StudentRecord, WellKnownSkill};

pub struct Store {
    students: HashMap<String, StudentRecord>,
    curriculum: HashMap<String, Vec<CurriculumRow>>,
    credentials: Vec<Credential>,
    contacts: Vec<SkillContact>,
    well_known: Vec<WellKnownSkill>,
}

impl Store {
    /// Loads all five tables from `data_dir`. Fails on the first missing or malformed file.
    pub fn load(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(
            read_marks(&data_dir.join(MARKS_FILE))?,
            read_table(&data_dir.join(CURRICULUM_FILE))?,
            read_credentials(&data_dir.join(CREDENTIALS_FILE))?,
            read_table_lowercase(&data_dir.join(CONTACTS_FILE))?,
            read_table(&data_dir.join(WELL_KNOWN_FILE))?,
        ))
    }

    pub fn new(
        students: Vec<StudentRecord>,
        curriculum: Vec<CurriculumRow>,
        credentials: Vec<Credential>,
        contacts: Vec<SkillContact>,
        well_known: Vec<WellKnownSkill>,
    ) -> Self {
        let students = students
            .into_iter()
            .map(|s| (s.user_id.clone(), s))
            .collect();

        let mut by_subject: HashMap<String, Vec<CurriculumRow>> = HashMap::new();
        for row in curriculum {
            by_subject.entry(row.subject.clone()).or_default().push(row);
        }

        Store {
            students,
            curriculum: by_subject,
            credentials,
            contacts,
            well_known,
        }
    }

    /// Subject-ordered marks for `user_id`, or `None` when the identifier is unknown.
    pub fn marks_for(&self, user_id: &str) -> Option<&StudentRecord> {
        self.students.get(user_id)
    }

    /// Every curriculum row for `subject`, in file order. Empty for unknown subjects.
    pub fn curriculum_for(&self, subject: &str) -> &[CurriculumRow] {
        self.curriculum
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Exact-match check of an (identifier, secret) pair against the allow-list.
    // TODO: compare salted hashes once the credentials table stores them.
    pub fn authenticate(&self, user_id: &str, password: &str) -> bool {
        self.credentials
            .iter()
            .any(|c| c.user_id == user_id && c.password == password)
    }

    /// Contacts whose primary or secondary skill equals `skill`.
    pub fn contacts_with_skill(&self, skill: &str) -> Vec<&SkillContact> {
        self.contacts.iter().filter(|c| c.has_skill(skill)).collect()
    }

    pub fn well_known(&self) -> &[WellKnownSkill] {
        &self.well_known
    }
}
