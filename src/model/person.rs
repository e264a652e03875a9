//! Person records and the repository that resolves them
//!
//! People are read from a JSON directory file. When no file is
//! configured (or the configured path does not exist) a built-in sample
//! directory is served instead, so the app always has something to show.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One person in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub location: String,
    pub joined: NaiveDate,
    #[serde(default)]
    pub notes: String,
    /// Avatar block color as RGB
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

fn default_color() -> [u8; 3] {
    [90, 120, 200]
}

impl Person {
    /// Initials shown on the avatar block: first letter of the first two
    /// name words, uppercased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

/// Where person records come from
#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Builtin,
}

/// Read-only person store.
///
/// `retrieve` re-reads the backing file on every call, so edits to the
/// directory file are picked up on the next navigation. Lookup misses are
/// `Ok(None)`; only I/O and parse failures are errors.
#[derive(Debug, Clone)]
pub struct PersonRepository {
    source: Source,
}

impl PersonRepository {
    /// Repository over a JSON file. Falls back to the built-in sample
    /// directory when no path is given.
    pub fn new(path: Option<&Path>) -> Self {
        let source = match path {
            Some(p) => Source::File(p.to_path_buf()),
            None => Source::Builtin,
        };
        Self { source }
    }

    pub fn builtin() -> Self {
        Self {
            source: Source::Builtin,
        }
    }

    /// All people in the directory, in file order
    pub fn all(&self) -> Result<Vec<Person>> {
        match &self.source {
            Source::File(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("failed to read people file: {}", path.display()))?;
                let people: Vec<Person> = serde_json::from_str(&contents)
                    .with_context(|| format!("failed to parse people file: {}", path.display()))?;
                Ok(people)
            }
            Source::Builtin => Ok(sample_people()),
        }
    }

    /// Resolve one person by id. `Ok(None)` means not found.
    pub fn retrieve(&self, id: &str) -> Result<Option<Person>> {
        Ok(self.all()?.into_iter().find(|p| p.id == id))
    }
}

/// Built-in sample directory used when no people file is configured
pub fn sample_people() -> Vec<Person> {
    let person = |id: &str,
                  name: &str,
                  role: &str,
                  location: &str,
                  joined: (i32, u32, u32),
                  notes: &str,
                  color: [u8; 3]| Person {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        email: format!("{}@example.com", id),
        location: location.to_string(),
        joined: NaiveDate::from_ymd_opt(joined.0, joined.1, joined.2)
            .unwrap_or_default(),
        notes: notes.to_string(),
        color,
    };

    vec![
        person(
            "amara",
            "Amara Okafor",
            "Staff Engineer",
            "Lagos",
            (2019, 3, 11),
            "Leads the storage working group.",
            [198, 86, 86],
        ),
        person(
            "bjorn",
            "Björn Lindqvist",
            "Product Designer",
            "Stockholm",
            (2021, 9, 1),
            "Owns the design system.",
            [86, 148, 198],
        ),
        person(
            "chen",
            "Chen Wei",
            "Engineering Manager",
            "Singapore",
            (2018, 1, 22),
            "Manages the platform team.",
            [108, 178, 120],
        ),
        person(
            "dita",
            "Dita Novak",
            "Site Reliability Engineer",
            "Prague",
            (2022, 5, 16),
            "On-call rotation lead.",
            [190, 140, 80],
        ),
        person(
            "emre",
            "Emre Yilmaz",
            "Data Scientist",
            "Istanbul",
            (2020, 11, 2),
            "Works on forecasting models.",
            [150, 100, 190],
        ),
        person(
            "farah",
            "Farah Haddad",
            "Technical Writer",
            "Amman",
            (2023, 2, 6),
            "Maintains the public docs.",
            [198, 110, 160],
        ),
        person(
            "goro",
            "Goro Tanaka",
            "Security Engineer",
            "Osaka",
            (2017, 7, 31),
            "Runs the quarterly audits.",
            [90, 170, 170],
        ),
        person(
            "ines",
            "Inés Delgado",
            "Frontend Engineer",
            "Madrid",
            (2024, 4, 8),
            "Building the reporting UI.",
            [170, 170, 90],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_initials_two_words() {
        let people = sample_people();
        assert_eq!(people[0].initials(), "AO");
    }

    #[test]
    fn test_initials_single_word() {
        let mut p = sample_people()[0].clone();
        p.name = "Cher".to_string();
        assert_eq!(p.initials(), "C");
    }

    #[test]
    fn test_builtin_retrieve_hit() {
        let repo = PersonRepository::builtin();
        let person = repo.retrieve("amara").unwrap();
        assert_eq!(person.unwrap().name, "Amara Okafor");
    }

    #[test]
    fn test_builtin_retrieve_miss_is_none_not_error() {
        let repo = PersonRepository::builtin();
        assert!(repo.retrieve("nobody").unwrap().is_none());
    }

    #[test]
    fn test_file_repository_round_trip() {
        let dir = std::env::temp_dir().join("pm-tui-test-people");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("people.json");
        let mut file = fs::File::create(&path).unwrap();
        let json = serde_json::to_string(&sample_people()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let repo = PersonRepository::new(Some(&path));
        assert_eq!(repo.all().unwrap().len(), sample_people().len());
        assert!(repo.retrieve("chen").unwrap().is_some());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let repo = PersonRepository::new(Some(Path::new("/nonexistent/people.json")));
        assert!(repo.retrieve("amara").is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join("pm-tui-test-people");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let repo = PersonRepository::new(Some(&path));
        assert!(repo.all().is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_person_deserializes_with_defaults() {
        let json = r#"{
            "id": "x",
            "name": "X Y",
            "role": "Engineer",
            "email": "x@example.com",
            "location": "Remote",
            "joined": "2020-01-01"
        }"#;
        let p: Person = serde_json::from_str(json).unwrap();
        assert!(p.notes.is_empty());
        assert_eq!(p.color, default_color());
    }
}
