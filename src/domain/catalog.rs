// src/domain/catalog.rs
//
// Static course -> group catalog used to populate the registration form.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    First,
    Second,
    Third,
    Fourth,
}

impl Course {
    pub const ALL: [Course; 4] = [Course::First, Course::Second, Course::Third, Course::Fourth];

    pub fn number(self) -> u8 {
        match self {
            Course::First => 1,
            Course::Second => 2,
            Course::Third => 3,
            Course::Fourth => 4,
        }
    }

    /// Valid group names for this course
    pub fn groups(self) -> &'static [&'static str] {
        match self {
            Course::First => &["ЛХ02-25", "ТЭ13-25", "РС02-25", "ПМ04-25", "ДП03-25"],
            Course::Second => &["ЛХ02-24", "ТЭ13-24", "РС02-24", "ПМ04-24", "ЛХ02-25с"],
            Course::Third => &["ЛХ02-23", "ТЭ13-23", "РС02-23", "ПМ04-23", "ДП03-24"],
            Course::Fourth => &["ЛХ17", "МД23", "ПО6", "ТМ3", "ДП03-23"],
        }
    }

    pub fn has_group(self, group: &str) -> bool {
        self.groups().contains(&group)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Course {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Course::First),
            "2" => Ok(Course::Second),
            "3" => Ok(Course::Third),
            "4" => Ok(Course::Fourth),
            other => Err(DomainError::Validation(format!(
                "Unknown course '{}', expected 1-4",
                other
            ))),
        }
    }
}
