// src/domain/grades.rs
use serde::{Deserialize, Serialize};

pub const MIN_GRADE: u8 = 1;
pub const MAX_GRADE: u8 = 10;

/// Running list of grades on a ten-point scale.
#[derive(Debug, Clone, Default)]
pub struct GradeTracker {
    grades: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub grades: Vec<u8>,
    pub average: f64,
    pub count: usize,
}

impl GradeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a grade. Returns false and leaves the list untouched when out of range.
    pub fn add(&mut self, value: i64) -> bool {
        match u8::try_from(value) {
            Ok(grade) if (MIN_GRADE..=MAX_GRADE).contains(&grade) => {
                self.grades.push(grade);
                true
            }
            _ => false,
        }
    }

    pub fn remove_last(&mut self) -> Option<u8> {
        self.grades.pop()
    }

    /// Mean rounded to two decimals, 0.0 for an empty list
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.grades.iter().map(|g| u32::from(*g)).sum();
        let mean = f64::from(sum) / self.grades.len() as f64;
        (mean * 100.0).round() / 100.0
    }

    pub fn count(&self) -> usize {
        self.grades.len()
    }

    pub fn summary(&self) -> GradeSummary {
        GradeSummary {
            grades: self.grades.clone(),
            average: self.average(),
            count: self.count(),
        }
    }
}
