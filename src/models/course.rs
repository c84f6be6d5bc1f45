use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub credits: i64,
    pub term: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub credits: i64,
    pub term: i64,
}

impl NewCourse {
    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            code: self.code,
            name: self.name,
            credits: self.credits,
            term: self.term,
        }
    }
}

/// Fields to overwrite on an existing course. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<i64>,
    pub term: Option<i64>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none() && self.credits.is_none() && self.term.is_none()
    }

    pub fn apply_to(&self, course: &mut Course) {
        if let Some(code) = &self.code {
            course.code = code.clone();
        }
        if let Some(name) = &self.name {
            course.name = name.clone();
        }
        if let Some(credits) = self.credits {
            course.credits = credits;
        }
        if let Some(term) = self.term {
            course.term = term;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algoritma() -> Course {
        Course {
            id: 1,
            code: "IF101".to_string(),
            name: "Algoritma".to_string(),
            credits: 3,
            term: 1,
        }
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut course = algoritma();
        let patch = CoursePatch {
            credits: Some(4),
            ..Default::default()
        };

        patch.apply_to(&mut course);

        assert_eq!(course.credits, 4);
        assert_eq!(course.code, "IF101");
        assert_eq!(course.name, "Algoritma");
        assert_eq!(course.term, 1);
        assert_eq!(course.id, 1);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut course = algoritma();
        let patch = CoursePatch::default();
        assert!(patch.is_empty());

        patch.apply_to(&mut course);
        assert_eq!(course, algoritma());
    }
}
