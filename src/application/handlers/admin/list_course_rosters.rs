//! ListCourseRostersHandler - Query handler for the admin course list.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::catalog::author_names;
use crate::domain::catalog::{CatalogError, CourseDetail};
use crate::domain::foundation::{Capability, UserId};
use crate::ports::{AccessGate, CourseRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ListCourseRostersQuery {
    pub caller: UserId,
}

/// An enrolled student as the back-office sees them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRef {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Course detail plus who is enrolled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRoster {
    #[serde(flatten)]
    pub course: CourseDetail,
    pub enrolled_students: Vec<StudentRef>,
}

pub struct ListCourseRostersHandler {
    gate: Arc<dyn AccessGate>,
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListCourseRostersHandler {
    pub fn new(
        gate: Arc<dyn AccessGate>,
        courses: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            gate,
            courses,
            users,
        }
    }

    pub async fn handle(
        &self,
        query: ListCourseRostersQuery,
    ) -> Result<Vec<CourseRoster>, CatalogError> {
        self.gate
            .require(&query.caller, Capability::ManageCourses)
            .await?;

        let courses = self.courses.list().await?;

        // One lookup for every student across the catalog
        let student_ids: BTreeSet<UserId> = courses
            .iter()
            .flat_map(|c| c.enrolled_students.iter().copied())
            .collect();
        let ids: Vec<UserId> = student_ids.into_iter().collect();
        let students: HashMap<UserId, StudentRef> = self
            .users
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    StudentRef {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    },
                )
            })
            .collect();

        let mut rosters = Vec::with_capacity(courses.len());
        for course in &courses {
            let names = author_names(self.users.as_ref(), course).await?;
            rosters.push(CourseRoster {
                course: course.detail(&names),
                enrolled_students: course
                    .enrolled_students
                    .iter()
                    .filter_map(|id| students.get(id).cloned())
                    .collect(),
            });
        }
        Ok(rosters)
    }
}
