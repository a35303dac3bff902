//! GetStatsHandler - Query handler for catalog-wide sales figures.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{Capability, UserId};
use crate::ports::{AccessGate, CourseRepository};

#[derive(Debug, Clone)]
pub struct GetStatsQuery {
    pub caller: UserId,
}

/// Revenue is the current price times the enrolled count, summed over
/// courses. It is an estimate: price changes and free enrollments are not
/// tracked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_revenue: f64,
    pub total_enrollments: usize,
    pub course_count: usize,
}

pub struct GetStatsHandler {
    gate: Arc<dyn AccessGate>,
    courses: Arc<dyn CourseRepository>,
}

impl GetStatsHandler {
    pub fn new(gate: Arc<dyn AccessGate>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { gate, courses }
    }

    pub async fn handle(&self, query: GetStatsQuery) -> Result<CatalogStats, CatalogError> {
        self.gate
            .require(&query.caller, Capability::ViewStats)
            .await?;

        let courses = self.courses.list().await?;
        let (revenue, enrollments) = courses.iter().fold((0.0_f64, 0_usize), |(r, e), c| {
            let n = c.enrolled_students.len();
            (r + c.price * n as f64, e + n)
        });

        Ok(CatalogStats {
            total_revenue: (revenue * 100.0).round() / 100.0,
            total_enrollments: enrollments,
            course_count: courses.len(),
        })
    }
}
