//! Checkout pricing and redirect URLs.

use crate::domain::catalog::Course;
use crate::domain::foundation::CourseId;

/// Placeholder the processor substitutes with the real session id on redirect.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Converts a decimal price to the smallest currency unit, rounding to the
/// nearest cent. Catalog prices are capped at one billion, so the result
/// always fits.
pub fn price_in_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Where the buyer lands after leaving the hosted checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirects {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRedirects {
    /// Both URLs point back at the course page; success carries the session id.
    pub fn for_course(frontend_base: &str, course_id: &CourseId) -> Self {
        let course_page = format!("{}/courses/{}", frontend_base.trim_end_matches('/'), course_id);
        Self {
            success_url: format!("{}?session_id={}", course_page, SESSION_ID_PLACEHOLDER),
            cancel_url: course_page,
        }
    }
}

/// A single-item purchase of one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePurchase {
    pub course_id: CourseId,
    pub product_name: String,
    pub unit_amount: i64,
}

impl CoursePurchase {
    pub fn of(course: &Course) -> Self {
        Self {
            course_id: course.id,
            product_name: course.title.clone(),
            unit_amount: price_in_minor_units(course.price),
        }
    }
}
