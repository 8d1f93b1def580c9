//! Pages and widgets of the Jobly front end.
//!
//! Each module pairs its Dioxus components with the plain functions they
//! render from (formatting, form validation, submission), so the logic can
//! be tested without a renderer.

pub mod auth;
pub mod companies;
pub mod fetch;
pub mod guards;
pub mod home;
pub mod jobs;
pub mod profile;
pub mod search;

pub use auth::{LoginForm, SignupForm};
pub use companies::{CompanyCard, CompanyDetail, CompanyList};
pub use fetch::{FetchState, FetchView};
pub use guards::{AnonRoute, PrivateRoute};
pub use home::{Homepage, NavBar};
pub use jobs::{JobCard, JobList};
pub use profile::ProfileForm;
pub use search::SearchForm;

/// Formats an integer with `,` thousands separators: `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
