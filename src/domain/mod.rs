pub mod admissions;
pub mod certificates;
pub mod users;
