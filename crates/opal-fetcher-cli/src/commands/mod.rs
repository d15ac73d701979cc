pub mod check;
pub mod fetch;
