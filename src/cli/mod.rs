pub mod convert;
pub mod setup;
pub mod sum;
pub mod tokens;
pub mod ui;
