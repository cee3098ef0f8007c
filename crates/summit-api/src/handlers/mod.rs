pub mod documents;
pub mod gallery;
pub mod health;
