pub mod aggregate;

pub use aggregate::{MainCategory, Project, ProjectId, ProjectSummary, Taxonomy};
