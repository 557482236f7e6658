//! Generated project files
//!
//! `.env` and `.lando.yml` are rendered from checked-in example files by
//! placeholder substitution:
//! - every `project-name` becomes the project slug
//! - every `KEY=generate` salt line in `.env` gets a fresh random value

pub mod render;

pub use render::{
    generate, render_env, render_lando, GeneratedFile, RenderOutcome, PROJECT_PLACEHOLDER,
};
