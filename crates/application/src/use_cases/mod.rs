//! Application use cases (business logic orchestration).

mod render_template;

pub use render_template::*;
