// Funnel content generation: webinar script, ad copy and landing page.
// Prompts are built here and sent through llm_client; responses are parsed in parser.rs.
// generator.rs validates requests and runs the three generators concurrently.

pub mod ad_copy;
pub mod generator;
pub mod handlers;
pub mod key_points;
pub mod landing_page;
pub mod parser;
pub mod prompts;
pub mod tone;
pub mod webinar_script;
