// User feedback on generated funnels. One plain-text file per submission under FEEDBACK_DIR.

pub mod handlers;
pub mod store;
