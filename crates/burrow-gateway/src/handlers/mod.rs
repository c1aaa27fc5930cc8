mod health;
mod url;

pub use health::health_handler;
pub use url::{add_form_handler, add_query_handler, redirect_handler, ADD_FORM};
