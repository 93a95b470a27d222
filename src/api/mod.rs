// API module entry
// JSON endpoints for listing, selecting and deselecting images

mod handlers;
mod response;
pub mod types;

pub use handlers::{handle_deselect, handle_list_selected, handle_select};
pub use response::json_response;
