//! HTTP protocol layer module
//!
//! Response builders and MIME handling, decoupled from the dispatch logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_413_response, build_500_response,
    build_attachment_response, build_health_response, build_html_response, build_options_response,
    build_status_response,
};
