//! CLI command handlers, one file per HTTP method plus shared output.

mod get;
mod head;
mod output;
mod post;

pub use get::run_get;
pub use head::run_head;
pub use post::run_post;

#[cfg(test)]
pub(crate) use post::request_body;
