mod company;
mod job;

pub use company::{Company, HANDLE_REGEX};
pub use job::{Job, NewJob};
