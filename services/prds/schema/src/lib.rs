//! sea-orm entities for the prds service.

pub mod page_functions;
pub mod pages;
pub mod prds;
pub mod users;
