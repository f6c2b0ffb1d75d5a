//! Server-rendered HTML for the form page

pub mod page;

pub use page::{render_form_page, render_status, PageModel};
