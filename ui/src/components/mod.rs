pub mod form;
pub mod screen_page;
