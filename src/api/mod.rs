pub mod notification;
pub mod profile;
pub mod slip_page;
