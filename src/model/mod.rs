pub mod month;
pub mod notification;
pub mod profile;
pub mod slip;
