pub mod local_storage;
pub mod notification_center;
pub mod notification_store;
pub mod record_filter;
