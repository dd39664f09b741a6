pub mod booking;
pub mod catalog;
pub mod repository;

pub use booking::{BookingRecord, BookingScope, DeleteAck, InsertAck, ScopeError, UpdateAck};
pub use catalog::{ServiceQuery, ServiceRecord, SortOrder};
pub use repository::{BookingRepository, ServiceRepository};
