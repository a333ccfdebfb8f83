pub mod calendar;
pub mod grid;
pub mod store;
pub mod api;
pub mod sync;
pub mod storage;
pub mod ui;
pub mod app;

pub use calendar::{Calendar, CalendarShare, Event, ShareRole};
pub use app::{AppState, SyncStatus, ViewType};
pub use store::CalendarStore;
