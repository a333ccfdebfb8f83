pub mod event;
pub mod calendar_type;
pub mod share;

pub use event::{Event, Reminder};
pub use calendar_type::Calendar;
pub use share::{CalendarShare, Invite, InviteStatus, Member, ShareRole};
