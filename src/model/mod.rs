pub mod attendance;
pub mod member;
pub mod period;

pub use attendance::{AttendanceRecord, AttendanceRow, AttendanceStatus};
pub use member::Member;
pub use period::Period;
