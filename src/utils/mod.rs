pub mod attendance_store;
