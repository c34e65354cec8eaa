pub mod capture_session;
pub mod capture_window;
