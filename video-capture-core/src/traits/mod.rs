pub mod capture_driver;
pub mod display_surface;
pub mod session_delegate;
