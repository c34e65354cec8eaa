pub mod marshal;
pub mod static_surface;
pub mod ui_thread;
