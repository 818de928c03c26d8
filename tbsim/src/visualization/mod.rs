pub mod projection;
pub mod console;
