pub mod interface;
pub mod ports;
pub mod report;
pub mod target;
