#![allow(dead_code)]

use simplelog::{Config, LevelFilter, TestLogger};

pub mod virtual_network;

pub fn init_logging() {
    // already set by another test in the same binary
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}
