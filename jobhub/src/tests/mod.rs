pub mod common;

pub mod board;
