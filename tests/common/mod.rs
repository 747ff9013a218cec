#![allow(dead_code)]

pub mod failing;
pub mod synthetic_page;
