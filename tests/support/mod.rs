#![allow(dead_code)]

pub mod fakes;
pub mod plotview_env;
