#![allow(dead_code)]

pub mod events;
