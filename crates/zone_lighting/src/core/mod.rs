//! Core configuration types shared by the lighting subsystems

pub mod config;
