//! VoLaLa: scenario dialogues for learning French, read aloud with a
//! follow-along highlight, plus a personal vocabulary list.

pub mod app;
pub mod auth;
pub mod content;
pub mod engine;
pub mod reading;
pub mod speech;
pub mod storage;
pub mod ui;
