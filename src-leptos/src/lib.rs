//! iflow2api Dashboard - Leptos glue
//!
//! Runs inside the Tauri WebView or a plain browser tab. All hard work is
//! done by the backend; this crate only picks the transport, persists to
//! `localStorage` and mirrors store state into signals for the views.

pub mod actions;
pub mod app;
pub mod storage;
pub mod tauri;
