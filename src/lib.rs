//! Model Desk — a desktop front-end for two inference pipelines.
//!
//! The user picks between text generation and speech-to-text, supplies input
//! (typed text or a browsed audio file), runs the selected pipeline, and
//! reads the result in a scrollable output area.
//!
//! # Modules
//!
//! * [`app`]     — the egui application shell and its handlers.
//! * [`actions`] — trace-log and error-boundary wrappers around handlers.
//! * [`model`]   — the `ModelEngine` trait, both engines, and the factory.
//! * [`audio`]   — audio file decoding and resampling for the speech engine.
//! * [`notify`]  — injected dialog capabilities (message boxes, file picker).
//! * [`panels`]  — static information panels.
//! * [`config`]  — TOML settings and platform paths.

pub mod actions;
pub mod app;
pub mod audio;
pub mod config;
pub mod model;
pub mod notify;
pub mod panels;
