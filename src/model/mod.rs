//! Model engines — the wrappers around both inference pipelines.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 ModelEngine (trait)                    │
//! │                                                        │
//! │   ┌───────────────┐         ┌────────────────┐         │
//! │   │ TextGenEngine │         │ WhisperEngine  │         │
//! │   │ prompt → text │         │ path → text    │         │
//! │   └───────▲───────┘         └───────▲────────┘         │
//! │           │                         │                  │
//! │           └──────┬──────────────────┘                  │
//! │                  │                                     │
//! │         ┌────────┴─────────┐                           │
//! │         │  EngineFactory   │  build(kind) — startup    │
//! │         │  (ConfigFactory) │  and Reload Models        │
//! │         └──────────────────┘                           │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Both engines expose the same single-method `run` contract; the shell
//! picks one based on the selected input mode and owns each behind a
//! `Box<dyn ModelEngine>` that reload replaces wholesale.

pub mod engine;
pub mod factory;
pub mod textgen;
pub mod whisper;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use engine::{EngineError, ModelEngine};
pub use factory::{ConfigFactory, EngineFactory, EngineKind};
pub use textgen::TextGenEngine;
pub use whisper::WhisperEngine;

// test-only re-export so shell tests can import MockEngine without
// `use model_desk::model::engine::MockEngine`.
#[cfg(test)]
pub use engine::MockEngine;
