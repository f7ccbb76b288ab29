//! Logic Module - Business Logic & Engines
//!
//! Chứa các engines xử lý: Threat Scorer, Classifier Client, Analysis
//! Coordinator, History.
//!
//! ## Architecture
//! - `threat/` - Heuristic scoring (rule table, scorer, report types)
//! - `classifier` - Remote classifier boundary (trait + HTTP client)
//! - `analysis` - Model-first / fallback coordination
//! - `history` - Capped in-memory analysis log

pub mod analysis;
pub mod classifier;
pub mod history;
pub mod threat;
