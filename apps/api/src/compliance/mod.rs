// Compliance engine: deterministic resume QA.
// Implements: section splitting, keyword classification and matching,
// frequency/mirroring analysis, evidence verification, heuristic scoring,
// dual score aggregation. Pure functions throughout — handlers are the only
// I/O surface.

pub mod engine;
pub mod evidence;
pub mod frequency;
pub mod handlers;
pub mod heuristics;
pub mod keywords;
pub mod matcher;
pub mod models;
pub mod scoring;
pub mod text;
