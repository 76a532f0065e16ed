// src/lib.rs

//! SZZ mining: links fixed bugs to the commits that fixed them, then walks
//! line history back from each fix to the commits that introduced the bug.

pub mod cli;
pub mod confidence;
pub mod config;
pub mod diff;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod issues;
pub mod linker;
pub mod miner;
pub mod model;
pub mod stats;
pub mod tracer;
pub mod vcs;

pub use config::Config;
pub use error::SzzError;
pub use model::{AffectedFile, BlameLine, BugRecord, CommitRecord, FileStatus, Link, Suspect};
pub use vcs::{GitRepository, Vcs};
