//! Small concurrency primitives shared by the reply lifecycle.

mod commit_once;

pub use commit_once::CommitOnce;
