//! Solve history: the replayable output artifact of every engine run.
//!
//! - [`History`] — location list plus ordered solution snapshots
//! - [`write_history`] / [`read_history`] — CSV persistence

mod persist;
mod recorder;

pub use persist::{
    read_history, read_history_from_path, write_history, write_history_to_path, END_MARKER,
};
pub use recorder::{History, Snapshot};
