//! Actors owning a timeline in the execution graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

/// An actor (thread, process, CPU, ...) whose state changes form one chain of
/// vertices in a [`TraceGraph`](crate::TraceGraph).
///
/// Workers are supplied by whoever builds the graph; the graph only needs to
/// compare, hash and clone them.
pub trait GraphWorker: Clone + Eq + Hash + fmt::Debug {
    /// Identifier of the host (machine or trace) this worker ran on.
    fn host_id(&self) -> &str;

    /// Free-form key/value description, used by reports and viewers.
    fn worker_info(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

/// A thread of execution identified by its host and thread id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskWorker {
    pub host_id: String,
    pub tid: i64,
    pub name: String,
}

impl TaskWorker {
    pub fn new(host_id: impl Into<String>, tid: i64, name: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            tid,
            name: name.into(),
        }
    }
}

impl GraphWorker for TaskWorker {
    fn host_id(&self) -> &str {
        &self.host_id
    }

    fn worker_info(&self) -> BTreeMap<String, String> {
        let mut info = BTreeMap::new();
        info.insert("tid".to_string(), self.tid.to_string());
        info.insert("name".to_string(), self.name.clone());
        info
    }
}

impl fmt::Display for TaskWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.host_id, self.tid, self.name)
    }
}
