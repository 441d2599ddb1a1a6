//! Per-item result types collected for the run summary.

/// Result of one unit of work (a synced file, a package, an installer step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Human-readable item name.
    pub name: String,
    /// Final status of the item.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Change applied.
    Ok,
    /// Already in the desired state.
    Unchanged,
    /// Deliberately not processed (e.g. macOS-only group on Linux).
    Skipped,
    /// Dry run; no changes were applied.
    DryRun,
    /// The item could not be processed.
    Failed,
}
