use std::fmt;

/// The two operations a case can perform.
///
/// Each kind owns its log-file prefix, so build and run logs can share a
/// directory without clashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Build,
    Run,
}

impl OperationKind {
    /// Prefix used for `{prefix}.log.{timestamp}.txt` log files.
    pub fn log_prefix(self) -> &'static str {
        match self {
            OperationKind::Build => "vic.bld",
            OperationKind::Run => "vic.run",
        }
    }

    /// Verb used in the operator-facing diagnostic ("Error building VIC.").
    pub fn verb(self) -> &'static str {
        match self {
            OperationKind::Build => "building",
            OperationKind::Run => "running",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Build => f.write_str("build"),
            OperationKind::Run => f.write_str("run"),
        }
    }
}

/// Lifecycle of a single build or run operation.
///
/// ```text
/// NotStarted -> Running -> Completed
///                       \-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    NotStarted,
    Running,
    Completed,
    Failed,
}

impl OperationState {
    /// Whether `self -> next` is an edge of the lifecycle above.
    pub fn can_transition_to(self, next: OperationState) -> bool {
        matches!(
            (self, next),
            (OperationState::NotStarted, OperationState::Running)
                | (OperationState::Running, OperationState::Completed)
                | (OperationState::Running, OperationState::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OperationState::Completed | OperationState::Failed)
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationState::NotStarted => "not-started",
            OperationState::Running => "running",
            OperationState::Completed => "completed",
            OperationState::Failed => "failed",
        };
        f.write_str(s)
    }
}
