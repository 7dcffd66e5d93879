//! Scripted failures for the in-memory backends.
//!
//! A [`FaultPlan`] keeps, per operation, a schedule of upcoming calls. Each
//! call to an operation consumes one slot; a slot holding a [`FaultKind`]
//! makes that call fail before it touches any state.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};

/// Store operations a fault can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CreateDocument,
    GetDocument,
    UpdateDocument,
    DeleteDocument,
    ListDocuments,
    CreateFile,
    GetFile,
    DeleteFile,
}

impl StoreOp {
    fn is_file_op(&self) -> bool {
        matches!(self, Self::CreateFile | Self::GetFile | Self::DeleteFile)
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateDocument => "create_document",
            Self::GetDocument => "get_document",
            Self::UpdateDocument => "update_document",
            Self::DeleteDocument => "delete_document",
            Self::ListDocuments => "list_documents",
            Self::CreateFile => "create_file",
            Self::GetFile => "get_file",
            Self::DeleteFile => "delete_file",
        };
        f.write_str(name)
    }
}

/// How an injected failure presents itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultKind {
    /// The request never reached the store.
    Network,
    /// The store received the request and refused it.
    Rejected,
}

/// Per-operation schedule of injected failures.
#[derive(Debug, Default)]
pub struct FaultPlan {
    schedule: Mutex<HashMap<StoreOp, VecDeque<Option<FaultKind>>>>,
}

impl FaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call to `op`.
    pub fn fail_next(&self, op: StoreOp, kind: FaultKind) {
        self.fail_nth(op, 0, kind);
    }

    /// Let `n` calls to `op` through, then fail the one after.
    pub fn fail_nth(&self, op: StoreOp, n: usize, kind: FaultKind) {
        let mut schedule = self.schedule.lock().expect("lock poisoned");
        let slots = schedule.entry(op).or_default();
        if slots.len() <= n {
            slots.resize(n + 1, None);
        }
        slots[n] = Some(kind);
    }

    /// Drop every scheduled failure.
    pub fn clear(&self) {
        self.schedule.lock().expect("lock poisoned").clear();
    }

    /// Consume one slot for `op`, returning the injected error if any.
    pub fn check(&self, op: StoreOp) -> StoreResult<()> {
        let fault = {
            let mut schedule = self.schedule.lock().expect("lock poisoned");
            schedule.get_mut(&op).and_then(VecDeque::pop_front).flatten()
        };
        match fault {
            None => Ok(()),
            Some(FaultKind::Network) => Err(StoreError::Network(format!(
                "injected network failure during {op}"
            ))),
            Some(FaultKind::Rejected) if op.is_file_op() => {
                Err(StoreError::File(format!("injected rejection of {op}")))
            }
            Some(FaultKind::Rejected) => {
                Err(StoreError::Write(format!("injected rejection of {op}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_plan_passes() {
        let plan = FaultPlan::new();
        assert!(plan.check(StoreOp::CreateFile).is_ok());
    }

    #[test]
    fn fail_next_is_one_shot() {
        let plan = FaultPlan::new();
        plan.fail_next(StoreOp::DeleteFile, FaultKind::Rejected);
        assert!(matches!(plan.check(StoreOp::DeleteFile), Err(StoreError::File(_))));
        assert!(plan.check(StoreOp::DeleteFile).is_ok());
    }

    #[test]
    fn fail_nth_skips_earlier_calls() {
        let plan = FaultPlan::new();
        plan.fail_nth(StoreOp::CreateFile, 1, FaultKind::Network);
        assert!(plan.check(StoreOp::CreateFile).is_ok());
        let err = plan.check(StoreOp::CreateFile).unwrap_err();
        assert!(matches!(err, StoreError::Network(_)));
        assert!(plan.check(StoreOp::CreateFile).is_ok());
    }

    #[test]
    fn faults_are_per_operation() {
        let plan = FaultPlan::new();
        plan.fail_next(StoreOp::UpdateDocument, FaultKind::Rejected);
        assert!(plan.check(StoreOp::CreateDocument).is_ok());
        assert!(matches!(plan.check(StoreOp::UpdateDocument), Err(StoreError::Write(_))));
    }

    #[test]
    fn clear_disarms() {
        let plan = FaultPlan::new();
        plan.fail_next(StoreOp::GetDocument, FaultKind::Network);
        plan.clear();
        assert!(plan.check(StoreOp::GetDocument).is_ok());
    }
}
