// document-backend/src/domain/approval_process.rs

//! 承認プロセスの状態遷移
//!
//! 永続化から切り離した純粋なロジック。サービス層はここで得た結果を
//! 1トランザクションで保存する。

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::approval_status::{ApprovalDecision, ApprovalStatus, StepStatus};
use super::approval_workflow_model::WorkflowStep;
use super::document_approval_model::ApproverEntry;
use super::document_status::DocumentStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("workflow has no steps")]
    EmptyWorkflow,

    #[error("workflow step '{step_id}' has no approver")]
    StepWithoutApprover { step_id: String },

    #[error("approval is already {0}")]
    Closed(ApprovalStatus),

    #[error("step {step} is out of range (approvers: {len})")]
    StepOutOfRange { step: usize, len: usize },

    #[error("step {step} cannot be decided before step {current}")]
    OutOfSequence { step: usize, current: usize },

    #[error("user '{user_id}' is not the approver of step {step}")]
    NotApprover { step: usize, user_id: String },
}

/// 1回の判断で到達した状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    InProgress { current_step: usize },
    Approved,
    Rejected,
}

impl DecisionOutcome {
    pub fn status(&self) -> ApprovalStatus {
        match self {
            Self::InProgress { .. } => ApprovalStatus::InProgress,
            Self::Approved => ApprovalStatus::Approved,
            Self::Rejected => ApprovalStatus::Rejected,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress { .. })
    }

    /// 終端に達した場合にドキュメントへ書き戻す状態
    pub fn document_status(&self) -> Option<DocumentStatus> {
        match self {
            Self::InProgress { .. } => None,
            Self::Approved => Some(DocumentStatus::Active),
            Self::Rejected => Some(DocumentStatus::Rejected),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalProcess {
    pub approvers: Vec<ApproverEntry>,
    pub current_step: usize,
    pub status: ApprovalStatus,
    pub completion_date: Option<DateTime<Utc>>,
}

impl ApprovalProcess {
    /// ワークフローのステップごとに承認者スロットを1つ作る
    pub fn start(steps: &[WorkflowStep]) -> Result<Self, ProcessError> {
        if steps.is_empty() {
            return Err(ProcessError::EmptyWorkflow);
        }

        let approvers = steps
            .iter()
            .map(|step| {
                let user_id = step
                    .default_approver()
                    .ok_or_else(|| ProcessError::StepWithoutApprover {
                        step_id: step.id.clone(),
                    })?;
                Ok(ApproverEntry {
                    user_id: user_id.to_string(),
                    step_id: step.id.clone(),
                    step_name: step.name.clone(),
                    status: StepStatus::Pending,
                    date: None,
                    comments: None,
                })
            })
            .collect::<Result<Vec<_>, ProcessError>>()?;

        Ok(Self {
            approvers,
            current_step: 0,
            status: ApprovalStatus::Pending,
            completion_date: None,
        })
    }

    /// 保存済みの状態から復元する
    pub fn restore(
        approvers: Vec<ApproverEntry>,
        current_step: usize,
        status: ApprovalStatus,
        completion_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            approvers,
            current_step,
            status,
            completion_date,
        }
    }

    /// ステップに判断を書き込み、全体の状態を進める
    ///
    /// 前提条件の確認順は「終了済み → ステップ範囲 → (厳格順序) → 承認者」。
    /// どれかに失敗した場合は何も変更しない。
    pub fn apply_decision(
        &mut self,
        step_index: usize,
        user_id: &str,
        decision: ApprovalDecision,
        comments: Option<String>,
        now: DateTime<Utc>,
        strict_sequential: bool,
    ) -> Result<DecisionOutcome, ProcessError> {
        if !self.status.is_open() {
            return Err(ProcessError::Closed(self.status));
        }

        let len = self.approvers.len();
        if step_index >= len {
            return Err(ProcessError::StepOutOfRange {
                step: step_index,
                len,
            });
        }

        if strict_sequential && step_index != self.current_step {
            return Err(ProcessError::OutOfSequence {
                step: step_index,
                current: self.current_step,
            });
        }

        let entry = &mut self.approvers[step_index];
        if entry.user_id != user_id {
            return Err(ProcessError::NotApprover {
                step: step_index,
                user_id: user_id.to_string(),
            });
        }

        entry.status = decision.into();
        entry.date = Some(now);
        entry.comments = comments;

        let outcome = match decision {
            // 却下は残りのステップに関係なく確定
            ApprovalDecision::Rejected => DecisionOutcome::Rejected,
            ApprovalDecision::Approved
                if self
                    .approvers
                    .iter()
                    .all(|entry| entry.status == StepStatus::Approved) =>
            {
                DecisionOutcome::Approved
            }
            ApprovalDecision::Approved => {
                self.current_step = (step_index + 1).min(len - 1);
                DecisionOutcome::InProgress {
                    current_step: self.current_step,
                }
            }
        };

        self.status = outcome.status();
        if outcome.is_terminal() {
            self.completion_date = Some(now);
        }

        Ok(outcome)
    }

    /// 明示的な取り消し
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), ProcessError> {
        if !self.status.is_open() {
            return Err(ProcessError::Closed(self.status));
        }
        self.status = ApprovalStatus::Cancelled;
        self.completion_date = Some(now);
        Ok(())
    }
}
