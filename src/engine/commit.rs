// ==========================================
// 工程文档管理系统 - 提交序列器
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 提交序列
// ==========================================
// 流程: 最小校验 → (新建)代码预检 → 压平载荷 → create/update
//       → (新建)逐个挂接参与单位与成员
// 口径: 主调用失败即中止，草稿保留可重试；
//       挂接失败逐个捕获，不回滚项目与已挂接项，
//       汇入结构化部分失败报告供调用方补挂。
//       挂接严格串行——限制后端压力，并让"哪一条失败"可追溯。
// ==========================================

use crate::config::WizardConfig;
use crate::domain::draft::ProjectDraft;
use crate::domain::participant::{Member, Participant};
use crate::domain::payload::ProjectPayload;
use crate::domain::types::{CommitMode, EntityId};
use crate::engine::backend::{BackendError, ProjectBackend};
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 提交错误类型
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("草稿校验失败: {0}")]
    Validation(String),

    #[error("项目代码已被占用: {code}")]
    CodeTaken {
        code: String,
        owner: Option<String>,
        project_name: Option<String>,
        is_deleted: bool,
    },

    #[error("项目保存失败: {0}")]
    Backend(#[from] BackendError),
}

// ==========================================
// CommitOutcome - 提交结果
// ==========================================
// 项目本体保存成功即视为提交成功；
// 挂接失败以结构化清单返回，调用方可只补挂失败项。
#[derive(Debug, Clone, Default)]
pub struct CommitOutcome {
    pub project_id: EntityId,
    pub failed_participants: Vec<(Participant, String)>,
    pub failed_members: Vec<(Member, String)>,
}

impl CommitOutcome {
    pub fn fully_attached(&self) -> bool {
        self.failed_participants.is_empty() && self.failed_members.is_empty()
    }
}

// ==========================================
// CommitSequencer - 提交序列器
// ==========================================
pub struct CommitSequencer<B> {
    backend: B,
    config: WizardConfig,
}

impl<B> CommitSequencer<B>
where
    B: ProjectBackend,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: WizardConfig::default(),
        }
    }

    pub fn with_config(backend: B, config: WizardConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 提交草稿；create 返回新项目标识，update 返回原标识。
    ///
    /// 提交过程中草稿不被修改，失败后用户可直接重试。
    /// 进行中的提交没有取消语义，调用方应在完成前阻止对话框关闭。
    #[instrument(skip(self, draft), fields(commit_id = %Uuid::new_v4(), mode = %mode))]
    pub async fn commit(
        &self,
        draft: &ProjectDraft,
        mode: CommitMode,
    ) -> Result<CommitOutcome, CommitError> {
        validate(draft, mode)?;

        // 新建预检: 代码占用即中止，不产生任何副作用
        if mode == CommitMode::Create && self.config.preflight_code_check {
            let availability = self
                .backend
                .check_code_availability(draft.project_code())
                .await?;
            if availability.exists {
                return Err(CommitError::CodeTaken {
                    code: draft.project_code().to_string(),
                    owner: availability.owner,
                    project_name: availability.project_name,
                    is_deleted: availability.is_deleted,
                });
            }
        }

        let payload = ProjectPayload::from_draft(draft);

        let project_id = match mode {
            CommitMode::Create => self.backend.create_project(&payload).await?,
            CommitMode::Update(id) => {
                self.backend.update_project(id, &payload).await?;
                id
            }
        };
        info!(project_id, "项目本体保存完成");

        let mut outcome = CommitOutcome {
            project_id,
            ..Default::default()
        };

        // 仅新建时挂接参与方；严格逐个 await
        if mode == CommitMode::Create {
            for participant in draft.pending_participants() {
                if let Err(e) = self
                    .backend
                    .attach_participant(project_id, participant)
                    .await
                {
                    warn!(
                        project_id,
                        company_id = participant.company_id,
                        error = %e,
                        "参与单位挂接失败，继续后续挂接"
                    );
                    outcome
                        .failed_participants
                        .push((participant.clone(), e.to_string()));
                }
            }

            for member in draft.pending_members() {
                if let Err(e) = self.backend.attach_member(project_id, member).await {
                    warn!(
                        project_id,
                        user_id = member.user_id,
                        error = %e,
                        "项目成员挂接失败，继续后续挂接"
                    );
                    outcome.failed_members.push((member.clone(), e.to_string()));
                }
            }
        }

        info!(
            project_id,
            failed_participants = outcome.failed_participants.len(),
            failed_members = outcome.failed_members.len(),
            "提交序列完成"
        );
        Ok(outcome)
    }
}

/// 最小不变量校验（结构性，不含业务规则）
fn validate(draft: &ProjectDraft, mode: CommitMode) -> Result<(), CommitError> {
    if draft.name().trim().is_empty() {
        return Err(CommitError::Validation("项目名称不能为空".to_string()));
    }
    if mode == CommitMode::Create && draft.project_code().trim().is_empty() {
        return Err(CommitError::Validation("项目代码不能为空".to_string()));
    }
    if !draft.cascade_invariant_holds() {
        return Err(CommitError::Validation(
            "存在未选中专业的文档类型关联".to_string(),
        ));
    }
    Ok(())
}
