// ==========================================
// 工程文档管理系统 - 歧义处理流程
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 单键查询歧义
// ==========================================
// 触发: 交互式单键查询（用户只给类型代码不给名称），
//       同一专业语境下该代码可能命中 0/1/多 个文档类型。
// 注意: 两键匹配失败属硬性未匹配（见对照引擎），不进此队列。
// 流程: FIFO 队列逐对处理，表示层做多选确认；
//       取消只丢弃当前对，队列继续。
// 状态机: Idle → Presenting → (Idle | Presenting)，队列排空即终止。
// ==========================================

use crate::domain::draft::ProjectDraft;
use crate::domain::reference::ReferenceDocumentType;
use crate::domain::types::EntityId;
use crate::engine::backend::BackendError;
use async_trait::async_trait;
use std::collections::VecDeque;
use tracing::{debug, warn};

// ==========================================
// AmbiguousPair - 待澄清的 (专业, 类型代码) 对
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousPair {
    pub discipline_id: EntityId,
    pub code: String,
}

/// 表示层返回的用户选择
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 用户勾选的文档类型子集（可为空）
    Chosen(Vec<EntityId>),
    /// 用户取消本次确认（丢弃当前对，继续队列）
    Cancelled,
}

/// 流程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Presenting,
}

// ==========================================
// DocumentTypeSearch Trait
// ==========================================
// 用途: 按 (专业, 代码) 查询候选文档类型
#[async_trait]
pub trait DocumentTypeSearch: Send + Sync {
    async fn search_by_code(
        &self,
        discipline_id: EntityId,
        code: &str,
    ) -> Result<Vec<ReferenceDocumentType>, BackendError>;
}

// ==========================================
// ChoicePresenter Trait
// ==========================================
// 用途: 表示层协作方，向用户展示候选并收集多选结果
#[async_trait]
pub trait ChoicePresenter: Send + Sync {
    async fn present(
        &self,
        pair: &AmbiguousPair,
        candidates: &[ReferenceDocumentType],
    ) -> Selection;
}

// ==========================================
// AmbiguityResolutionFlow - 歧义处理流程
// ==========================================
pub struct AmbiguityResolutionFlow<S, P> {
    queue: VecDeque<AmbiguousPair>,
    state: FlowState,
    search: S,
    presenter: P,
}

impl<S, P> AmbiguityResolutionFlow<S, P>
where
    S: DocumentTypeSearch,
    P: ChoicePresenter,
{
    pub fn new(search: S, presenter: P) -> Self {
        Self {
            queue: VecDeque::new(),
            state: FlowState::Idle,
            search,
            presenter,
        }
    }

    /// 入队一个待澄清对
    pub fn enqueue(&mut self, discipline_id: EntityId, code: impl Into<String>) {
        self.queue.push_back(AmbiguousPair {
            discipline_id,
            code: code.into(),
        });
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// 逐对处理直至队列排空；队列为空时为空操作。
    ///
    /// 每一对: 查询候选 → 表示层确认 → 选中项幂等并入草稿。
    /// 查询失败按空候选呈现（用户可取消），不中断队列。
    pub async fn process_next(&mut self, draft: &mut ProjectDraft) {
        while let Some(pair) = self.queue.pop_front() {
            self.state = FlowState::Presenting;

            let candidates = match self
                .search
                .search_by_code(pair.discipline_id, &pair.code)
                .await
            {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(
                        discipline_id = pair.discipline_id,
                        code = %pair.code,
                        error = %e,
                        "候选文档类型查询失败，按空候选呈现"
                    );
                    Vec::new()
                }
            };

            match self.presenter.present(&pair, &candidates).await {
                Selection::Chosen(ids) => {
                    draft.merge_document_type_selection(pair.discipline_id, &ids);
                    debug!(
                        discipline_id = pair.discipline_id,
                        code = %pair.code,
                        chosen = ids.len(),
                        "歧义对已确认"
                    );
                }
                Selection::Cancelled => {
                    debug!(
                        discipline_id = pair.discipline_id,
                        code = %pair.code,
                        "歧义对被取消，继续下一对"
                    );
                }
            }
        }
        self.state = FlowState::Idle;
    }
}
