// ==========================================
// 工程文档管理系统 - 项目后端接口
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 外部接口（项目后端）
// ==========================================
// 职责: 定义提交序列依赖的后端能力（不包含实现）
// ==========================================

use crate::domain::participant::{Member, Participant};
use crate::domain::payload::ProjectPayload;
use crate::domain::types::EntityId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 后端调用错误类型
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("网络请求失败: {0}")]
    Network(String),

    #[error("后端校验拒绝: {0}")]
    Rejected(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// CodeAvailability - 项目代码占用检查结果
// ==========================================
// is_deleted: 代码被已软删除的项目占用（仍视为占用，提示口径不同）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeAvailability {
    pub exists: bool,
    pub owner: Option<String>,
    pub project_name: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

// ==========================================
// ProjectBackend Trait
// ==========================================
// 用途: 提交序列的后端协作方
// 实现者: HTTP 客户端（外部）或测试桩
#[async_trait]
pub trait ProjectBackend: Send + Sync {
    /// 检查项目代码是否已被占用（新建预检）
    async fn check_code_availability(&self, code: &str) -> Result<CodeAvailability, BackendError>;

    /// 创建项目，返回新项目标识
    async fn create_project(&self, payload: &ProjectPayload) -> Result<EntityId, BackendError>;

    /// 更新既有项目
    async fn update_project(
        &self,
        project_id: EntityId,
        payload: &ProjectPayload,
    ) -> Result<(), BackendError>;

    /// 挂接一个参与单位
    async fn attach_participant(
        &self,
        project_id: EntityId,
        participant: &Participant,
    ) -> Result<(), BackendError>;

    /// 挂接一个项目成员
    async fn attach_member(&self, project_id: EntityId, member: &Member)
        -> Result<(), BackendError>;
}
