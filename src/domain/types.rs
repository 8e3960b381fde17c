// ==========================================
// 工程文档管理系统 - 领域类型定义
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 项目状态体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 实体标识（后端分配的数据库主键）
pub type EntityId = i64;

// ==========================================
// 项目状态 (Project Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与后端一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning,  // 规划中
    Active,    // 进行中
    OnHold,    // 暂停
    Completed, // 已完成
    Cancelled, // 已取消
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Planning
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Planning => write!(f, "PLANNING"),
            ProjectStatus::Active => write!(f, "ACTIVE"),
            ProjectStatus::OnHold => write!(f, "ON_HOLD"),
            ProjectStatus::Completed => write!(f, "COMPLETED"),
            ProjectStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==========================================
// 提交模式 (Commit Mode)
// ==========================================
// 新建走 create + 参与方挂接; 编辑走 update（不重挂子资源）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// 新建项目
    Create,
    /// 更新既有项目
    Update(EntityId),
}

impl fmt::Display for CommitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitMode::Create => write!(f, "CREATE"),
            CommitMode::Update(id) => write!(f, "UPDATE({})", id),
        }
    }
}
