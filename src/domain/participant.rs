// ==========================================
// 工程文档管理系统 - 项目参与方实体
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 参与单位与项目成员
// ==========================================
// 挂接前暂存于草稿，提交时逐个挂接到项目。
// 重复校验（"该用户已添加"等）是表示层职责，此处不做去重。
// ==========================================

use crate::domain::types::EntityId;
use serde::{Deserialize, Serialize};

// ==========================================
// Participant - 参与单位（公司侧）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: EntityId,                      // 暂存标识（提交前由调用方分配）
    pub company_id: EntityId,              // 公司
    pub company_name: Option<String>,      // 公司名称（展示用快照）
    pub contact_id: Option<EntityId>,      // 联系人
    pub company_role_id: Option<EntityId>, // 公司角色
    pub is_primary: bool,                  // 是否主要参与单位
    pub notes: Option<String>,             // 备注
}

// ==========================================
// Member - 项目成员（用户侧）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: EntityId,     // 暂存标识（提交前由调用方分配）
    pub user_id: EntityId, // 用户
    pub role: String,      // 项目内角色（admin/operator/viewer）
}
