// ==========================================
// 工程文档管理系统 - 项目提交载荷
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 提交序列
// ==========================================
// 职责: 草稿聚合 → 后端期望的扁平结构
// 口径: Set/Map 压平为数组/对象；日期只保留日历日（无时间分量）
// ==========================================

use crate::domain::draft::ProjectDraft;
use crate::domain::types::{EntityId, ProjectStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// PayloadAssociation - 关联的线上形态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadAssociation {
    #[serde(rename = "documentTypeId")]
    pub document_type_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drs: Option<String>,
}

// ==========================================
// ProjectPayload - 创建/更新接口的请求体
// ==========================================
// 字段名与后端 schema 对齐（snake_case，关联项为 camelCase 子对象）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub project_code: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>, // 序列化为 YYYY-MM-DD
    pub end_date: Option<NaiveDate>,
    pub selected_disciplines: Vec<EntityId>,
    pub discipline_document_types: BTreeMap<EntityId, Vec<PayloadAssociation>>,
    pub selected_revision_descriptions: Vec<EntityId>,
    pub selected_revision_steps: Vec<EntityId>,
    pub workflow_preset_id: Option<EntityId>,
}

impl ProjectPayload {
    /// 从草稿聚合压平为提交载荷
    pub fn from_draft(draft: &ProjectDraft) -> Self {
        let discipline_document_types = draft
            .discipline_document_types()
            .iter()
            .map(|(discipline_id, associations)| {
                let items = associations
                    .iter()
                    .map(|a| PayloadAssociation {
                        document_type_id: a.document_type_id,
                        drs: a.drs.clone(),
                    })
                    .collect();
                (*discipline_id, items)
            })
            .collect();

        Self {
            name: draft.name().to_string(),
            project_code: draft.project_code().to_string(),
            description: draft.description().to_string(),
            status: draft.status(),
            start_date: draft.start_date(),
            end_date: draft.end_date(),
            selected_disciplines: draft.selected_disciplines().to_vec(),
            discipline_document_types,
            selected_revision_descriptions: draft.selected_revision_descriptions().to_vec(),
            selected_revision_steps: draft.selected_revision_steps().to_vec(),
            workflow_preset_id: draft.workflow_preset_id(),
        }
    }
}
