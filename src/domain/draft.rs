// ==========================================
// 工程文档管理系统 - 项目草稿聚合
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 草稿聚合与变更跟踪
// ==========================================
// 红线: 草稿只能通过显式操作修改（toggle/add/remove/set），
//       禁止直接字段赋值，保证变更跟踪与级联规则集中生效。
// 生命周期: 新建为空草稿；编辑模式从既有项目水化后 mark_initialized；
//           对话框关闭即丢弃，不做自动保存。
// ==========================================

use crate::domain::participant::{Member, Participant};
use crate::domain::types::{EntityId, ProjectStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// DocTypeAssociation - 专业 ↔ 文档类型关联
// ==========================================
// 不变量: 草稿内同一 (discipline_id, document_type_id) 至多一条；
//         重复加入更新 drs 而不产生重复条目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTypeAssociation {
    pub discipline_id: EntityId,
    pub document_type_id: EntityId,
    pub drs: Option<String>, // 文档登记码（自由文本标注）
}

impl DocTypeAssociation {
    pub fn bare(discipline_id: EntityId, document_type_id: EntityId) -> Self {
        Self {
            discipline_id,
            document_type_id,
            drs: None,
        }
    }
}

// ==========================================
// ChangeTracker - 变更跟踪器（编辑模式）
// ==========================================
// 水化完成后 mark_initialized 启用；此后任何非空操作置脏。
// "脏"的口径是命令级的：命令与空操作不同即视为变更。
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    initialized: bool,
    has_changes: bool,
}

impl ChangeTracker {
    /// 水化完成，开始跟踪变更
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 记录一次命令的实际效果
    fn record(&mut self, changed: bool) {
        if changed && self.initialized {
            self.has_changes = true;
        }
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// 保存成功后清除脏标记
    pub fn reset(&mut self) {
        self.has_changes = false;
    }
}

// ==========================================
// ProjectDraft - 项目草稿聚合
// ==========================================
// 提交前的完整项目配置：标量字段、专业选择、专业-类型关联、
// 版次词表、工作流预设、待挂接参与单位与成员。
// 不变量: discipline_document_types 的键 ⊆ selected_disciplines，
//         取消选择专业时级联删除其关联桶。
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    // ===== 标量字段 =====
    name: String,
    project_code: String,
    description: String,
    status: ProjectStatus,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,

    // ===== 专业与文档类型 =====
    selected_disciplines: Vec<EntityId>, // 保持选择顺序
    discipline_document_types: BTreeMap<EntityId, Vec<DocTypeAssociation>>,

    // ===== 版次词表 =====
    selected_revision_descriptions: Vec<EntityId>,
    selected_revision_steps: Vec<EntityId>,

    // ===== 工作流 =====
    workflow_preset_id: Option<EntityId>,

    // ===== 待挂接参与方 =====
    pending_participants: Vec<Participant>,
    pending_members: Vec<Member>,

    // ===== 变更跟踪 =====
    tracker: ChangeTracker,
}

impl ProjectDraft {
    /// 新建模式：空草稿
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 读取接口
    // ==========================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_code(&self) -> &str {
        &self.project_code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn selected_disciplines(&self) -> &[EntityId] {
        &self.selected_disciplines
    }

    pub fn is_discipline_selected(&self, discipline_id: EntityId) -> bool {
        self.selected_disciplines.contains(&discipline_id)
    }

    pub fn discipline_document_types(&self) -> &BTreeMap<EntityId, Vec<DocTypeAssociation>> {
        &self.discipline_document_types
    }

    pub fn associations_for(&self, discipline_id: EntityId) -> &[DocTypeAssociation] {
        self.discipline_document_types
            .get(&discipline_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn selected_revision_descriptions(&self) -> &[EntityId] {
        &self.selected_revision_descriptions
    }

    pub fn selected_revision_steps(&self) -> &[EntityId] {
        &self.selected_revision_steps
    }

    pub fn workflow_preset_id(&self) -> Option<EntityId> {
        self.workflow_preset_id
    }

    pub fn pending_participants(&self) -> &[Participant] {
        &self.pending_participants
    }

    pub fn pending_members(&self) -> &[Member] {
        &self.pending_members
    }

    /// 级联不变量: 关联桶的键必须都在已选专业内
    pub fn cascade_invariant_holds(&self) -> bool {
        self.discipline_document_types
            .keys()
            .all(|id| self.selected_disciplines.contains(id))
    }

    // ==========================================
    // 变更跟踪
    // ==========================================

    /// 编辑模式水化完成后调用，此后的操作才计入脏标记
    pub fn mark_initialized(&mut self) {
        self.tracker.mark_initialized();
    }

    pub fn has_changes(&self) -> bool {
        self.tracker.has_changes()
    }

    pub fn reset_changes(&mut self) {
        self.tracker.reset();
    }

    // ==========================================
    // 标量字段操作
    // ==========================================

    pub fn set_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        let changed = value != self.name;
        self.name = value;
        self.tracker.record(changed);
    }

    pub fn set_project_code(&mut self, value: impl Into<String>) {
        let value = value.into();
        let changed = value != self.project_code;
        self.project_code = value;
        self.tracker.record(changed);
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        let value = value.into();
        let changed = value != self.description;
        self.description = value;
        self.tracker.record(changed);
    }

    pub fn set_status(&mut self, value: ProjectStatus) {
        let changed = value != self.status;
        self.status = value;
        self.tracker.record(changed);
    }

    pub fn set_start_date(&mut self, value: Option<NaiveDate>) {
        let changed = value != self.start_date;
        self.start_date = value;
        self.tracker.record(changed);
    }

    pub fn set_end_date(&mut self, value: Option<NaiveDate>) {
        let changed = value != self.end_date;
        self.end_date = value;
        self.tracker.record(changed);
    }

    // ==========================================
    // 专业与文档类型操作
    // ==========================================

    /// 切换专业选择；取消选择时级联删除其关联桶。
    /// 返回切换后是否处于选中状态。
    pub fn toggle_discipline(&mut self, discipline_id: EntityId) -> bool {
        let selected;
        if let Some(pos) = self
            .selected_disciplines
            .iter()
            .position(|id| *id == discipline_id)
        {
            self.selected_disciplines.remove(pos);
            self.discipline_document_types.remove(&discipline_id);
            selected = false;
        } else {
            self.selected_disciplines.push(discipline_id);
            selected = true;
        }
        self.tracker.record(true);
        selected
    }

    /// 切换一条裸关联（无 drs）。
    /// 前提: 调用方保证该专业已选中（界面上类型列表只在选中后出现）。
    pub fn toggle_document_type(&mut self, discipline_id: EntityId, document_type_id: EntityId) {
        let bucket = self
            .discipline_document_types
            .entry(discipline_id)
            .or_default();
        if let Some(pos) = bucket
            .iter()
            .position(|a| a.document_type_id == document_type_id)
        {
            bucket.remove(pos);
        } else {
            bucket.push(DocTypeAssociation::bare(discipline_id, document_type_id));
        }
        self.tracker.record(true);
    }

    /// 合并对照结果：专业并集 + 关联插入或 drs 更新。
    /// drs 口径: 新值非空才覆盖旧值，空值不清除既有标注。
    pub fn merge_reconciliation(
        &mut self,
        disciplines_to_add: &[EntityId],
        associations_to_add: &[DocTypeAssociation],
    ) {
        let mut changed = false;

        for id in disciplines_to_add {
            if !self.selected_disciplines.contains(id) {
                self.selected_disciplines.push(*id);
                changed = true;
            }
        }

        for assoc in associations_to_add {
            if !self.selected_disciplines.contains(&assoc.discipline_id) {
                self.selected_disciplines.push(assoc.discipline_id);
                changed = true;
            }
            let bucket = self
                .discipline_document_types
                .entry(assoc.discipline_id)
                .or_default();
            match bucket
                .iter_mut()
                .find(|a| a.document_type_id == assoc.document_type_id)
            {
                Some(existing) => {
                    if let Some(drs) = assoc.drs.as_deref() {
                        if !drs.is_empty() && existing.drs.as_deref() != Some(drs) {
                            existing.drs = Some(drs.to_string());
                            changed = true;
                        }
                    }
                }
                None => {
                    bucket.push(assoc.clone());
                    changed = true;
                }
            }
        }

        self.tracker.record(changed);
    }

    /// 批量并入一个专业的文档类型选择（歧义处理流程使用）。
    /// 幂等: 已存在的类型不重复加入；必要时顺带选中该专业。
    pub fn merge_document_type_selection(
        &mut self,
        discipline_id: EntityId,
        document_type_ids: &[EntityId],
    ) {
        let mut changed = false;

        if !self.selected_disciplines.contains(&discipline_id) {
            self.selected_disciplines.push(discipline_id);
            changed = true;
        }

        let bucket = self
            .discipline_document_types
            .entry(discipline_id)
            .or_default();
        for id in document_type_ids {
            if !bucket.iter().any(|a| a.document_type_id == *id) {
                bucket.push(DocTypeAssociation::bare(discipline_id, *id));
                changed = true;
            }
        }

        self.tracker.record(changed);
    }

    // ==========================================
    // 版次词表与工作流操作
    // ==========================================

    pub fn toggle_revision_description(&mut self, id: EntityId) {
        toggle_in(&mut self.selected_revision_descriptions, id);
        self.tracker.record(true);
    }

    pub fn toggle_revision_step(&mut self, id: EntityId) {
        toggle_in(&mut self.selected_revision_steps, id);
        self.tracker.record(true);
    }

    pub fn set_workflow_preset(&mut self, preset_id: Option<EntityId>) {
        let changed = preset_id != self.workflow_preset_id;
        self.workflow_preset_id = preset_id;
        self.tracker.record(changed);
    }

    // ==========================================
    // 参与方操作
    // ==========================================

    pub fn add_participant(&mut self, participant: Participant) {
        self.pending_participants.push(participant);
        self.tracker.record(true);
    }

    /// 按暂存标识移除；返回是否确有移除
    pub fn remove_participant(&mut self, id: EntityId) -> bool {
        let before = self.pending_participants.len();
        self.pending_participants.retain(|p| p.id != id);
        let removed = self.pending_participants.len() != before;
        self.tracker.record(removed);
        removed
    }

    pub fn add_member(&mut self, member: Member) {
        self.pending_members.push(member);
        self.tracker.record(true);
    }

    /// 按暂存标识移除；返回是否确有移除
    pub fn remove_member(&mut self, id: EntityId) -> bool {
        let before = self.pending_members.len();
        self.pending_members.retain(|m| m.id != id);
        let removed = self.pending_members.len() != before;
        self.tracker.record(removed);
        removed
    }
}

/// Vec 内切换元素存在性（保持插入顺序）
fn toggle_in(list: &mut Vec<EntityId>, id: EntityId) {
    if let Some(pos) = list.iter().position(|x| *x == id) {
        list.remove(pos);
    } else {
        list.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn association(d: EntityId, t: EntityId, drs: Option<&str>) -> DocTypeAssociation {
        DocTypeAssociation {
            discipline_id: d,
            document_type_id: t,
            drs: drs.map(str::to_string),
        }
    }

    #[test]
    fn test_toggle_discipline_cascades_bucket_removal() {
        let mut draft = ProjectDraft::new();
        draft.toggle_discipline(1);
        draft.toggle_document_type(1, 10);
        draft.toggle_document_type(1, 11);
        assert_eq!(draft.associations_for(1).len(), 2);

        // 取消选择 → 关联桶级联删除
        draft.toggle_discipline(1);
        assert!(!draft.is_discipline_selected(1));
        assert!(draft.associations_for(1).is_empty());
        assert!(!draft.discipline_document_types().contains_key(&1));
        assert!(draft.cascade_invariant_holds());
    }

    #[test]
    fn test_toggle_document_type_roundtrip() {
        let mut draft = ProjectDraft::new();
        draft.toggle_discipline(1);
        draft.toggle_document_type(1, 10);
        assert_eq!(draft.associations_for(1).len(), 1);
        draft.toggle_document_type(1, 10);
        assert!(draft.associations_for(1).is_empty());
    }

    #[test]
    fn test_merge_reconciliation_unions_and_updates_drs() {
        let mut draft = ProjectDraft::new();
        draft.toggle_discipline(1);
        draft.toggle_document_type(1, 10); // 裸关联，无 drs

        draft.merge_reconciliation(
            &[1, 2],
            &[
                association(1, 10, Some("DRS-001")), // 已有 → 更新 drs
                association(2, 20, None),            // 新专业新关联
            ],
        );

        assert!(draft.is_discipline_selected(2));
        assert_eq!(
            draft.associations_for(1)[0].drs.as_deref(),
            Some("DRS-001")
        );
        assert_eq!(draft.associations_for(2).len(), 1);
        assert!(draft.cascade_invariant_holds());
    }

    #[test]
    fn test_merge_reconciliation_empty_drs_does_not_clobber() {
        let mut draft = ProjectDraft::new();
        draft.merge_reconciliation(&[1], &[association(1, 10, Some("DRS-001"))]);
        draft.merge_reconciliation(&[1], &[association(1, 10, None)]);
        assert_eq!(
            draft.associations_for(1)[0].drs.as_deref(),
            Some("DRS-001")
        );

        draft.merge_reconciliation(&[1], &[association(1, 10, Some(""))]);
        assert_eq!(
            draft.associations_for(1)[0].drs.as_deref(),
            Some("DRS-001")
        );
    }

    #[test]
    fn test_merge_selection_is_idempotent() {
        let mut draft = ProjectDraft::new();
        draft.merge_document_type_selection(1, &[10, 11]);
        draft.merge_document_type_selection(1, &[11, 12]);

        assert!(draft.is_discipline_selected(1));
        let ids: Vec<EntityId> = draft
            .associations_for(1)
            .iter()
            .map(|a| a.document_type_id)
            .collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_tracker_armed_only_after_initialization() {
        let mut draft = ProjectDraft::new();
        draft.set_name("水厂扩建");
        draft.toggle_discipline(1);
        assert!(!draft.has_changes()); // 水化阶段不计脏

        draft.mark_initialized();
        assert!(!draft.has_changes());

        draft.set_name("水厂扩建"); // 空操作
        assert!(!draft.has_changes());

        draft.set_name("水厂扩建二期");
        assert!(draft.has_changes());

        draft.reset_changes();
        assert!(!draft.has_changes());
    }

    #[test]
    fn test_noop_setters_do_not_mark_dirty() {
        let mut draft = ProjectDraft::new();
        draft.set_workflow_preset(Some(5));
        draft.mark_initialized();

        draft.set_workflow_preset(Some(5));
        draft.set_status(ProjectStatus::Planning);
        draft.set_start_date(None);
        assert!(!draft.has_changes());

        draft.set_workflow_preset(None);
        assert!(draft.has_changes());
    }

    #[test]
    fn test_participants_members_no_dedup() {
        let mut draft = ProjectDraft::new();
        let member = Member {
            id: 7,
            user_id: 42,
            role: "viewer".to_string(),
        };
        draft.add_member(member.clone());
        draft.add_member(member); // 数据层不去重，由表示层把关
        assert_eq!(draft.pending_members().len(), 2);

        assert!(draft.remove_member(7));
        assert!(draft.pending_members().is_empty());
        assert!(!draft.remove_member(7));
    }
}
