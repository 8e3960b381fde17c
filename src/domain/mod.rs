// ==========================================
// 工程文档管理系统 - 领域层
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 数据模型
// ==========================================
// 职责: 项目草稿聚合与参考实体
// ==========================================

// 模块声明
pub mod draft;
pub mod participant;
pub mod payload;
pub mod reference;
pub mod types;

// 重导出核心类型
pub use draft::{ChangeTracker, DocTypeAssociation, ProjectDraft};
pub use participant::{Member, Participant};
pub use payload::{PayloadAssociation, ProjectPayload};
pub use reference::{ReferenceDiscipline, ReferenceDocumentType};
pub use types::{CommitMode, EntityId, ProjectStatus};
