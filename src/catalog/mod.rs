// ==========================================
// 工程文档管理系统 - 参考数据层
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 参考目录与查找索引
// ==========================================
// 职责: 会话级参考数据快照 + 匹配用规范化索引
// ==========================================

// 模块声明
pub mod lookup;
pub mod provider;

// 重导出核心类型
pub use lookup::{doc_type_key, normalize_code, normalize_name, LookupIndex};
pub use provider::{CatalogError, ReferenceCatalog, ReferenceDataProvider};
