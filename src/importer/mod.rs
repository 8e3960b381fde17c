// ==========================================
// 工程文档管理系统 - 导入层
// ==========================================
// 依据: Import_Matching_Spec_v0.2.md - 导入主流程
// ==========================================
// 职责: 上传表格 → 对照差量（专业/关联/警告）
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod column_detector;
pub mod error;
pub mod file_parser;
pub mod reconciler;
pub mod warning;

// 重导出核心类型
pub use column_detector::{
    detect_columns, ResolvedColumns, FIELD_DISCIPLINE_CODE, FIELD_DOCUMENT_TYPE_CODE,
    FIELD_DOCUMENT_TYPE_NAME,
};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawSheet, SheetFormat, UniversalFileParser};
pub use reconciler::{ReconciliationDiff, ReconciliationEngine};
pub use warning::{summarize, ImportWarning};
