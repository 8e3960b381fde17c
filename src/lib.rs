// ==========================================
// 工程文档管理系统 - 项目配置向导核心库
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 项目配置流程
// 技术栈: Rust + calamine/csv + tokio
// 系统定位: 项目配置草稿聚合 + 表格对照引擎 (提交前人工最终确认)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 参考数据层 - 专业/文档类型目录与查找索引
pub mod catalog;

// 导入层 - 表格解析与对照
pub mod importer;

// 引擎层 - 歧义处理与提交序列
pub mod engine;

// 配置层 - 向导配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CommitMode, EntityId, ProjectStatus};

// 领域实体
pub use domain::{
    DocTypeAssociation, Member, Participant, ProjectDraft, ProjectPayload, ReferenceDiscipline,
    ReferenceDocumentType,
};

// 参考数据
pub use catalog::{LookupIndex, ReferenceCatalog, ReferenceDataProvider};

// 导入层
pub use importer::{
    ImportError, ImportResult, ImportWarning, RawSheet, ReconciliationDiff, ReconciliationEngine,
    SheetFormat,
};

// 引擎层
pub use engine::{
    AmbiguityResolutionFlow, AmbiguousPair, ChoicePresenter, CommitOutcome, CommitSequencer,
    DocumentTypeSearch, ProjectBackend,
};

// 配置
pub use config::WizardConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工程文档管理系统 - 项目配置向导";
