// ==========================================
// 工程文档管理系统 - 向导配置
// ==========================================
// 职责: 项目配置向导的可调参数
// ==========================================

use serde::{Deserialize, Serialize};

/// 向导配置
///
/// 控制提交序列与导入对照的少量可调行为；
/// 其余匹配规则为固定口径，不提供配置开关。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// 新建项目时是否预检项目代码占用
    pub preflight_code_check: bool,

    /// 表格中自由文本标注列的列名（文档登记码）
    pub metadata_column: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            preflight_code_check: true,
            metadata_column: "drs".to_string(),
        }
    }
}
