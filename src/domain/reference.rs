// ==========================================
// 工程文档管理系统 - 参考实体
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 参考目录
// ==========================================
// 专业与文档类型由参考数据服务提供，会话内只读。
// 注意: 文档类型的 code 不唯一，唯一键是 (code, 规范化名称)。
// ==========================================

use crate::domain::types::EntityId;
use serde::{Deserialize, Serialize};

// ==========================================
// ReferenceDiscipline - 专业
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDiscipline {
    pub id: EntityId,
    pub code: String,              // 专业代码（如 ARC/STR/ELE）
    pub name: String,              // 名称
    pub name_en: Option<String>,   // 英文名称（本地化显示用）
}

impl ReferenceDiscipline {
    /// 匹配与展示用名称：优先英文名称，缺省回退 name。
    /// 口径固定，不随界面语言变化，保证导入结果可复现。
    pub fn display_name(&self) -> &str {
        match self.name_en.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}

// ==========================================
// ReferenceDocumentType - 文档类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDocumentType {
    pub id: EntityId,
    pub code: String,              // 类型代码（如 DRG/SPC，可重复）
    pub name: String,              // 名称
    pub name_en: Option<String>,   // 英文名称（本地化显示用）
}

impl ReferenceDocumentType {
    /// 匹配与展示用名称：优先英文名称，缺省回退 name。
    pub fn display_name(&self) -> &str {
        match self.name_en.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_localized() {
        let dt = ReferenceDocumentType {
            id: 1,
            code: "DRG".to_string(),
            name: "Чертёж".to_string(),
            name_en: Some("Drawing".to_string()),
        };
        assert_eq!(dt.display_name(), "Drawing");
    }

    #[test]
    fn test_display_name_falls_back() {
        let dt = ReferenceDocumentType {
            id: 1,
            code: "DRG".to_string(),
            name: "Drawing".to_string(),
            name_en: None,
        };
        assert_eq!(dt.display_name(), "Drawing");

        let dt_empty = ReferenceDocumentType {
            name_en: Some(String::new()),
            ..dt
        };
        assert_eq!(dt_empty.display_name(), "Drawing");
    }
}
