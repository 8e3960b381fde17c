// ==========================================
// 工程文档管理系统 - 导入警告分类
// ==========================================
// 依据: Import_Matching_Spec_v0.2.md - 逐行软失配
// ==========================================
// 警告是分类值而非自由文本，只在边界处渲染为本地化文本。
// 软失配不中止导入；匹配成功的行照常进入草稿。
// ==========================================

use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};

// ==========================================
// ImportWarning - 逐行软失配
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportWarning {
    /// 表格中的专业代码在参考目录中不存在
    MissingDiscipline { code: String },

    /// 表格中的文档类型代码在参考目录中完全不存在
    MissingDocumentType { code: String },

    /// 代码存在但名称与参考名称均不符（硬性未匹配，不进歧义队列）
    NameMismatch {
        code: String,
        sheet_name: String,
        candidate_names: Vec<String>,
    },
}

impl ImportWarning {
    /// 渲染为本地化文本（仅限边界层调用）
    pub fn render(&self) -> String {
        match self {
            ImportWarning::MissingDiscipline { code } => {
                t_with_args("import.warning.missing_discipline", &[("code", code)])
            }
            ImportWarning::MissingDocumentType { code } => {
                t_with_args("import.warning.missing_document_type", &[("code", code)])
            }
            ImportWarning::NameMismatch {
                code,
                sheet_name,
                candidate_names,
            } => t_with_args(
                "import.warning.name_mismatch",
                &[
                    ("code", code),
                    ("name", sheet_name),
                    ("candidates", &candidate_names.join(", ")),
                ],
            ),
        }
    }
}

/// 按类别汇总为展示行（未命中专业一行、未命中类型一行、名称不符一行）
pub fn summarize(warnings: &[ImportWarning]) -> Vec<String> {
    let mut missing_disciplines = Vec::new();
    let mut missing_types = Vec::new();
    let mut mismatches = Vec::new();

    for warning in warnings {
        match warning {
            ImportWarning::MissingDiscipline { code } => missing_disciplines.push(code.clone()),
            ImportWarning::MissingDocumentType { code } => missing_types.push(code.clone()),
            ImportWarning::NameMismatch {
                code,
                sheet_name,
                candidate_names,
            } => mismatches.push(format!(
                "{} ({}) → {}",
                code,
                sheet_name,
                candidate_names.join(", ")
            )),
        }
    }

    let mut lines = Vec::new();
    if !missing_disciplines.is_empty() {
        lines.push(t_with_args(
            "import.summary.missing_disciplines",
            &[("codes", &missing_disciplines.join(", "))],
        ));
    }
    if !missing_types.is_empty() {
        lines.push(t_with_args(
            "import.summary.missing_document_types",
            &[("codes", &missing_types.join(", "))],
        ));
    }
    if !mismatches.is_empty() {
        lines.push(t_with_args(
            "import.summary.name_mismatches",
            &[("items", &mismatches.join("; "))],
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_codes() {
        // 断言与语言无关的部分，避免与 locale 全局状态互相干扰
        let warning = ImportWarning::NameMismatch {
            code: "DRG".to_string(),
            sheet_name: "Schedule".to_string(),
            candidate_names: vec!["Drawing".to_string(), "Detail Drawing".to_string()],
        };
        let text = warning.render();
        assert!(text.contains("DRG"));
        assert!(text.contains("Schedule"));
        assert!(text.contains("Drawing, Detail Drawing"));
    }

    #[test]
    fn test_summarize_groups_by_category() {
        let warnings = vec![
            ImportWarning::MissingDiscipline {
                code: "XXX".to_string(),
            },
            ImportWarning::MissingDiscipline {
                code: "YYY".to_string(),
            },
            ImportWarning::MissingDocumentType {
                code: "ZZZ".to_string(),
            },
        ];
        let lines = summarize(&warnings);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("XXX, YYY"));
        assert!(lines[1].contains("ZZZ"));
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }
}
