// ==========================================
// 工程文档管理系统 - 列名识别
// ==========================================
// 依据: Import_Matching_Spec_v0.2.md - 列映射规则
// ==========================================
// 三个必需逻辑列: discipline_code / document_type_code / document_type_name
// 识别顺序: 完全匹配（忽略大小写）→ 忽略分隔符（_ 空格 -）→ 双向子串。
// 任一必需列无候选 → MissingColumns，整次导入中止。
// 标注列（drs）可选，只做精确/忽略分隔符匹配——
// 三字母 token 做子串匹配误命中率过高。
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use tracing::debug;

/// 逻辑列名（与上传模板的约定列名）
pub const FIELD_DISCIPLINE_CODE: &str = "discipline_code";
pub const FIELD_DOCUMENT_TYPE_CODE: &str = "document_type_code";
pub const FIELD_DOCUMENT_TYPE_NAME: &str = "document_type_name";

// ==========================================
// ResolvedColumns - 识别结果
// ==========================================
// 各字段保存表头原文，供逐行取值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub discipline_code: String,
    pub document_type_code: String,
    pub document_type_name: String,
    pub metadata: Option<String>,
}

/// 识别必需列与可选标注列
pub fn detect_columns(headers: &[String], metadata_column: &str) -> ImportResult<ResolvedColumns> {
    let discipline_code = find_column(FIELD_DISCIPLINE_CODE, headers);
    let document_type_code = find_column(FIELD_DOCUMENT_TYPE_CODE, headers);
    let document_type_name = find_column(FIELD_DOCUMENT_TYPE_NAME, headers);

    match (discipline_code, document_type_code, document_type_name) {
        (Some(discipline_code), Some(document_type_code), Some(document_type_name)) => {
            let resolved = ResolvedColumns {
                discipline_code,
                document_type_code,
                document_type_name,
                metadata: find_exact_column(metadata_column, headers),
            };
            debug!(?resolved, "列名识别完成");
            Ok(resolved)
        }
        (discipline_code, document_type_code, document_type_name) => {
            let mut columns = Vec::new();
            if discipline_code.is_none() {
                columns.push(FIELD_DISCIPLINE_CODE.to_string());
            }
            if document_type_code.is_none() {
                columns.push(FIELD_DOCUMENT_TYPE_CODE.to_string());
            }
            if document_type_name.is_none() {
                columns.push(FIELD_DOCUMENT_TYPE_NAME.to_string());
            }
            Err(ImportError::MissingColumns { columns })
        }
    }
}

/// 模糊列名识别：精确 → 忽略分隔符 → 双向子串
fn find_column(target: &str, headers: &[String]) -> Option<String> {
    let target_lower = target.to_lowercase();

    // 完全匹配（忽略大小写）
    if let Some(header) = headers
        .iter()
        .find(|h| h.to_lowercase() == target_lower)
    {
        return Some(header.clone());
    }

    // 忽略分隔符（_ 空格 -）
    let target_stripped = strip_separators(&target_lower);
    if let Some(header) = headers
        .iter()
        .find(|h| strip_separators(&h.to_lowercase()) == target_stripped)
    {
        return Some(header.clone());
    }

    // 双向子串
    headers
        .iter()
        .find(|h| {
            let header_lower = h.to_lowercase();
            !header_lower.is_empty()
                && (header_lower.contains(&target_lower) || target_lower.contains(&header_lower))
        })
        .cloned()
}

/// 严格列名识别：精确或忽略分隔符，不做子串
fn find_exact_column(target: &str, headers: &[String]) -> Option<String> {
    let target_lower = target.to_lowercase();
    if let Some(header) = headers
        .iter()
        .find(|h| h.to_lowercase() == target_lower)
    {
        return Some(header.clone());
    }

    let target_stripped = strip_separators(&target_lower);
    headers
        .iter()
        .find(|h| strip_separators(&h.to_lowercase()) == target_stripped)
        .cloned()
}

fn strip_separators(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .collect()
}
