// ==========================================
// 工程文档管理系统 - 查找索引构建
// ==========================================
// 依据: Import_Matching_Spec_v0.2.md - 规范化与匹配键
// ==========================================
// 职责: 参考目录 → 规范化查找表，保证逐行匹配 O(1)
// 匹配键口径:
//   专业: code 规范化（TRIM + UPPER）
//   文档类型: "CODE__name"，name 规范化（TRIM + 压缩空白 + 小写），
//             名称取英文名称优先（display_name 口径）
// ==========================================

use crate::domain::reference::{ReferenceDiscipline, ReferenceDocumentType};
use std::collections::HashMap;
use tracing::debug;

/// 规范化代码：TRIM + 大写
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// 规范化名称：TRIM + 空白串（含换行）压缩为单个空格 + 小写
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// 文档类型复合匹配键
pub fn doc_type_key(code: &str, name: &str) -> String {
    format!("{}__{}", normalize_code(code), normalize_name(name))
}

// ==========================================
// LookupIndex - 参考目录查找索引
// ==========================================
// 键冲突口径: 同键后出现者覆盖先出现者（last-write-wins）。
// 这是参考数据质量问题的既定处理方式，索引层不做纠正。
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    discipline_by_code: HashMap<String, ReferenceDiscipline>,
    doc_type_by_code_name: HashMap<String, ReferenceDocumentType>,
    doc_type_names_by_code: HashMap<String, Vec<String>>, // 同 code 的参考名称（输入顺序）
}

impl LookupIndex {
    /// 从参考目录构建索引
    pub fn build(
        disciplines: &[ReferenceDiscipline],
        document_types: &[ReferenceDocumentType],
    ) -> Self {
        let mut discipline_by_code = HashMap::new();
        for discipline in disciplines {
            let key = normalize_code(&discipline.code);
            if let Some(prev) = discipline_by_code.insert(key.clone(), discipline.clone()) {
                debug!(code = %key, prev_id = prev.id, id = discipline.id, "专业代码重复，后者覆盖前者");
            }
        }

        let mut doc_type_by_code_name = HashMap::new();
        let mut doc_type_names_by_code: HashMap<String, Vec<String>> = HashMap::new();
        for doc_type in document_types {
            let key = doc_type_key(&doc_type.code, doc_type.display_name());
            if let Some(prev) = doc_type_by_code_name.insert(key.clone(), doc_type.clone()) {
                debug!(key = %key, prev_id = prev.id, id = doc_type.id, "文档类型匹配键重复，后者覆盖前者");
            }
            doc_type_names_by_code
                .entry(normalize_code(&doc_type.code))
                .or_default()
                .push(doc_type.display_name().to_string());
        }

        Self {
            discipline_by_code,
            doc_type_by_code_name,
            doc_type_names_by_code,
        }
    }

    /// 按原始代码查专业（内部规范化）
    pub fn discipline_by_code(&self, raw_code: &str) -> Option<&ReferenceDiscipline> {
        self.discipline_by_code.get(&normalize_code(raw_code))
    }

    /// 按原始 (code, name) 查文档类型（内部规范化）
    pub fn doc_type_by_code_and_name(
        &self,
        raw_code: &str,
        raw_name: &str,
    ) -> Option<&ReferenceDocumentType> {
        self.doc_type_by_code_name
            .get(&doc_type_key(raw_code, raw_name))
    }

    /// 共享该 code 的所有参考名称；code 完全未知时返回 None
    pub fn candidate_names_for_code(&self, raw_code: &str) -> Option<&[String]> {
        self.doc_type_names_by_code
            .get(&normalize_code(raw_code))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discipline(id: i64, code: &str, name: &str) -> ReferenceDiscipline {
        ReferenceDiscipline {
            id,
            code: code.to_string(),
            name: name.to_string(),
            name_en: None,
        }
    }

    fn doc_type(id: i64, code: &str, name: &str, name_en: Option<&str>) -> ReferenceDocumentType {
        ReferenceDocumentType {
            id,
            code: code.to_string(),
            name: name.to_string(),
            name_en: name_en.map(str::to_string),
        }
    }

    #[test]
    fn test_normalize_name_collapses_whitespace() {
        assert_eq!(normalize_name("  General \n Arrangement\t Drawing "), "general arrangement drawing");
        assert_eq!(normalize_name("Drawing"), "drawing");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  arc "), "ARC");
    }

    #[test]
    fn test_discipline_lookup_is_code_insensitive() {
        let index = LookupIndex::build(&[discipline(1, "ARC", "Architecture")], &[]);
        assert_eq!(index.discipline_by_code(" arc ").unwrap().id, 1);
        assert!(index.discipline_by_code("STR").is_none());
    }

    #[test]
    fn test_doc_type_key_prefers_localized_name() {
        let index = LookupIndex::build(
            &[],
            &[doc_type(1, "DRG", "Чертёж", Some("Drawing"))],
        );
        // 匹配键按英文名称建立，不受界面语言影响
        assert_eq!(index.doc_type_by_code_and_name("DRG", "drawing ").unwrap().id, 1);
        assert!(index.doc_type_by_code_and_name("DRG", "Чертёж").is_none());
    }

    #[test]
    fn test_last_write_wins_on_key_collision() {
        let index = LookupIndex::build(
            &[discipline(1, "ARC", "first"), discipline(2, "arc", "second")],
            &[
                doc_type(10, "DRG", "Drawing", None),
                doc_type(11, "DRG", "drawing", None),
            ],
        );
        assert_eq!(index.discipline_by_code("ARC").unwrap().id, 2);
        assert_eq!(index.doc_type_by_code_and_name("DRG", "Drawing").unwrap().id, 11);
    }

    #[test]
    fn test_candidate_names_track_all_types_sharing_code() {
        let index = LookupIndex::build(
            &[],
            &[
                doc_type(10, "DRG", "Drawing", None),
                doc_type(11, "DRG", "Detail Drawing", None),
            ],
        );
        let names = index.candidate_names_for_code("drg ").unwrap();
        assert_eq!(names, ["Drawing", "Detail Drawing"]);
        assert!(index.candidate_names_for_code("SPC").is_none());
    }
}
