// ==========================================
// 工程文档管理系统 - 表格对照引擎
// ==========================================
// 依据: Import_Matching_Spec_v0.2.md - 两键匹配与差量输出
// ==========================================
// 流程: 列名识别 → 逐行规范化 → 去重 → 专业匹配 → 类型两键匹配
//       → 差量累积（专业并集 + 关联插入/drs 更新）+ 警告分类
// 口径: 行序按文件顺序处理；输出按首次出现顺序，不重排。
//       同一代码的警告去重。软失配跳行不中止；结构性失败整体中止。
// ==========================================

use crate::catalog::lookup::{normalize_code, LookupIndex};
use crate::domain::draft::{DocTypeAssociation, ProjectDraft};
use crate::domain::types::EntityId;
use crate::importer::column_detector::detect_columns;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{RawSheet, SheetFormat, UniversalFileParser};
use crate::importer::warning::ImportWarning;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// ReconciliationDiff - 对照差量
// ==========================================
// disciplines_to_add / associations_to_add 均为首次出现顺序
#[derive(Debug, Clone, Default)]
pub struct ReconciliationDiff {
    pub disciplines_to_add: Vec<EntityId>,
    pub associations_to_add: Vec<DocTypeAssociation>,
    pub warnings: Vec<ImportWarning>,
}

impl ReconciliationDiff {
    pub fn is_empty(&self) -> bool {
        self.disciplines_to_add.is_empty() && self.associations_to_add.is_empty()
    }

    /// 并入草稿聚合
    pub fn apply_to(&self, draft: &mut ProjectDraft) {
        draft.merge_reconciliation(&self.disciplines_to_add, &self.associations_to_add);
    }
}

// ==========================================
// ReconciliationEngine - 对照引擎
// ==========================================
pub struct ReconciliationEngine<'a> {
    index: &'a LookupIndex,
    metadata_column: String,
}

impl<'a> ReconciliationEngine<'a> {
    pub fn new(index: &'a LookupIndex) -> Self {
        Self {
            index,
            metadata_column: "drs".to_string(),
        }
    }

    pub fn with_metadata_column(index: &'a LookupIndex, metadata_column: impl Into<String>) -> Self {
        Self {
            index,
            metadata_column: metadata_column.into(),
        }
    }

    /// 对照上传的原始字节（单工作表，首个 sheet）
    pub fn reconcile_bytes(
        &self,
        bytes: &[u8],
        format: SheetFormat,
    ) -> ImportResult<ReconciliationDiff> {
        let sheet = UniversalFileParser.parse_bytes(bytes, format)?;
        self.reconcile(&sheet)
    }

    /// 对照已解析的表格
    #[instrument(skip(self, sheet), fields(rows = sheet.rows.len()))]
    pub fn reconcile(&self, sheet: &RawSheet) -> ImportResult<ReconciliationDiff> {
        // 列名识别：必需列缺失则整体失败，不做部分处理
        let columns = detect_columns(&sheet.headers, &self.metadata_column)?;

        let mut diff = ReconciliationDiff::default();
        let mut processed_rows: HashSet<String> = HashSet::new();
        let mut warned_disciplines: HashSet<String> = HashSet::new();
        let mut warned_types: HashSet<String> = HashSet::new();
        let mut warned_mismatches: HashSet<(String, String)> = HashSet::new();
        let mut matched = 0usize;

        for row in &sheet.rows {
            let d_code_raw = cell(row, &columns.discipline_code);
            let t_code_raw = cell(row, &columns.document_type_code);
            let t_name_raw = cell(row, &columns.document_type_name);

            // 三个来源单元格都缺失 → 分隔空行，静默跳过
            if d_code_raw.is_none() && t_code_raw.is_none() && t_name_raw.is_none() {
                continue;
            }

            let d_code = normalize_code(d_code_raw.unwrap_or_default());
            let t_code = normalize_code(t_code_raw.unwrap_or_default());
            let t_name = t_name_raw.unwrap_or_default().trim().to_string();
            let drs = columns
                .metadata
                .as_deref()
                .and_then(|col| cell(row, col))
                .map(|v| v.trim().to_string())
                .unwrap_or_default();

            // 规范化后任一为空 → 跳过
            if d_code.is_empty() || t_code.is_empty() || t_name.is_empty() {
                continue;
            }

            // 行级去重：同一 (专业代码, 类型代码, 名称, drs) 组合只处理一次
            let row_key = format!("{}__{}__{}__{}", d_code, t_code, t_name.to_lowercase(), drs);
            if !processed_rows.insert(row_key) {
                continue;
            }

            // 专业匹配
            let discipline = match self.index.discipline_by_code(&d_code) {
                Some(d) => d,
                None => {
                    if warned_disciplines.insert(d_code.clone()) {
                        diff.warnings
                            .push(ImportWarning::MissingDiscipline { code: d_code });
                    }
                    continue;
                }
            };

            // 文档类型两键匹配 (code, 规范化名称)
            let document_type = match self.index.doc_type_by_code_and_name(&t_code, &t_name) {
                Some(dt) => dt,
                None => {
                    // 硬性未匹配：按是否有同 code 的参考类型细分
                    match self.index.candidate_names_for_code(&t_code) {
                        None => {
                            if warned_types.insert(t_code.clone()) {
                                diff.warnings
                                    .push(ImportWarning::MissingDocumentType { code: t_code });
                            }
                        }
                        Some(candidates) => {
                            let key = (t_code.clone(), t_name.clone());
                            if warned_mismatches.insert(key) {
                                diff.warnings.push(ImportWarning::NameMismatch {
                                    code: t_code,
                                    sheet_name: t_name,
                                    candidate_names: candidates.to_vec(),
                                });
                            }
                        }
                    }
                    continue;
                }
            };

            // 完全匹配 → 并入差量
            matched += 1;
            if !diff.disciplines_to_add.contains(&discipline.id) {
                diff.disciplines_to_add.push(discipline.id);
            }
            upsert_association(
                &mut diff.associations_to_add,
                discipline.id,
                document_type.id,
                &drs,
            );
        }

        info!(
            matched,
            disciplines = diff.disciplines_to_add.len(),
            associations = diff.associations_to_add.len(),
            warnings = diff.warnings.len(),
            "表格对照完成"
        );
        debug!(warnings = ?diff.warnings, "对照警告明细");

        Ok(diff)
    }
}

/// 单元格取值：缺列或空串视为缺失
fn cell<'r>(row: &'r HashMap<String, String>, column: &str) -> Option<&'r str> {
    row.get(column).map(String::as_str).filter(|v| !v.is_empty())
}

/// 关联插入或 drs 更新（同键保留一条，新 drs 非空才覆盖）
fn upsert_association(
    associations: &mut Vec<DocTypeAssociation>,
    discipline_id: EntityId,
    document_type_id: EntityId,
    drs: &str,
) {
    let incoming_drs = (!drs.is_empty()).then(|| drs.to_string());
    match associations
        .iter_mut()
        .find(|a| a.discipline_id == discipline_id && a.document_type_id == document_type_id)
    {
        Some(existing) => {
            if incoming_drs.is_some() {
                existing.drs = incoming_drs;
            }
        }
        None => associations.push(DocTypeAssociation {
            discipline_id,
            document_type_id,
            drs: incoming_drs,
        }),
    }
}
