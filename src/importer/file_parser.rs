// ==========================================
// 工程文档管理系统 - 文件解析器实现
// ==========================================
// 依据: Import_Matching_Spec_v0.2.md - 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx) / CSV (.csv)，路径或上传字节流
// ==========================================
// 口径: 只取第一个工作表；首行为表头（纯文本单元格）；
//       全空白行在解析阶段丢弃。
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;

// ==========================================
// RawSheet - 解析结果
// ==========================================
// headers 保留表头原文与列序（列名识别需要完整列清单）
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

/// 表格容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        let file = File::open(file_path)?;
        self.parse_reader(file)
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet> {
        self.parse_reader(Cursor::new(bytes))
    }

    fn parse_reader<R: std::io::Read>(&self, reader: R) -> ImportResult<RawSheet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptySheet);
        }

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(RawSheet { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse_path(&self, file_path: &Path) -> ImportResult<RawSheet> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;
        self.parse_workbook(workbook)
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet> {
        let workbook = Xlsx::new(Cursor::new(bytes.to_vec()))
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;
        self.parse_workbook(workbook)
    }

    fn parse_workbook<RS: std::io::Read + std::io::Seek>(
        &self,
        mut workbook: Xlsx<RS>,
    ) -> ImportResult<RawSheet> {
        // 只读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut range_rows = range.rows();
        let header_row = range_rows.next().ok_or(ImportError::EmptySheet)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in range_rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    let value = cell.to_string().trim().to_string();
                    row_map.insert(header.clone(), value);
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(RawSheet { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（按扩展名/格式自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse_path<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawSheet> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_path(path),
            "xlsx" => ExcelParser.parse_path(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    pub fn parse_bytes(&self, bytes: &[u8], format: SheetFormat) -> ImportResult<RawSheet> {
        match format {
            SheetFormat::Csv => CsvParser.parse_bytes(bytes),
            SheetFormat::Xlsx => ExcelParser.parse_bytes(bytes),
        }
    }
}
