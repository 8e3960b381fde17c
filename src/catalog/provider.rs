// ==========================================
// 工程文档管理系统 - 参考数据提供方
// ==========================================
// 依据: EDMS_Wizard_Spec_v0.4.md - 外部接口（参考数据服务）
// ==========================================
// 职责: 定义参考数据获取接口 + 会话级快照缓存
// 口径: 每个对话框会话拉取一次，会话内不刷新（最终一致快照）
// ==========================================

use crate::catalog::lookup::LookupIndex;
use crate::domain::reference::{ReferenceDiscipline, ReferenceDocumentType};
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// 参考数据层错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("参考数据获取失败: {0}")]
    Fetch(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// ReferenceDataProvider Trait
// ==========================================
// 用途: 参考目录来源（远端服务或测试桩）
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    /// 获取全部专业
    async fn list_disciplines(&self) -> Result<Vec<ReferenceDiscipline>, CatalogError>;

    /// 获取全部文档类型
    async fn list_document_types(&self) -> Result<Vec<ReferenceDocumentType>, CatalogError>;
}

// ==========================================
// ReferenceCatalog - 会话级参考数据快照
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    disciplines: Vec<ReferenceDiscipline>,
    document_types: Vec<ReferenceDocumentType>,
    index: LookupIndex,
}

impl ReferenceCatalog {
    /// 拉取快照并构建索引（对话框打开时调用一次，两个目录并发拉取）
    pub async fn load(provider: &dyn ReferenceDataProvider) -> Result<Self, CatalogError> {
        let (disciplines, document_types) = futures::try_join!(
            provider.list_disciplines(),
            provider.list_document_types()
        )?;
        info!(
            disciplines = disciplines.len(),
            document_types = document_types.len(),
            "参考数据快照加载完成"
        );
        Ok(Self::from_parts(disciplines, document_types))
    }

    /// 从既有数据构建（测试或离线场景）
    pub fn from_parts(
        disciplines: Vec<ReferenceDiscipline>,
        document_types: Vec<ReferenceDocumentType>,
    ) -> Self {
        let index = LookupIndex::build(&disciplines, &document_types);
        Self {
            disciplines,
            document_types,
            index,
        }
    }

    pub fn disciplines(&self) -> &[ReferenceDiscipline] {
        &self.disciplines
    }

    pub fn document_types(&self) -> &[ReferenceDocumentType] {
        &self.document_types
    }

    pub fn index(&self) -> &LookupIndex {
        &self.index
    }
}
