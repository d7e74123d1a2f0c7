//! Knowledge 모듈 - 인메모리 지식베이스 검색 코어
//!
//! - 데이터 모델: KnowledgeChunk (입력) / EnhancedChunk (파생)
//! - Similarity: 시그니처 벡터 코사인 유사도
//! - Relations: 키워드 겹침 + 유사도 기반 관계 추론
//! - Engine: 스코어링 / 랭킹 / 관계 확장 오케스트레이터

mod engine;
mod relations;
mod similarity;

use serde::{Deserialize, Serialize};

// Re-exports
pub use engine::{RetrievalEngine, CANDIDATE_POOL_LIMIT, MAX_SECONDARY_RESULTS};
pub use relations::infer_relations;
pub use similarity::cosine_similarity;

// ============================================================================
// Types
// ============================================================================

/// 지식베이스 청크 (입력용, 정적)
///
/// 설정 소스에서 한 번 제공되며 이후 불변입니다.
/// wire shape: `{ id, title, content, keywords, relatedChunks? }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeChunk {
    /// 고유 식별자
    pub id: String,
    /// 제목
    pub title: String,
    /// 본문 텍스트
    pub content: String,
    /// 수동 큐레이션된 키워드
    #[serde(default)]
    pub keywords: Vec<String>,
    /// 관련 청크 ID (선택 - 비어 있으면 초기화 시 추론)
    #[serde(default)]
    pub related_chunks: Vec<String>,
}

/// 강화된 청크 (파생)
///
/// KnowledgeChunk에 시그니처 벡터와 자동 추출 키워드를 더한 형태입니다.
/// `related`는 큐레이션된 관계가 있으면 그대로, 없으면 추론된 관계입니다.
#[derive(Debug, Clone)]
pub struct EnhancedChunk {
    /// 원본 청크
    pub chunk: KnowledgeChunk,
    /// 문자 빈도 시그니처 (title + content 기반, 26차원)
    pub signature: Vec<f32>,
    /// 자동 추출 키워드 (빈도 기준 상위 10개)
    pub auto_keywords: Vec<String>,
    /// 해소된 관련 청크 ID (큐레이션 우선, 없으면 추론)
    pub related: Vec<String>,
}

impl EnhancedChunk {
    /// 청크 ID
    pub fn id(&self) -> &str {
        &self.chunk.id
    }

    /// 큐레이션 + 자동 키워드 합집합 (소문자)
    ///
    /// 관계 추론에서 겹침 계산에 사용됩니다.
    pub fn all_keywords(&self) -> std::collections::HashSet<String> {
        self.chunk
            .keywords
            .iter()
            .chain(self.auto_keywords.iter())
            .map(|k| k.to_lowercase())
            .collect()
    }
}
