//! chat-rag - 챗 어시스턴트용 지식베이스 검색 엔진
//!
//! 고정 인메모리 코퍼스에서 쿼리 관련 지식 청크를 선택/랭킹하는
//! 검색 증강(RAG) 코어입니다. 문자 빈도 시그니처 + 키워드 부스트 +
//! 관계 기반 확장으로 컨텍스트 블록을 생성합니다.

pub mod cli;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod signature;

// Re-exports
pub use config::{format_history, ChatTurn, RagConfig, HISTORY_TURN_LIMIT};
pub use error::RetrievalError;
pub use knowledge::{
    cosine_similarity, infer_relations, EnhancedChunk, KnowledgeChunk, RetrievalEngine,
    CANDIDATE_POOL_LIMIT, MAX_SECONDARY_RESULTS,
};
pub use signature::{
    default_vectorizer, extract_keywords, CharFrequencyVectorizer, Vectorizer,
    MAX_KEYWORDS, SIGNATURE_DIMENSION,
};
