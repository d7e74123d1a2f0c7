//! 검색 엔진 에러 타입
//!
//! 검색 코어의 실패 모드는 두 가지뿐입니다:
//! - 초기화 전 쿼리 (호출자가 initialize를 먼저 호출해야 함)
//! - 시그니처 차원 불일치 (내부 계약 위반 - 코퍼스/스키마 버그 신호)
//!
//! 빈 쿼리, 빈 코퍼스 등은 에러가 아니라 빈 결과로 처리됩니다.

/// 검색 엔진 에러
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// 초기화 전에 쿼리가 호출됨
    #[error("retrieval engine not initialized: call initialize() first")]
    NotInitialized,

    /// 시그니처 벡터 차원 불일치 (방어용 - 정상 동작 시 도달 불가)
    #[error("signature dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}
