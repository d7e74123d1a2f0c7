//! 코사인 유사도 계산
//!
//! 시그니처 벡터 간 유사도를 계산합니다.
//! ref: https://en.wikipedia.org/wiki/Cosine_similarity

use crate::error::RetrievalError;

/// 코사인 유사도 계산
///
/// 두 벡터 간의 코사인 유사도를 반환합니다. 수학적 범위는 -1.0 ~ 1.0이며,
/// 음수 성분이 없는 시그니처에서는 실질적으로 0.0 ~ 1.0입니다.
///
/// - 차원이 다르면 `DimensionMismatch` 에러 (내부 계약상 도달 불가 - 방어용)
/// - 한쪽 norm이 0이면 (문자 없는 텍스트) 0.0으로 정의 (NaN 전파 방지)
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, RetrievalError> {
    if a.len() != b.len() {
        return Err(RetrievalError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (norm_a * norm_b))
}

// ============================================================================
// Tests
// ============================================================================
