//! 관계 추론 - 키워드 겹침 + 시그니처 유사도 기반
//!
//! 큐레이션된 관계가 없는 청크에 대해 코퍼스 전체를 쌍별 비교하여
//! 관련 청크를 추론합니다. O(n²)이지만 대상 규모(수십~수백 청크)에서
//! 초기화 시 1회만 실행되므로 허용됩니다.

use crate::error::RetrievalError;

use super::similarity::cosine_similarity;
use super::EnhancedChunk;

/// 관계 판정: 키워드 겹침 최소 개수
const MIN_KEYWORD_OVERLAP: usize = 2;

/// 관계 판정: 시그니처 유사도 하한 (초과 시 관련)
const SIMILARITY_THRESHOLD: f32 = 0.6;

/// 코퍼스 전체에 대해 관계 추론 실행
///
/// 큐레이션된 관계(`related`)가 비어 있는 청크에만 추론을 적용합니다.
/// 큐레이션된 데이터가 항상 우선하며 덮어쓰지 않습니다.
///
/// 판정 기준 (A ≠ B):
/// - (A의 큐레이션 ∪ 자동 키워드) ∩ (B의 큐레이션 ∪ 자동 키워드) >= 2, 또는
/// - 시그니처 코사인 유사도 > 0.6
pub fn infer_relations(corpus: &mut [EnhancedChunk]) -> Result<(), RetrievalError> {
    let keyword_sets: Vec<_> = corpus.iter().map(|c| c.all_keywords()).collect();

    let mut inferred_count = 0;

    for i in 0..corpus.len() {
        if !corpus[i].related.is_empty() {
            continue; // 큐레이션된 관계 유지
        }

        let mut related = Vec::new();

        for j in 0..corpus.len() {
            if i == j {
                continue;
            }

            let overlap = keyword_sets[i].intersection(&keyword_sets[j]).count();
            let similarity = cosine_similarity(&corpus[i].signature, &corpus[j].signature)?;

            if overlap >= MIN_KEYWORD_OVERLAP || similarity > SIMILARITY_THRESHOLD {
                related.push(corpus[j].id().to_string());
            }
        }

        if !related.is_empty() {
            tracing::debug!(
                "Inferred {} relations for chunk '{}'",
                related.len(),
                corpus[i].id()
            );
            inferred_count += 1;
        }

        corpus[i].related = related;
    }

    if inferred_count > 0 {
        tracing::info!("Relation inference complete: {} chunks enriched", inferred_count);
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeChunk;
    use crate::signature::{extract_keywords, CharFrequencyVectorizer, Vectorizer};

    fn enhanced(id: &str, title: &str, content: &str, keywords: &[&str], related: &[&str]) -> EnhancedChunk {
        let text = format!("{} {}", title, content);
        let vectorizer = CharFrequencyVectorizer;
        EnhancedChunk {
            chunk: KnowledgeChunk {
                id: id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                keywords: keywords.iter().map(|s| s.to_string()).collect(),
                related_chunks: related.iter().map(|s| s.to_string()).collect(),
            },
            signature: vectorizer.vectorize(&text),
            auto_keywords: extract_keywords(&text),
            related: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_curated_relations_preserved() {
        let mut corpus = vec![
            enhanced("a", "Billing", "invoice payment refund", &["billing"], &["b"]),
            enhanced("b", "Invoices", "invoice payment receipt", &["billing"], &[]),
        ];

        infer_relations(&mut corpus).unwrap();

        // a의 큐레이션된 관계는 추론으로 덮어쓰지 않음
        assert_eq!(corpus[0].related, vec!["b".to_string()]);
    }

    #[test]
    fn test_infers_by_keyword_overlap() {
        let mut corpus = vec![
            enhanced("a", "Billing", "invoice payment", &["billing", "invoice"], &[]),
            enhanced("b", "Refunds", "refund policy", &["billing", "invoice"], &[]),
            enhanced("c", "Login", "qqq zzz xxx", &["login"], &[]),
        ];

        infer_relations(&mut corpus).unwrap();

        // a <-> b: 키워드 2개 겹침 (billing, invoice)
        assert!(corpus[0].related.contains(&"b".to_string()));
        assert!(corpus[1].related.contains(&"a".to_string()));
    }

    #[test]
    fn test_infers_by_similarity() {
        // 키워드는 전혀 겹치지 않지만 문자 분포가 동일한 텍스트
        let mut corpus = vec![
            enhanced("a", "One", "abcdef", &["alpha"], &[]),
            enhanced("b", "One", "abcdef", &["beta"], &[]),
        ];

        infer_relations(&mut corpus).unwrap();

        // 유사도 1.0 > 0.6
        assert!(corpus[0].related.contains(&"b".to_string()));
    }

    #[test]
    fn test_no_self_relation() {
        let mut corpus = vec![
            enhanced("a", "Solo", "unique content here", &["solo"], &[]),
        ];

        infer_relations(&mut corpus).unwrap();
        assert!(corpus[0].related.is_empty());
    }

    #[test]
    fn test_unrelated_chunks_stay_unrelated() {
        let mut corpus = vec![
            enhanced("a", "Aaa", "aaaa aaaa", &["alpha"], &[]),
            enhanced("b", "Zzz", "zzzz zzzz", &["omega"], &[]),
        ];

        infer_relations(&mut corpus).unwrap();

        // 겹침 0, 유사도 0 (직교 시그니처)
        assert!(corpus[0].related.is_empty());
        assert!(corpus[1].related.is_empty());
    }
}
