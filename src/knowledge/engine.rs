//! Retrieval Engine - 스코어링 / 랭킹 / 관계 확장 오케스트레이터
//!
//! 지식베이스 청크를 강화 코퍼스로 변환하고, 쿼리에 대해
//! 코사인 유사도 + 키워드 부스트로 랭킹하여 컨텍스트 블록을 생성합니다.
//!
//! 라이프사이클: Uninitialized -> Ready.
//! 초기화는 쓰기 락으로 직렬화되어 동시 콜드 스타트에서도 코퍼스가
//! 정확히 한 번만 빌드됩니다. 쿼리는 읽기 락만 잡으므로 병렬 실행됩니다.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::RetrievalError;
use crate::signature::{default_vectorizer, extract_keywords, Vectorizer};

use super::relations::infer_relations;
use super::similarity::cosine_similarity;
use super::{EnhancedChunk, KnowledgeChunk};

// ============================================================================
// Constants
// ============================================================================

/// 후보 풀 상한 (코퍼스 앞쪽 50개만 스코어링)
///
/// 큰 코퍼스에서 지연 시간을 제한하기 위한 정밀도/성능 트레이드오프입니다.
pub const CANDIDATE_POOL_LIMIT: usize = 50;

/// 관계 확장으로 추가되는 보조 결과 최대 개수
pub const MAX_SECONDARY_RESULTS: usize = 2;

/// 큐레이션 키워드 매칭 부스트 (쿼리 부분 문자열 기준)
const CURATED_KEYWORD_BOOST: f32 = 0.15;

/// 자동 키워드 매칭 부스트 (쿼리 추출 키워드 기준)
const AUTO_KEYWORD_BOOST: f32 = 0.05;

/// 섹션 구분자
const SECTION_DELIMITER: &str = "\n\n---\n\n";

// ============================================================================
// RetrievalEngine
// ============================================================================

/// 초기화 완료 후의 엔진 상태 (Ready)
struct EngineState {
    system_prompt: String,
    corpus: Vec<EnhancedChunk>,
    /// id -> 코퍼스 인덱스 (관계 해소용 O(1) 조회)
    by_id: HashMap<String, usize>,
}

/// 검색 엔진
///
/// 프로세스당 하나의 인스턴스를 공유하는 것을 전제로 합니다
/// (init-once 시맨틱). 초기화 후 코퍼스는 불변이며 쿼리는 순수 읽기입니다.
pub struct RetrievalEngine {
    state: RwLock<Option<EngineState>>,
    vectorizer: Box<dyn Vectorizer>,
}

impl Default for RetrievalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RetrievalEngine {
    /// 기본 벡터라이저(문자 빈도)로 엔진 생성
    pub fn new() -> Self {
        Self::with_vectorizer(default_vectorizer())
    }

    /// 벡터라이저를 지정하여 생성
    ///
    /// 실제 임베딩 모델로 교체할 때 사용하는 확장 지점입니다.
    pub fn with_vectorizer(vectorizer: Box<dyn Vectorizer>) -> Self {
        Self {
            state: RwLock::new(None),
            vectorizer,
        }
    }

    /// 엔진 초기화 (Uninitialized -> Ready)
    ///
    /// 청크마다 title + content 기반 시그니처와 자동 키워드를 계산하고,
    /// 큐레이션된 관계가 없는 청크에 대해 관계 추론을 실행합니다.
    ///
    /// - 동일 프롬프트 + 비어 있지 않은 기존 코퍼스면 no-op (멱등)
    /// - 내용이 다르면 코퍼스를 교체하고 WARN 로그
    /// - 쓰기 락으로 동시 첫 초기화를 직렬화 (정확히 1회 빌드)
    pub fn initialize(
        &self,
        chunks: Vec<KnowledgeChunk>,
        system_prompt: &str,
    ) -> Result<(), RetrievalError> {
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(state) = guard.as_ref() {
            if state.system_prompt == system_prompt && !state.corpus.is_empty() {
                tracing::debug!("Engine already initialized, skipping");
                return Ok(());
            }
            tracing::warn!(
                "Re-initializing engine with different content ({} -> {} chunks)",
                state.corpus.len(),
                chunks.len()
            );
        }

        let mut corpus: Vec<EnhancedChunk> = Vec::with_capacity(chunks.len());
        let mut by_id: HashMap<String, usize> = HashMap::with_capacity(chunks.len());

        for chunk in chunks {
            if by_id.contains_key(&chunk.id) {
                tracing::warn!("Duplicate chunk id '{}', keeping first occurrence", chunk.id);
                continue;
            }

            let text = format!("{} {}", chunk.title, chunk.content);
            let enhanced = EnhancedChunk {
                signature: self.vectorizer.vectorize(&text),
                auto_keywords: extract_keywords(&text),
                related: chunk.related_chunks.clone(),
                chunk,
            };

            by_id.insert(enhanced.id().to_string(), corpus.len());
            corpus.push(enhanced);
        }

        infer_relations(&mut corpus)?;

        tracing::info!(
            "Retrieval engine ready: {} chunks, vectorizer={}",
            corpus.len(),
            self.vectorizer.name()
        );

        *guard = Some(EngineState {
            system_prompt: system_prompt.to_string(),
            corpus,
            by_id,
        });

        Ok(())
    }

    /// Ready 상태 여부
    pub fn is_ready(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// 초기화 시 제공된 시스템 프롬프트
    pub fn system_prompt(&self) -> Result<String, RetrievalError> {
        let guard = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard
            .as_ref()
            .map(|s| s.system_prompt.clone())
            .ok_or(RetrievalError::NotInitialized)
    }

    /// 코퍼스 청크 ID 목록 (진단용)
    ///
    /// 초기화 전에는 빈 목록을 반환합니다.
    pub fn chunk_ids(&self) -> Vec<String> {
        let guard = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard
            .as_ref()
            .map(|s| s.corpus.iter().map(|c| c.id().to_string()).collect())
            .unwrap_or_default()
    }

    /// 쿼리 관련 컨텍스트 검색 (핵심 랭킹 연산)
    ///
    /// 1. 쿼리 + 대화 히스토리를 합쳐 시그니처/키워드 계산
    /// 2. 코퍼스 앞 50개 후보에 대해 코사인 유사도 + 키워드 부스트 스코어링
    /// 3. 스코어 내림차순 안정 정렬 후 상위 `max_chunks` = primary
    /// 4. primary의 관련 청크 중 primary가 아닌 것을 최대 2개 resolve = secondary
    /// 5. primary 섹션 + secondary 섹션(관련 정보 표시)을 구분자로 연결해 반환
    ///
    /// 초기화 전 호출 시에만 에러이며, 빈 쿼리/빈 코퍼스는 빈 결과로
    /// 우아하게 처리됩니다.
    pub fn relevant_context(
        &self,
        query: &str,
        conversation_history: &str,
        max_chunks: usize,
    ) -> Result<String, RetrievalError> {
        let guard = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let state = guard.as_ref().ok_or(RetrievalError::NotInitialized)?;

        // 1. 쿼리 + 히스토리 결합
        let combined = if conversation_history.trim().is_empty() {
            query.to_string()
        } else {
            format!("{}\n{}", query, conversation_history)
        };
        let combined_lower = combined.to_lowercase();
        let query_signature = self.vectorizer.vectorize(&combined);
        let query_keywords = extract_keywords(&combined);

        // 2. 후보 풀 제한 + 스코어링
        let pool = state.corpus.len().min(CANDIDATE_POOL_LIMIT);
        let mut scored: Vec<(usize, f32)> = Vec::with_capacity(pool);

        for (idx, chunk) in state.corpus[..pool].iter().enumerate() {
            let base = cosine_similarity(&query_signature, &chunk.signature)?;
            let boost = keyword_boost(chunk, &combined_lower, &query_keywords);
            scored.push((idx, base + boost));
        }

        // 3. 스코어 내림차순 안정 정렬 (동점 시 코퍼스 순서 유지)
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(max_chunks);

        let primary_ids: HashSet<&str> = scored
            .iter()
            .map(|&(idx, _)| state.corpus[idx].id())
            .collect();

        // 4. 관계 확장 (primary 순서대로, 중복 제거, 최대 2개 resolve)
        let mut seen: HashSet<&str> = HashSet::new();
        let mut secondary: Vec<usize> = Vec::new();

        'expansion: for &(idx, _) in &scored {
            for related_id in &state.corpus[idx].related {
                if primary_ids.contains(related_id.as_str()) || !seen.insert(related_id.as_str()) {
                    continue;
                }
                // 해소 실패한 ID는 조용히 건너뜀
                if let Some(&related_idx) = state.by_id.get(related_id) {
                    secondary.push(related_idx);
                    if secondary.len() >= MAX_SECONDARY_RESULTS {
                        break 'expansion;
                    }
                }
            }
        }

        // 5. 섹션 렌더링: primary 먼저, secondary는 관련 정보로 표시
        let mut sections: Vec<String> = Vec::with_capacity(scored.len() + secondary.len());

        for &(idx, score) in &scored {
            let chunk = &state.corpus[idx];
            tracing::debug!("Primary match: {} (score={:.4})", chunk.id(), score);
            sections.push(format!("## {}\n{}", chunk.chunk.title, chunk.chunk.content));
        }

        for &idx in &secondary {
            let chunk = &state.corpus[idx];
            tracing::debug!("Secondary match: {}", chunk.id());
            sections.push(format!(
                "## {} (related information)\n{}",
                chunk.chunk.title, chunk.chunk.content
            ));
        }

        Ok(sections.join(SECTION_DELIMITER))
    }
}

// ============================================================================
// Scoring Helpers
// ============================================================================

/// 키워드 부스트 계산
///
/// - 큐레이션 키워드가 쿼리의 부분 문자열이면 개당 +0.15 (대소문자 무시)
/// - 자동 키워드가 쿼리 추출 키워드 목록에 있으면 개당 +0.05
fn keyword_boost(chunk: &EnhancedChunk, query_lower: &str, query_keywords: &[String]) -> f32 {
    let curated_hits = chunk
        .chunk
        .keywords
        .iter()
        .filter(|k| query_lower.contains(&k.to_lowercase()))
        .count();

    let auto_hits = chunk
        .auto_keywords
        .iter()
        .filter(|k| query_keywords.contains(k))
        .count();

    CURATED_KEYWORD_BOOST * curated_hits as f32 + AUTO_KEYWORD_BOOST * auto_hits as f32
}

// ============================================================================
// Tests
// ============================================================================
