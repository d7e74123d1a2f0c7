//! 시그니처 모듈 - 텍스트 특징 추출
//!
//! 텍스트를 고정 길이 숫자 시그니처와 키워드 목록으로 변환합니다.
//!
//! 시그니처는 a-z 문자 빈도 기반의 26차원 벡터입니다. 시맨틱 임베딩이
//! 아닌 의도적으로 단순한 bag-of-characters 방식이며, Vectorizer
//! 트레이트를 통해 실제 임베딩 모델로 교체할 수 있습니다.

use std::collections::HashMap;

// ============================================================================
// Constants
// ============================================================================

/// 시그니처 벡터 차원 (a-z 문자당 1차원)
pub const SIGNATURE_DIMENSION: usize = 26;

/// 키워드 추출 최대 개수
pub const MAX_KEYWORDS: usize = 10;

/// 키워드 최소 길이 (이보다 짧은 토큰은 제외)
const MIN_TOKEN_LEN: usize = 3;

/// 영어 불용어 목록
///
/// 빈도 기반 키워드 추출에서 제외되는 일반 단어들입니다.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had",
    "her", "was", "one", "our", "out", "has", "have", "been", "being", "this",
    "that", "these", "those", "with", "from", "they", "them", "their", "what",
    "which", "when", "where", "who", "why", "how", "will", "would", "could",
    "should", "may", "might", "must", "shall", "into", "through", "during",
    "before", "after", "above", "below", "over", "under", "again", "then",
    "once", "here", "there", "about", "your", "yours", "him", "his", "she",
    "its", "were", "does", "did", "doing", "each", "few", "more", "most",
    "other", "some", "such", "only", "own", "same", "than", "too", "very",
    "just", "because", "while", "any", "both",
];

// ============================================================================
// Vectorizer Trait
// ============================================================================

/// 텍스트 벡터화 트레이트
///
/// 텍스트를 고정 길이 시그니처 벡터로 변환하는 인터페이스입니다.
/// 기본 구현은 문자 빈도 기반이지만, 이 트레이트를 구현하면 실제
/// 임베딩 모델로 교체할 수 있습니다.
pub trait Vectorizer: Send + Sync {
    /// 텍스트를 시그니처 벡터로 변환
    fn vectorize(&self, text: &str) -> Vec<f32>;

    /// 시그니처 차원 수
    fn dimension(&self) -> usize;

    /// 벡터라이저 이름
    fn name(&self) -> &'static str;
}

// ============================================================================
// CharFrequencyVectorizer
// ============================================================================

/// 문자 빈도 벡터라이저
///
/// 소문자 변환 후 a-z 각 문자의 출현 횟수를 세고 L1 정규화합니다.
/// 문자가 하나도 없으면 영벡터를 반환합니다 (NaN 방지).
#[derive(Debug, Clone, Default)]
pub struct CharFrequencyVectorizer;

impl Vectorizer for CharFrequencyVectorizer {
    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut counts = [0u32; SIGNATURE_DIMENSION];
        let mut total = 0u32;

        for ch in text.to_lowercase().chars() {
            if ch.is_ascii_lowercase() {
                counts[(ch as u8 - b'a') as usize] += 1;
                total += 1;
            }
        }

        if total == 0 {
            return vec![0.0; SIGNATURE_DIMENSION];
        }

        counts
            .iter()
            .map(|&c| c as f32 / total as f32)
            .collect()
    }

    fn dimension(&self) -> usize {
        SIGNATURE_DIMENSION
    }

    fn name(&self) -> &'static str {
        "char-frequency-26"
    }
}

/// 기본 벡터라이저 생성
pub fn default_vectorizer() -> Box<dyn Vectorizer> {
    Box::new(CharFrequencyVectorizer)
}

// ============================================================================
// Keyword Extraction
// ============================================================================

/// 키워드 추출
///
/// 소문자 변환 -> 구두점 제거 -> 공백 분리 후, 길이 2 이하이거나
/// 불용어인 토큰을 제외하고 빈도 기준 상위 10개를 반환합니다.
/// 빈도가 같으면 먼저 등장한 토큰이 우선합니다 (안정 정렬).
pub fn extract_keywords(text: &str) -> Vec<String> {
    // (토큰, 빈도) - 첫 등장 순서 유지
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for raw in text.to_lowercase().split_whitespace() {
        let token: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();

        if token.len() < MIN_TOKEN_LEN || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }

        match index.get(&token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // 빈도 내림차순 안정 정렬
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(MAX_KEYWORDS);

    counts.into_iter().map(|(token, _)| token).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_sums_to_one() {
        let v = CharFrequencyVectorizer;
        let sig = v.vectorize("Hello, World!");
        let sum: f32 = sig.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_signature_no_letters_is_zero() {
        let v = CharFrequencyVectorizer;
        let sig = v.vectorize("1234 !@#$ 5678");
        assert_eq!(sig.len(), SIGNATURE_DIMENSION);
        assert!(sig.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_signature_empty_is_zero() {
        let v = CharFrequencyVectorizer;
        let sig = v.vectorize("");
        assert!(sig.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_signature_dimension() {
        let v = CharFrequencyVectorizer;
        assert_eq!(v.dimension(), 26);
        assert_eq!(v.vectorize("abc").len(), 26);
    }

    #[test]
    fn test_signature_counts_letters() {
        let v = CharFrequencyVectorizer;
        let sig = v.vectorize("aab");
        // a: 2/3, b: 1/3
        assert!((sig[0] - 2.0 / 3.0).abs() < 1e-6);
        assert!((sig[1] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(sig[2], 0.0);
    }

    #[test]
    fn test_extract_keywords_basic() {
        let keywords = extract_keywords("invoice payment invoice refund");
        assert_eq!(keywords[0], "invoice"); // 빈도 2
        assert!(keywords.contains(&"payment".to_string()));
        assert!(keywords.contains(&"refund".to_string()));
    }

    #[test]
    fn test_extract_keywords_drops_stop_words() {
        let keywords = extract_keywords("the quick and the lazy dog");
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"and".to_string()));
        assert!(keywords.contains(&"quick".to_string()));
        assert!(keywords.contains(&"lazy".to_string()));
    }

    #[test]
    fn test_extract_keywords_drops_short_tokens() {
        let keywords = extract_keywords("go to db ok yes");
        assert!(!keywords.contains(&"go".to_string()));
        assert!(!keywords.contains(&"db".to_string()));
        assert!(keywords.contains(&"yes".to_string()));
    }

    #[test]
    fn test_extract_keywords_max_ten() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel \
                    india juliet kilo lima mike november";
        let keywords = extract_keywords(text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_extract_keywords_tie_breaks_by_first_seen() {
        // 동일 빈도면 먼저 등장한 토큰 우선
        let keywords = extract_keywords("zebra apple zebra apple mango");
        assert_eq!(keywords[0], "zebra");
        assert_eq!(keywords[1], "apple");
        assert_eq!(keywords[2], "mango");
    }

    #[test]
    fn test_extract_keywords_deterministic() {
        let text = "password reset account password login security";
        let a = extract_keywords(text);
        let b = extract_keywords(text);
        assert_eq!(a, b);
    }

    #[test]
    fn test_extract_keywords_strips_punctuation() {
        let keywords = extract_keywords("refund? invoice! (billing)");
        assert!(keywords.contains(&"refund".to_string()));
        assert!(keywords.contains(&"invoice".to_string()));
        assert!(keywords.contains(&"billing".to_string()));
    }

    #[test]
    fn test_extract_keywords_empty() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }
}
