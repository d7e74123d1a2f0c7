//! 설정 모듈 - 시스템 프롬프트 + 지식베이스 로딩
//!
//! 외부 채팅 핸들러가 제공하는 설정 소스를 JSON 파일로 읽습니다.
//! wire shape: `{ "systemPrompt": "...", "knowledgeBase": [...] }`
//!
//! 대화 히스토리 포맷팅 유틸리티도 여기에 있습니다
//! (최근 6턴을 `role: content` 줄로 축약 - 호출자 측 계약).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeChunk;

// ============================================================================
// Constants
// ============================================================================

/// 히스토리 포맷팅에 포함되는 최근 턴 수
pub const HISTORY_TURN_LIMIT: usize = 6;

// ============================================================================
// Types
// ============================================================================

/// RAG 설정 (설정 소스 wire shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagConfig {
    /// 시스템 프롬프트
    pub system_prompt: String,
    /// 지식베이스 청크 목록
    #[serde(default)]
    pub knowledge_base: Vec<KnowledgeChunk>,
}

/// 대화 턴 (role + content)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// 역할 (user / assistant)
    pub role: String,
    /// 내용
    pub content: String,
}

// ============================================================================
// Loading
// ============================================================================

impl RagConfig {
    /// JSON 파일에서 설정 로드
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(
            "Loaded config: {} knowledge chunks",
            config.knowledge_base.len()
        );

        Ok(config)
    }
}

/// 대화 턴 파일 로드 (JSON 배열)
pub async fn load_turns(path: &Path) -> Result<Vec<ChatTurn>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse history file: {}", path.display()))
}

// ============================================================================
// History Formatting
// ============================================================================

/// 대화 히스토리 포맷팅
///
/// 최근 6턴만 남기고 `role: content` 줄로 변환하여 개행으로 연결합니다.
/// 검색 엔진에 전달되는 conversationHistory 인자의 표준 형태입니다.
pub fn format_history(turns: &[ChatTurn]) -> String {
    let start = turns.len().saturating_sub(HISTORY_TURN_LIMIT);

    turns[start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================
