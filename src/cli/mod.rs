//! CLI 모듈
//!
//! chat-rag CLI 명령어 정의 및 구현.
//! 외부 채팅 핸들러 대신 엔진을 직접 구동하는 얇은 프론트엔드입니다.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{format_history, load_turns, RagConfig};
use crate::knowledge::RetrievalEngine;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "chat-rag")]
#[command(version, about = "챗 어시스턴트용 지식베이스 검색 엔진", long_about = None)]
pub struct Cli {
    /// 설정 파일 경로 (systemPrompt + knowledgeBase JSON)
    #[arg(short, long, default_value = "knowledge.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 쿼리에 대한 관련 컨텍스트 검색
    Query {
        /// 검색 쿼리
        query: String,

        /// 대화 히스토리 파일 (JSON 배열: [{role, content}])
        #[arg(long)]
        history: Option<PathBuf>,

        /// 최대 primary 청크 수
        #[arg(short, long, default_value = "3")]
        max_chunks: usize,
    },

    /// 코퍼스 청크 ID 목록 (진단용)
    Chunks,

    /// 시스템 프롬프트 출력
    Prompt,

    /// 엔진 상태 확인
    Status,
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    let config = RagConfig::load(&cli.config).await?;

    let engine = RetrievalEngine::new();
    engine
        .initialize(config.knowledge_base, &config.system_prompt)
        .context("엔진 초기화 실패")?;

    match cli.command {
        Commands::Query {
            query,
            history,
            max_chunks,
        } => cmd_query(&engine, &query, history, max_chunks).await,
        Commands::Chunks => cmd_chunks(&engine),
        Commands::Prompt => cmd_prompt(&engine),
        Commands::Status => cmd_status(&engine),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 검색 명령어 (query)
///
/// 쿼리 + (선택) 대화 히스토리로 컨텍스트 블록을 생성합니다.
async fn cmd_query(
    engine: &RetrievalEngine,
    query: &str,
    history: Option<PathBuf>,
    max_chunks: usize,
) -> Result<()> {
    let conversation_history = match history {
        Some(path) => {
            let turns = load_turns(&path).await?;
            format_history(&turns)
        }
        None => String::new(),
    };

    let context = engine
        .relevant_context(query, &conversation_history, max_chunks)
        .context("검색 실패")?;

    if context.is_empty() {
        println!("[!] 관련 컨텍스트가 없습니다.");
        return Ok(());
    }

    println!("{}", context);
    Ok(())
}

/// 청크 목록 명령어 (chunks)
fn cmd_chunks(engine: &RetrievalEngine) -> Result<()> {
    let ids = engine.chunk_ids();

    if ids.is_empty() {
        println!("[!] 코퍼스가 비어 있습니다.");
        return Ok(());
    }

    println!("[OK] 청크 {} 건:\n", ids.len());
    for id in ids {
        println!("  {}", id);
    }

    Ok(())
}

/// 프롬프트 명령어 (prompt)
fn cmd_prompt(engine: &RetrievalEngine) -> Result<()> {
    let prompt = engine.system_prompt().context("프롬프트 조회 실패")?;
    println!("{}", prompt);
    Ok(())
}

/// 상태 명령어 (status)
fn cmd_status(engine: &RetrievalEngine) -> Result<()> {
    println!("chat-rag 상태\n");
    println!("  준비 상태: {}", if engine.is_ready() { "Ready" } else { "Uninitialized" });
    println!("  청크 수:   {}", engine.chunk_ids().len());

    Ok(())
}
