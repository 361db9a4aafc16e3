use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use yds_assistant::models::{storage_key, AppUser};
use yds_assistant::services::history_store::HISTORY_KEY_PREFIX;
use yds_assistant::services::{DailyChallenge, JsonHistoryStore, LlmService, LocalStorage};
use yds_assistant::utils::logging::log_startup;
use yds_assistant::{logger, AnalysisSession, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logger::init(config.verbose_logging);

    let user = config.user_email.as_deref().map(AppUser::new);
    log_startup(
        &config.llm_model_name,
        &storage_key(HISTORY_KEY_PREFIX, user.as_ref()),
    );

    let input = read_input(config.input_file.as_deref())?;

    let storage = LocalStorage::new(PathBuf::from(&config.data_dir));
    let history = Arc::new(JsonHistoryStore::open(storage, user.as_ref(), config.history_limit)?);
    let challenge = Arc::new(DailyChallenge::new());
    let session = AnalysisSession::new(
        Arc::new(LlmService::new(&config)),
        history,
        challenge.clone(),
        config.quiz_question_count,
    );

    match session.analyze(&input).await {
        Ok(results) => info!("✅ 共分析 {} 道题目", results.len()),
        Err(e) => error!("❌ 分析中止: {}", e),
    }

    if config.generate_quiz {
        if let Some(first) = session.results().snapshot().first() {
            if let Err(e) = session.generate_quiz(&first.id).await {
                warn!("⚠️ 测验生成失败: {}", e);
            }
        }
    }

    let output = serde_json::json!({
        "results": session.results().snapshot(),
        "error": session.last_error(),
        "challenge": challenge.progress(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    session.dispose();
    Ok(())
}

/// 从文件读取题目文本，没有配置文件时读取标准输入
fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("无法读取输入文件: {}", path))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("无法读取标准输入")?;
            Ok(buf)
        }
    }
}
