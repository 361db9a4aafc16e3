/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 使用的模型名称
/// - `user`: 当前用户的存储标识
pub fn log_startup(model: &str, user: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - YDS 题目分析模式");
    info!("🤖 模型: {}", model);
    info!("👤 用户: {}", user);
    info!("{}", "=".repeat(60));
}

/// 记录分析开始信息
///
/// # 参数
/// - `unit_count`: 拆分出的题目数量（0 表示整体分析）
/// - `text_len`: 原始文本长度
pub fn log_run_start(unit_count: usize, text_len: usize) {
    if unit_count == 0 {
        info!("📄 未识别到题号，按单题整体分析 ({} 字符)", text_len);
    } else {
        info!("📋 识别到 {} 道题目，将逐题分析", unit_count);
    }
}

/// 记录单题开始信息
pub fn log_unit_start(index: usize, total: usize, text: &str) {
    info!("\n{}", "─".repeat(30));
    info!("处理第 {}/{} 道题目: {}", index, total, truncate_text(text, 80));
}

/// 打印最终统计信息
///
/// # 参数
/// - `done`: 成功分析的数量
/// - `total`: 计划分析的数量
pub fn print_final_stats(done: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 分析完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", done, total);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本，换行会被替换为空格
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > max_len {
        flat.chars().take(max_len).collect::<String>() + "..."
    } else {
        flat
    }
}
