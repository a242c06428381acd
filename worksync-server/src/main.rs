use worksync_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 与配置
    let _ = dotenv::dotenv();
    let config = Config::from_env();

    // 2. 设置环境 (工作目录, 日志)
    let _log_guard = setup_environment(&config)?;

    print_banner();

    tracing::info!("WorkSync server starting (env: {})", config.environment);

    // 3. 初始化服务器状态 (数据库、迁移、JWT)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    if let Err(e) = Server::new(state).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
