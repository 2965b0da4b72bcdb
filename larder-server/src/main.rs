use larder_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env (不存在时忽略)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 设置环境 (工作目录, 日志)
    setup_environment(&config)?;

    // 打印横幅
    print_banner();

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "Larder server starting..."
    );

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
