pub fn log_init() {
    use std::io::Write;
    // env_logger 通过环境变量 RUST_LOG 控制日志输出, 默认 info
    // 日志写到 stderr, stdout 留给命令输出
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .try_init();
}
