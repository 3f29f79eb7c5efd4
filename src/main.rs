//! Deploy Status Dashboard - 部署状态仪表盘
//!
//! Reports whether each configured deployment environment is running the
//! latest commit on its repository's default branch.
//!
//! Usage:
//! - Normal mode: `deploy-status`
//! - With custom port: `deploy-status --port 8080`
//! - With custom systems file: `deploy-status --systems ./systems.yaml`

use deploy_status::RuntimeConfig;

/// 解析命令行参数
fn parse_args() -> RuntimeConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RuntimeConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" if i + 1 < args.len() => {
                config.port_override = args[i + 1].parse().ok();
                i += 2;
            }
            "--systems" if i + 1 < args.len() => {
                config.systems_file_override = Some(args[i + 1].clone());
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    config
}

fn print_help() {
    println!("Deploy Status Dashboard - 部署状态仪表盘");
    println!();
    println!("USAGE:");
    println!("    deploy-status [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>       Override the listening port");
    println!("    --systems <FILE>    Path to the systems YAML file");
    println!("    -h, --help          Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    deploy-status                            # Normal mode");
    println!("    deploy-status --port 8080                # Custom port");
    println!("    deploy-status --systems ./systems.yaml   # Custom catalog");
}

fn main() {
    let config = parse_args();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    rt.block_on(async {
        deploy_status::init_and_run(config).await;
    });
}
