//! 启动配置：命令行参数与环境变量（clap）

use std::path::PathBuf;

use clap::Parser;

/// 默认激活的主题
pub const DEFAULT_START_TOPIC: &str = "republiques-valeurs";

/// Livret Citoyen - 法语/中文对照的公民入籍学习手册
#[derive(Parser, Debug, Clone)]
#[command(name = "livret_citoyen")]
#[command(about = "Bilingual French/Chinese civic reference browser")]
pub struct Args {
    /// 主题数据集（JSON 数组）；缺省使用内置数据集
    #[arg(long, env = "LIVRET_DATASET")]
    pub dataset: Option<PathBuf>,

    /// 启动时激活并展开的主题 id
    #[arg(long, env = "LIVRET_START_TOPIC", default_value = DEFAULT_START_TOPIC)]
    pub start_topic: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LIVRET_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn max_level(&self) -> Result<tracing::Level, String> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| format!("无效的日志级别: {}", self.log_level))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.start_topic.trim().is_empty() {
            return Err("启动主题 id 不能为空".to_string());
        }
        self.max_level()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // env 回退会覆盖默认值，先清掉
        for var in ["LIVRET_DATASET", "LIVRET_START_TOPIC", "LIVRET_LOG_LEVEL"] {
            std::env::remove_var(var);
        }
        let args = Args::try_parse_from(["livret_citoyen"]).unwrap();
        assert_eq!(args.dataset, None);
        assert_eq!(args.start_topic, DEFAULT_START_TOPIC);
        assert_eq!(args.max_level(), Ok(tracing::Level::INFO));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_explicit_arguments() {
        let args = Args::try_parse_from([
            "livret_citoyen",
            "--dataset",
            "/tmp/livret.json",
            "--start-topic",
            "histoire",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.dataset, Some(PathBuf::from("/tmp/livret.json")));
        assert_eq!(args.start_topic, "histoire");
        assert_eq!(args.max_level(), Ok(tracing::Level::DEBUG));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let args = Args::try_parse_from(["livret_citoyen", "--start-topic", " "]).unwrap();
        assert!(args.validate().is_err());

        let args = Args::try_parse_from(["livret_citoyen", "--log-level", "verbeux"]).unwrap();
        assert!(args.validate().is_err());
    }
}
