//! IO helper: dataset file reading, asset and link resolution

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::model::data_core::AppError;
use crate::model::topic_tree::Topic;

/// 从文件读取主题森林（JSON 数组）
pub fn read_dataset_file(p: &Path) -> Result<Vec<Topic>, AppError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let topics: Vec<Topic> = serde_json::from_reader(rdr)?;
    Ok(topics)
}

/// 从内存中的 JSON 文本解析主题森林
pub fn parse_dataset(json: &str) -> Result<Vec<Topic>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// 只交给系统浏览器打开 http(s) 链接
pub fn is_web_url(reference: &str) -> bool {
    let r = reference.trim();
    r.starts_with("https://") || r.starts_with("http://")
}

/// 把图片引用解析为本地文件。
///
/// 相对路径以数据集文件所在目录为基准；网络地址和不存在的文件返回 None
pub fn resolve_asset(dataset: Option<&Path>, reference: &str) -> Option<PathBuf> {
    let reference = reference.trim();
    if reference.is_empty() || is_web_url(reference) {
        return None;
    }

    let path = Path::new(reference);
    let resolved = match dataset.and_then(Path::parent) {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    };
    resolved.is_file().then_some(resolved)
}
