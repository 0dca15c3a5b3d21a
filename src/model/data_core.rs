//! AppState：应用核心状态（主题树 + 导航快照）

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::content::BlockKind;
use crate::model::navigation::{click_event, NavEvent, NavigationState};
use crate::model::topic_tree::{SidebarRow, Topic, TopicTree, TreeError};
use crate::model::view::ActiveView;
use crate::utils::fs::{parse_dataset, read_dataset_file, resolve_asset};

#[derive(Debug)]
pub struct AppState {
    pub source_path: Option<PathBuf>,
    pub tree: TopicTree,
    nav: NavigationState,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("数据集错误: {0}")]
    Dataset(#[from] TreeError),
}

impl AppState {
    /// 用已解析的主题森林初始化，导航状态从默认主题开始
    pub fn from_topics(topics: Vec<Topic>, start_id: &str) -> Result<Self, AppError> {
        let tree = TopicTree::build(topics)?;

        for node in tree.iter() {
            for block in node.content.iter().filter(|b| b.kind == BlockKind::Unknown) {
                tracing::warn!("主题 {} 含未知类型内容块，按段落显示: {:.32}", node.id, block.fr);
            }
        }
        if tree.lookup(start_id).is_none() {
            tracing::warn!("默认主题不存在: {}", start_id);
        }

        tracing::info!("主题树构建完成，共 {} 个节点", tree.len());
        Ok(Self {
            source_path: None,
            tree,
            nav: NavigationState::new(start_id),
        })
    }

    pub fn from_json_str(json: &str, start_id: &str) -> Result<Self, AppError> {
        Self::from_topics(parse_dataset(json)?, start_id)
    }

    /// 加载数据集文件并构建主题树
    pub fn load_file(p: &Path, start_id: &str) -> Result<Self, AppError> {
        let topics = read_dataset_file(p)?;
        let mut state = Self::from_topics(topics, start_id)?;
        state.source_path = Some(p.to_path_buf());
        Ok(state)
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// 应用一个导航事件，整体替换快照
    pub fn apply(&mut self, event: NavEvent) {
        let next = self.nav.reduce(&event);
        tracing::debug!(?event, active = next.active_id(), expanded = next.expanded_ids().len(), "导航转换");
        if self.tree.lookup(next.active_id()).is_none() {
            tracing::warn!("激活的主题不存在: {}", next.active_id());
        }
        self.nav = next;
    }

    /// 侧边栏点击：分类只展开/折叠，叶子只导航
    pub fn click_sidebar(&mut self, id: &str) {
        let has_children = self.tree.lookup(id).is_some_and(|n| n.has_children());
        self.apply(click_event(id, has_children));
    }

    /// 分类页卡片点击：以当前激活分类为父节点进入子主题
    pub fn open_card(&mut self, child_id: &str) {
        let category_id = self.nav.active_id().to_string();
        self.apply(NavEvent::EnterFromCard {
            category_id,
            child_id: child_id.to_string(),
        });
    }

    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        self.tree.sidebar_rows(&self.nav)
    }

    pub fn active_view(&self) -> ActiveView {
        ActiveView::resolve(&self.tree, &self.nav)
    }

    /// 图片块引用 → 本地文件（相对数据集目录）
    pub fn resolve_asset(&self, reference: &str) -> Option<PathBuf> {
        resolve_asset(self.source_path.as_deref(), reference)
    }
}
