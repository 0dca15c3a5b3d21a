//! 主区域视图：把激活 id 解析为分类列表、主题页或空选择

use crate::model::content::{render_content, ContentLayout};
use crate::model::navigation::NavigationState;
use crate::model::topic_tree::{TopicNode, TopicTree};
use crate::vm::bridge::{BADGE_CHAPTERS_SUFFIX, BADGE_LEAF, LABEL_SOURCE_LINK};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub id: String,
    pub title_fr: String,
    pub title_cn: String,
    /// "N CHAPITRES" 或 "FICHE"
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    pub id: String,
    pub title_fr: String,
    pub title_cn: String,
    pub cards: Vec<CategoryCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub url: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPage {
    pub id: String,
    pub title_fr: String,
    pub title_cn: String,
    pub source: Option<SourceLink>,
    pub key_points: Vec<String>,
    pub body: ContentLayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveView {
    Category(CategoryListing),
    Topic(TopicPage),
    /// 激活 id 不存在（例如已过期的引用）
    NoSelection,
}

impl ActiveView {
    pub fn resolve(tree: &TopicTree, state: &NavigationState) -> Self {
        match tree.lookup(state.active_id()) {
            Some(node) if node.has_children() => ActiveView::Category(category_listing(tree, node)),
            Some(node) => ActiveView::Topic(topic_page(node)),
            None => ActiveView::NoSelection,
        }
    }
}

fn category_listing(tree: &TopicTree, node: &TopicNode) -> CategoryListing {
    let cards = tree
        .children_of(node)
        .map(|child| CategoryCard {
            id: child.id.clone(),
            title_fr: child.title_fr.clone(),
            title_cn: child.title_cn.clone(),
            badge: if child.has_children() {
                format!("{} {}", child.children.len(), BADGE_CHAPTERS_SUFFIX)
            } else {
                BADGE_LEAF.to_string()
            },
        })
        .collect();
    CategoryListing {
        id: node.id.clone(),
        title_fr: node.title_fr.clone(),
        title_cn: node.title_cn.clone(),
        cards,
    }
}

fn topic_page(node: &TopicNode) -> TopicPage {
    TopicPage {
        id: node.id.clone(),
        title_fr: node.title_fr.clone(),
        title_cn: node.title_cn.clone(),
        source: node
            .external_url
            .as_ref()
            .filter(|u| !u.trim().is_empty())
            .map(|url| SourceLink {
                url: url.clone(),
                label: LABEL_SOURCE_LINK,
            }),
        key_points: node.key_points.clone(),
        body: render_content(&node.content),
    }
}
