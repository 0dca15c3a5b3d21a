//! 主题树（Topic Tree）：数据集的层级结构、扁平索引与侧边栏投影
//!
//! 输入数据是嵌套的 `Topic` 记录；加载后转成扁平 arena（`TopicTree`），
//! 子节点只保存句柄，id → 句柄索引保证 O(1) 查找。

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::model::content::ContentBlock;
use crate::model::navigation::NavigationState;

/// 数据集中的一条主题记录（嵌套形式，父节点独占子节点）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Topic {
    pub id: String,
    #[serde(rename = "titleFR")]
    pub title_fr: String,
    #[serde(rename = "titleCN")]
    pub title_cn: String,
    /// 官方原文链接
    #[serde(rename = "url", default)]
    pub external_url: Option<String>,
    /// 中文考试要点
    #[serde(rename = "keyPoints", default, deserialize_with = "null_as_default")]
    pub key_points: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Topic>,
}

/// 可选字段显式写成 `null` 时与缺省同样处理
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 节点类型：有非空子节点即为分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    Category,
    Leaf,
}

impl Topic {
    pub fn kind(&self) -> TopicKind {
        if self.children.is_empty() {
            TopicKind::Leaf
        } else {
            TopicKind::Category
        }
    }
}

/// 前序遍历整片森林，生成 id → 节点 的扁平映射。
///
/// 子节点按声明顺序访问；id 重复时后访问的节点覆盖先前的节点。
pub fn index(roots: &[Topic]) -> HashMap<&str, &Topic> {
    fn walk<'a>(out: &mut HashMap<&'a str, &'a Topic>, topic: &'a Topic) {
        out.insert(topic.id.as_str(), topic);
        for child in &topic.children {
            walk(out, child);
        }
    }

    let mut out = HashMap::new();
    for root in roots {
        walk(&mut out, root);
    }
    out
}

/// 纯查找；未命中不是错误
pub fn lookup<'a>(map: &HashMap<&str, &'a Topic>, id: &str) -> Option<&'a Topic> {
    map.get(id).copied()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("主题 id 重复: {0}")]
    DuplicateId(String),
    #[error("主题 id 为空（上级: {parent}）")]
    EmptyId { parent: String },
}

/// arena 中的节点句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicHandle(usize);

#[derive(Debug, Clone)]
pub struct TopicNode {
    pub id: String,
    pub title_fr: String,
    pub title_cn: String,
    pub external_url: Option<String>,
    pub key_points: Vec<String>,
    pub content: Vec<ContentBlock>,
    pub children: Vec<TopicHandle>,
    /// 节点深度（根为 0）
    pub depth: u32,
}

impl TopicNode {
    pub fn kind(&self) -> TopicKind {
        if self.children.is_empty() {
            TopicKind::Leaf
        } else {
            TopicKind::Category
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// 不可变的主题树：节点按前序顺序存放
#[derive(Debug, Clone, Default)]
pub struct TopicTree {
    nodes: Vec<TopicNode>,
    roots: Vec<TopicHandle>,
    by_id: HashMap<String, TopicHandle>,
}

impl TopicTree {
    /// 从嵌套记录构建 arena，遇到重复或空 id 直接拒绝
    pub fn build(roots: Vec<Topic>) -> Result<Self, TreeError> {
        let mut tree = TopicTree {
            nodes: Vec::with_capacity(64),
            roots: Vec::with_capacity(roots.len()),
            by_id: HashMap::new(),
        };
        for root in roots {
            let handle = tree.insert(root, 0, "$")?;
            tree.roots.push(handle);
        }
        Ok(tree)
    }

    fn insert(&mut self, topic: Topic, depth: u32, parent: &str) -> Result<TopicHandle, TreeError> {
        if topic.id.trim().is_empty() {
            return Err(TreeError::EmptyId { parent: parent.to_string() });
        }
        if self.by_id.contains_key(&topic.id) {
            return Err(TreeError::DuplicateId(topic.id));
        }

        let handle = TopicHandle(self.nodes.len());
        let Topic { id, title_fr, title_cn, external_url, key_points, content, children } = topic;
        self.by_id.insert(id.clone(), handle);
        self.nodes.push(TopicNode {
            id,
            title_fr,
            title_cn,
            external_url,
            key_points,
            content,
            children: Vec::with_capacity(children.len()),
            depth,
        });

        let parent_id = self.nodes[handle.0].id.clone();
        for child in children {
            let child_handle = self.insert(child, depth + 1, &parent_id)?;
            self.nodes[handle.0].children.push(child_handle);
        }
        Ok(handle)
    }

    pub fn lookup(&self, id: &str) -> Option<&TopicNode> {
        self.by_id.get(id).map(|h| &self.nodes[h.0])
    }

    pub fn node(&self, handle: TopicHandle) -> &TopicNode {
        &self.nodes[handle.0]
    }

    pub fn children_of<'a>(&'a self, node: &'a TopicNode) -> impl Iterator<Item = &'a TopicNode> {
        node.children.iter().map(|h| &self.nodes[h.0])
    }

    /// 前序遍历的全部节点
    pub fn iter(&self) -> impl Iterator<Item = &TopicNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 按展开状态投影出侧边栏可见的行
    pub fn sidebar_rows(&self, state: &NavigationState) -> Vec<SidebarRow> {
        fn walk(tree: &TopicTree, handle: TopicHandle, state: &NavigationState, out: &mut Vec<SidebarRow>) {
            let node = tree.node(handle);
            let expanded = state.is_expanded(&node.id);
            out.push(SidebarRow {
                id: node.id.clone(),
                title_fr: node.title_fr.clone(),
                title_cn: node.title_cn.clone(),
                depth: node.depth,
                has_children: node.has_children(),
                expanded,
                active: state.active_id() == node.id,
                icon: (node.depth == 0).then(|| SidebarIcon::for_id(&node.id)),
            });
            if node.has_children() && expanded {
                for &child in &node.children {
                    walk(tree, child, state, out);
                }
            }
        }

        let mut out = Vec::with_capacity(self.roots.len() * 4);
        for &root in &self.roots {
            walk(self, root, state, &mut out);
        }
        out
    }
}

/// 顶层主题图标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarIcon {
    Scale,
    Home,
    Globe,
    Book,
    GraduationCap,
}

impl SidebarIcon {
    /// 按 id 中的关键字挑选，先匹配者优先
    pub fn for_id(id: &str) -> Self {
        if id.contains("republiques") {
            SidebarIcon::Scale
        } else if id.contains("systeme") {
            SidebarIcon::Home
        } else if id.contains("histoire") {
            SidebarIcon::Globe
        } else if id.contains("droits") {
            SidebarIcon::Book
        } else {
            SidebarIcon::GraduationCap
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SidebarIcon::Scale => "⚖",
            SidebarIcon::Home => "⌂",
            SidebarIcon::Globe => "◍",
            SidebarIcon::Book => "▤",
            SidebarIcon::GraduationCap => "✎",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub id: String,
    pub title_fr: String,
    pub title_cn: String,
    pub depth: u32,
    pub has_children: bool,
    pub expanded: bool,
    pub active: bool,
    pub icon: Option<SidebarIcon>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str, children: Vec<Topic>) -> Topic {
        Topic {
            id: id.to_string(),
            title_fr: id.to_uppercase(),
            title_cn: format!("{}-中文", id),
            children,
            ..Topic::default()
        }
    }

    fn sample_forest() -> Vec<Topic> {
        vec![
            topic(
                "republiques-valeurs",
                vec![topic("devise", vec![]), topic("symboles", vec![topic("drapeau", vec![])])],
            ),
            topic("histoire", vec![topic("revolution", vec![])]),
            topic("droits", vec![]),
        ]
    }

    #[test]
    fn test_index_covers_every_node() {
        let forest = sample_forest();
        let map = index(&forest);

        // 7个节点：分类与叶子都要进入索引
        assert_eq!(map.len(), 7);
        for id in ["republiques-valeurs", "devise", "symboles", "drapeau", "histoire", "revolution", "droits"] {
            let found = lookup(&map, id).expect("每个 id 都应能查到");
            assert_eq!(found.id, id);
        }
    }

    #[test]
    fn test_lookup_unknown_id_is_absent() {
        let forest = sample_forest();
        let map = index(&forest);
        assert!(lookup(&map, "n-existe-pas").is_none());
    }

    #[test]
    fn test_index_duplicate_id_last_write_wins() {
        let mut first = topic("dup", vec![]);
        first.title_fr = "premier".into();
        let mut second = topic("dup", vec![]);
        second.title_fr = "second".into();
        let forest = vec![topic("root", vec![first]), second];

        let map = index(&forest);
        assert_eq!(map.len(), 2);
        assert_eq!(lookup(&map, "dup").map(|t| t.title_fr.as_str()), Some("second"));
    }

    #[test]
    fn test_kind_is_derived_from_children() {
        let forest = sample_forest();
        assert_eq!(forest[0].kind(), TopicKind::Category);
        assert_eq!(forest[2].kind(), TopicKind::Leaf);
    }

    #[test]
    fn test_build_keeps_preorder_and_depth() {
        let tree = TopicTree::build(sample_forest()).expect("构建应成功");
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["republiques-valeurs", "devise", "symboles", "drapeau", "histoire", "revolution", "droits"]
        );
        assert_eq!(tree.lookup("drapeau").map(|n| n.depth), Some(2));
        assert_eq!(tree.lookup("symboles").map(|n| n.kind()), Some(TopicKind::Category));

        let root = tree.lookup("republiques-valeurs").unwrap();
        let children: Vec<&str> = tree.children_of(root).map(|n| n.id.as_str()).collect();
        assert_eq!(children, vec!["devise", "symboles"]);
    }

    #[test]
    fn test_build_rejects_duplicate_ids() {
        let forest = vec![topic("a", vec![topic("x", vec![])]), topic("b", vec![topic("x", vec![])])];
        let err = TopicTree::build(forest).unwrap_err();
        assert_eq!(err, TreeError::DuplicateId("x".into()));
    }

    #[test]
    fn test_build_rejects_empty_id() {
        let forest = vec![topic("a", vec![topic("  ", vec![])])];
        let err = TopicTree::build(forest).unwrap_err();
        assert_eq!(err, TreeError::EmptyId { parent: "a".into() });
    }

    #[test]
    fn test_sidebar_rows_follow_expansion() {
        let tree = TopicTree::build(sample_forest()).unwrap();

        // 初始状态只展开默认主题
        let state = NavigationState::new("republiques-valeurs");
        let ids: Vec<String> = tree.sidebar_rows(&state).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["republiques-valeurs", "devise", "symboles", "histoire", "droits"]);

        let state = state.toggle_expand("symboles");
        let rows = tree.sidebar_rows(&state);
        let drapeau = rows.iter().find(|r| r.id == "drapeau").expect("展开后应可见");
        assert_eq!(drapeau.depth, 2);
        assert!(drapeau.icon.is_none());

        // 折叠父节点时，已展开的子分类也一起隐藏
        let state = state.toggle_expand("republiques-valeurs");
        let ids: Vec<String> = tree.sidebar_rows(&state).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["republiques-valeurs", "histoire", "droits"]);
    }

    #[test]
    fn test_sidebar_rows_mark_active_and_icons() {
        let tree = TopicTree::build(sample_forest()).unwrap();
        let state = NavigationState::new("republiques-valeurs").navigate("devise");
        let rows = tree.sidebar_rows(&state);

        let active: Vec<&str> = rows.iter().filter(|r| r.active).map(|r| r.id.as_str()).collect();
        assert_eq!(active, vec!["devise"]);

        assert_eq!(rows[0].icon, Some(SidebarIcon::Scale));
        let histoire = rows.iter().find(|r| r.id == "histoire").unwrap();
        assert_eq!(histoire.icon, Some(SidebarIcon::Globe));
        assert!(histoire.has_children);
        assert!(!histoire.expanded);
    }

    #[test]
    fn test_icon_fallback() {
        assert_eq!(SidebarIcon::for_id("droits-devoirs"), SidebarIcon::Book);
        assert_eq!(SidebarIcon::for_id("systeme-politique"), SidebarIcon::Home);
        assert_eq!(SidebarIcon::for_id("vivre-en-france"), SidebarIcon::GraduationCap);
    }

    #[test]
    fn test_null_optional_fields_are_empty() {
        let json = r#"[
            {"id": "a", "titleFR": "A", "titleCN": "甲", "children": null, "content": null, "keyPoints": null, "url": null},
            {"id": "b", "titleFR": "B", "titleCN": "乙", "content": [{"type": "paragraph", "fr": "Texte.", "cn": null}]}
        ]"#;
        let forest: Vec<Topic> = serde_json::from_str(json).expect("null 字段应按缺省解析");

        assert!(forest[0].children.is_empty());
        assert!(forest[0].content.is_empty());
        assert!(forest[0].key_points.is_empty());
        assert_eq!(forest[0].external_url, None);
        assert_eq!(forest[0].kind(), TopicKind::Leaf);
        assert_eq!(forest[1].content[0].cn, "");
    }
}
