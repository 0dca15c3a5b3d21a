//! 导航状态机：当前激活主题 + 展开集合
//!
//! `NavigationState` 是不可变快照，所有转换都是 `(状态, 事件) → 新状态` 的纯函数。
//! 展开集合保留插入顺序，但只有成员关系有意义。

/// 用户交互产生的导航事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// 激活目标主题，并把它加入展开集合
    Navigate(String),
    /// 切换某个节点的展开状态，不改变激活主题
    ToggleExpand(String),
    /// 从分类卡片进入子主题：先切换分类展开，再激活子主题
    EnterFromCard { category_id: String, child_id: String },
}

/// 侧边栏点击分派：有子节点只做展开/折叠，无子节点只做导航
pub fn click_event(id: &str, has_children: bool) -> NavEvent {
    if has_children {
        NavEvent::ToggleExpand(id.to_string())
    } else {
        NavEvent::Navigate(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    active_id: String,
    expanded_ids: Vec<String>,
}

impl NavigationState {
    /// 初始状态：激活默认主题，且只展开它自己
    pub fn new(default_id: &str) -> Self {
        Self {
            active_id: default_id.to_string(),
            expanded_ids: vec![default_id.to_string()],
        }
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn expanded_ids(&self) -> &[String] {
        &self.expanded_ids
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_ids.iter().any(|e| e == id)
    }

    /// 导航到目标；展开集合只增不减，不会自动折叠兄弟节点
    pub fn navigate(&self, target_id: &str) -> Self {
        let mut expanded_ids = self.expanded_ids.clone();
        if !self.is_expanded(target_id) {
            expanded_ids.push(target_id.to_string());
        }
        Self {
            active_id: target_id.to_string(),
            expanded_ids,
        }
    }

    pub fn toggle_expand(&self, id: &str) -> Self {
        let expanded_ids = if self.is_expanded(id) {
            self.expanded_ids.iter().filter(|e| *e != id).cloned().collect()
        } else {
            let mut next = self.expanded_ids.clone();
            next.push(id.to_string());
            next
        };
        Self {
            active_id: self.active_id.clone(),
            expanded_ids,
        }
    }

    /// 分类卡片点击：切换必须在激活主题移动之前完成
    pub fn enter_from_card(&self, category_id: &str, child_id: &str) -> Self {
        self.toggle_expand(category_id).navigate(child_id)
    }

    pub fn reduce(&self, event: &NavEvent) -> Self {
        match event {
            NavEvent::Navigate(id) => self.navigate(id),
            NavEvent::ToggleExpand(id) => self.toggle_expand(id),
            NavEvent::EnterFromCard { category_id, child_id } => self.enter_from_card(category_id, child_id),
        }
    }
}
