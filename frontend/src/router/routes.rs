//! Static route table.

use std::collections::BTreeMap;

/// View a route renders. The rendering layer resolves (and lazily loads) the
/// concrete view only when a navigation to it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Dashboard,
    TopicDetail,
    DataManage,
    AiInsight,
    CrawlerManagement,
    PipelineExecutor,
    DataVisualization,
}

impl ViewId {
    /// Module/chunk name the rendering layer loads for this view.
    pub fn component(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::TopicDetail => "TopicDetail",
            ViewId::DataManage => "DataManage",
            ViewId::AiInsight => "AIInsight",
            ViewId::CrawlerManagement => "CrawlerManagement",
            ViewId::PipelineExecutor => "PipelineExecutor",
            ViewId::DataVisualization => "DataVisualization",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewId,
    pub meta: RouteMeta,
}

const fn route(path: &'static str, name: &'static str, view: ViewId, title: &'static str) -> RouteDescriptor {
    RouteDescriptor {
        path,
        name,
        view,
        meta: RouteMeta { title: Some(title) },
    }
}

pub const DASHBOARD: &str = "Dashboard";
pub const TOPIC_DETAIL: &str = "TopicDetail";

pub static ROUTES: [RouteDescriptor; 7] = [
    route("/", DASHBOARD, ViewId::Dashboard, "仪表盘"),
    route("/topic/:id", TOPIC_DETAIL, ViewId::TopicDetail, "话题详情"),
    route("/manage", "DataManage", ViewId::DataManage, "数据管理"),
    route("/insight", "AIInsight", ViewId::AiInsight, "AI智能洞察"),
    route("/crawler", "CrawlerManagement", ViewId::CrawlerManagement, "爬虫管理"),
    route("/pipeline", "PipelineExecutor", ViewId::PipelineExecutor, "Pipeline执行"),
    route("/visualization", "DataVisualization", ViewId::DataVisualization, "数据可视化"),
];

/// Captured `:param` segments.
pub type Params = BTreeMap<String, String>;

/// Strip query string, fragment and trailing slashes. Always starts with `/`.
pub fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Match a normalized `path` against `pattern`, capturing `:param` segments.
/// Params must be non-empty.
pub fn match_path(pattern: &str, path: &str) -> Option<Params> {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());
    let mut params = Params::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    params.insert(name.to_string(), actual.to_string());
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Build a concrete path from a pattern and params. `None` when a param is
/// missing or empty.
pub fn fill_path(pattern: &str, params: &Params) -> Option<String> {
    if pattern == "/" {
        return Some("/".to_string());
    }
    let mut out = String::new();
    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        match segment.strip_prefix(':') {
            Some(name) => {
                let value = params.get(name).filter(|v| !v.is_empty() && !v.contains('/'))?;
                out.push_str(value);
            }
            None => out.push_str(segment),
        }
    }
    Some(out)
}
