#![allow(dead_code)]

use binocle::api::{ApiError, ContentApi};
use binocle::model::{
    ContentMetadataAccess, ContentMetadataAccessRequest, ContentSummary, ContentType, Dashboard,
    DashboardElement, DashboardElementUpdate, DashboardUpdate, Folder, Look, LookUpdate, Query,
    ScheduledPlan, ScheduledPlanUpdate,
};
use binocle::prompt::{PromptError, Prompter};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Default)]
struct State {
    folders: HashMap<String, Folder>,
    children: HashMap<String, Vec<String>>,
    looks: HashMap<String, Look>,
    dashboards: HashMap<String, Dashboard>,
    plans: Vec<(ContentType, String, ScheduledPlan)>,
    accesses: Vec<ContentMetadataAccess>,
    queries: Vec<Query>,
    next_id: u64,
    failures: HashSet<String>,
    calls: Vec<String>,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("{}", 1000 + self.next_id)
    }
}

/// An in-memory Looker instance.
///
/// Every call is recorded as `operation:key`, and a call can be made to fail
/// with [`MemoryContentApi::fail_on`] using the same notation.
#[derive(Default)]
pub struct MemoryContentApi {
    state: RefCell<State>,
}

fn not_found(what: &str) -> ApiError {
    ApiError::NotFound {
        body: json!({"message": format!("{} not found", what)}).to_string(),
    }
}

impl MemoryContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a folder and appends it to its parent's children.
    pub fn add_folder(&self, folder: Folder) {
        let mut state = self.state.borrow_mut();
        if let Some(parent_id) = &folder.parent_id {
            state
                .children
                .entry(parent_id.clone())
                .or_default()
                .push(folder.id.clone());
        }
        state.folders.insert(folder.id.clone(), folder);
    }

    /// Adds a plain folder whose content metadata id is `cm<id>`.
    pub fn folder(&self, id: &str, parent_id: Option<&str>) {
        let mut folder = Folder::new(id, format!("Folder {}", id), parent_id);
        folder.content_metadata_id = Some(format!("cm{}", id));
        self.add_folder(folder);
    }

    pub fn add_look(&self, look: Look) {
        let mut state = self.state.borrow_mut();
        if let Some(folder) = look.folder_id.as_ref().and_then(|id| state.folders.get_mut(id)) {
            folder.looks.push(ContentSummary {
                id: look.id.clone(),
                title: look.title.clone(),
            });
        }
        state.looks.insert(look.id.clone(), look);
    }

    pub fn add_dashboard(&self, dashboard: Dashboard) {
        let mut state = self.state.borrow_mut();
        if let Some(folder) = dashboard
            .folder_id
            .as_ref()
            .and_then(|id| state.folders.get_mut(id))
        {
            folder.dashboards.push(ContentSummary {
                id: dashboard.id.clone(),
                title: dashboard.title.clone(),
            });
        }
        state.dashboards.insert(dashboard.id.clone(), dashboard);
    }

    pub fn add_plan(&self, content_type: ContentType, content_id: &str, plan: ScheduledPlan) {
        self.state
            .borrow_mut()
            .plans
            .push((content_type, content_id.to_string(), plan));
    }

    pub fn add_access(&self, access: ContentMetadataAccess) {
        self.state.borrow_mut().accesses.push(access);
    }

    pub fn fail_on(&self, call: &str) {
        self.state.borrow_mut().failures.insert(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<String> {
        let prefix = format!("{}:", operation);
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with(&prefix))
            .collect()
    }

    pub fn look(&self, id: &str) -> Look {
        self.state.borrow().looks[id].clone()
    }

    pub fn dashboard(&self, id: &str) -> Dashboard {
        self.state.borrow().dashboards[id].clone()
    }

    pub fn plan(&self, id: &str) -> ScheduledPlan {
        self.state
            .borrow()
            .plans
            .iter()
            .find(|(_, _, plan)| plan.id == id)
            .map(|(_, _, plan)| plan.clone())
            .unwrap()
    }

    pub fn accesses(&self) -> Vec<ContentMetadataAccess> {
        self.state.borrow().accesses.clone()
    }

    pub fn queries(&self) -> Vec<Query> {
        self.state.borrow().queries.clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        let failed = state.failures.contains(&call);
        state.calls.push(call.clone());
        if failed {
            Err(ApiError::from_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"message": "Validation Failed", "call": call}).to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn stored_query(&self, query_id: &str) -> Option<Query> {
        self.state
            .borrow()
            .queries
            .iter()
            .find(|q| q.id().as_deref() == Some(query_id))
            .cloned()
    }
}

impl ContentApi for MemoryContentApi {
    async fn get_folder(&self, folder_id: &str) -> Result<Folder, ApiError> {
        self.record(format!("get_folder:{}", folder_id))?;
        self.state
            .borrow()
            .folders
            .get(folder_id)
            .cloned()
            .ok_or_else(|| not_found("folder"))
    }

    async fn get_folder_children(
        &self,
        folder_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Folder>, ApiError> {
        self.record(format!("get_folder_children:{}:{}", folder_id, page))?;
        let state = self.state.borrow();
        if !state.folders.contains_key(folder_id) {
            return Err(not_found("folder"));
        }
        let ids = state.children.get(folder_id).cloned().unwrap_or_default();
        let start = ((page.max(1) - 1) * per_page) as usize;
        Ok(ids
            .iter()
            .skip(start)
            .take(per_page as usize)
            .filter_map(|id| state.folders.get(id).cloned())
            .collect())
    }

    async fn get_look(&self, look_id: &str) -> Result<Look, ApiError> {
        self.record(format!("get_look:{}", look_id))?;
        self.state
            .borrow()
            .looks
            .get(look_id)
            .cloned()
            .ok_or_else(|| not_found("look"))
    }

    async fn update_look(&self, look_id: &str, update: &LookUpdate) -> Result<Look, ApiError> {
        self.record(format!("update_look:{}", look_id))?;
        let query = match &update.query_id {
            Some(query_id) => self.stored_query(query_id),
            None => None,
        };
        let mut state = self.state.borrow_mut();
        let look = state.looks.get_mut(look_id).ok_or_else(|| not_found("look"))?;
        if let Some(title) = &update.title {
            look.title = Some(title.clone());
        }
        if let Some(deleted) = update.deleted {
            look.deleted = deleted;
            if !deleted {
                look.deleted_at = None;
            }
        }
        if let Some(query_id) = &update.query_id {
            look.query_id = Some(query_id.clone());
            look.query = query;
        }
        Ok(look.clone())
    }

    async fn move_look(&self, look_id: &str, folder_id: &str) -> Result<Look, ApiError> {
        self.record(format!("move_look:{}:{}", look_id, folder_id))?;
        let mut state = self.state.borrow_mut();
        let look = state.looks.get_mut(look_id).ok_or_else(|| not_found("look"))?;
        look.folder_id = Some(folder_id.to_string());
        Ok(look.clone())
    }

    async fn copy_look(&self, look_id: &str, folder_id: &str) -> Result<Look, ApiError> {
        self.record(format!("copy_look:{}:{}", look_id, folder_id))?;
        let mut state = self.state.borrow_mut();
        let mut copy = state.looks.get(look_id).cloned().ok_or_else(|| not_found("look"))?;
        copy.id = state.next_id();
        copy.folder_id = Some(folder_id.to_string());
        state.looks.insert(copy.id.clone(), copy.clone());
        Ok(copy)
    }

    async fn get_dashboard(&self, dashboard_id: &str) -> Result<Dashboard, ApiError> {
        self.record(format!("get_dashboard:{}", dashboard_id))?;
        self.state
            .borrow()
            .dashboards
            .get(dashboard_id)
            .cloned()
            .ok_or_else(|| not_found("dashboard"))
    }

    async fn update_dashboard(
        &self,
        dashboard_id: &str,
        update: &DashboardUpdate,
    ) -> Result<Dashboard, ApiError> {
        self.record(format!("update_dashboard:{}", dashboard_id))?;
        let mut state = self.state.borrow_mut();
        let dashboard = state
            .dashboards
            .get_mut(dashboard_id)
            .ok_or_else(|| not_found("dashboard"))?;
        if let Some(title) = &update.title {
            dashboard.title = Some(title.clone());
        }
        if let Some(deleted) = update.deleted {
            dashboard.deleted = deleted;
            if !deleted {
                dashboard.deleted_at = None;
            }
        }
        Ok(dashboard.clone())
    }

    async fn move_dashboard(
        &self,
        dashboard_id: &str,
        folder_id: &str,
    ) -> Result<Dashboard, ApiError> {
        self.record(format!("move_dashboard:{}:{}", dashboard_id, folder_id))?;
        let mut state = self.state.borrow_mut();
        let dashboard = state
            .dashboards
            .get_mut(dashboard_id)
            .ok_or_else(|| not_found("dashboard"))?;
        dashboard.folder_id = Some(folder_id.to_string());
        Ok(dashboard.clone())
    }

    async fn copy_dashboard(
        &self,
        dashboard_id: &str,
        folder_id: &str,
    ) -> Result<Dashboard, ApiError> {
        self.record(format!("copy_dashboard:{}:{}", dashboard_id, folder_id))?;
        let mut state = self.state.borrow_mut();
        let mut copy = state
            .dashboards
            .get(dashboard_id)
            .cloned()
            .ok_or_else(|| not_found("dashboard"))?;
        copy.id = state.next_id();
        copy.folder_id = Some(folder_id.to_string());
        state.dashboards.insert(copy.id.clone(), copy.clone());
        Ok(copy)
    }

    async fn update_dashboard_element(
        &self,
        element_id: &str,
        update: &DashboardElementUpdate,
    ) -> Result<DashboardElement, ApiError> {
        self.record(format!("update_dashboard_element:{}", element_id))?;
        let query = self.stored_query(&update.query_id);
        let mut state = self.state.borrow_mut();
        let element = state
            .dashboards
            .values_mut()
            .flat_map(|d| d.dashboard_elements.iter_mut())
            .find(|e| e.id == element_id)
            .ok_or_else(|| not_found("dashboard element"))?;
        element.query_id = Some(update.query_id.clone());
        element.query = query;
        Ok(element.clone())
    }

    async fn create_query(&self, query: &Query) -> Result<Query, ApiError> {
        let query_id = self.state.borrow_mut().next_id();
        self.record(format!("create_query:{}", query_id))?;

        let mut fields = query.fields().clone();
        fields.insert("id".to_string(), Value::String(query_id));
        let created = Query::from(fields);

        self.state.borrow_mut().queries.push(created.clone());
        Ok(created)
    }

    async fn scheduled_plans_for_look(
        &self,
        look_id: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ScheduledPlan>, ApiError> {
        self.record(format!("scheduled_plans_for_look:{}", look_id))?;
        Ok(self.plans_for(ContentType::Look, look_id, user_id))
    }

    async fn scheduled_plans_for_dashboard(
        &self,
        dashboard_id: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ScheduledPlan>, ApiError> {
        self.record(format!("scheduled_plans_for_dashboard:{}", dashboard_id))?;
        Ok(self.plans_for(ContentType::Dashboard, dashboard_id, user_id))
    }

    async fn update_scheduled_plan(
        &self,
        plan_id: &str,
        update: &ScheduledPlanUpdate,
    ) -> Result<ScheduledPlan, ApiError> {
        self.record(format!("update_scheduled_plan:{}", plan_id))?;
        let mut state = self.state.borrow_mut();
        let (_, _, plan) = state
            .plans
            .iter_mut()
            .find(|(_, _, plan)| plan.id == plan_id)
            .ok_or_else(|| not_found("scheduled plan"))?;
        plan.enabled = update.enabled;
        Ok(plan.clone())
    }

    async fn content_metadata_accesses(
        &self,
        content_metadata_id: &str,
    ) -> Result<Vec<ContentMetadataAccess>, ApiError> {
        self.record(format!("content_metadata_accesses:{}", content_metadata_id))?;
        Ok(self
            .state
            .borrow()
            .accesses
            .iter()
            .filter(|a| a.content_metadata_id.as_deref() == Some(content_metadata_id))
            .cloned()
            .collect())
    }

    async fn create_content_metadata_access(
        &self,
        request: &ContentMetadataAccessRequest,
    ) -> Result<ContentMetadataAccess, ApiError> {
        self.record(format!(
            "create_content_metadata_access:{}",
            request.content_metadata_id
        ))?;
        let mut state = self.state.borrow_mut();
        let access = ContentMetadataAccess {
            id: state.next_id(),
            content_metadata_id: Some(request.content_metadata_id.clone()),
            permission_type: Some(request.permission_type),
            group_id: request.group_id.clone(),
            user_id: request.user_id.clone(),
        };
        state.accesses.push(access.clone());
        Ok(access)
    }

    async fn update_content_metadata_access(
        &self,
        access_id: &str,
        request: &ContentMetadataAccessRequest,
    ) -> Result<ContentMetadataAccess, ApiError> {
        self.record(format!("update_content_metadata_access:{}", access_id))?;
        let mut state = self.state.borrow_mut();
        let access = state
            .accesses
            .iter_mut()
            .find(|a| a.id == access_id)
            .ok_or_else(|| not_found("content metadata access"))?;
        access.permission_type = Some(request.permission_type);
        Ok(access.clone())
    }
}

impl MemoryContentApi {
    fn plans_for(
        &self,
        content_type: ContentType,
        content_id: &str,
        user_id: Option<&str>,
    ) -> Vec<ScheduledPlan> {
        self.state
            .borrow()
            .plans
            .iter()
            .filter(|(kind, id, _)| *kind == content_type && id == content_id)
            .map(|(_, _, plan)| plan)
            .filter(|plan| user_id.is_none() || plan.user_id.as_deref() == user_id)
            .cloned()
            .collect()
    }
}

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Text(String),
    Select(Vec<usize>),
}

impl Answer {
    pub fn text(answer: &str) -> Answer {
        Answer::Text(answer.to_string())
    }
}

/// A prompter that replays answers in order and records the questions.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub questions: Vec<String>,
    pub offered_options: Vec<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Default::default()
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, message: &str) -> Result<Answer, PromptError> {
        self.questions.push(message.to_string());
        self.answers.pop_front().ok_or(PromptError::Cancelled)
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, PromptError> {
        match self.next(message)? {
            Answer::Confirm(answer) => Ok(answer),
            other => Err(PromptError::Failed(format!("expected a confirmation, got {:?}", other))),
        }
    }

    fn text(&mut self, message: &str, _help: Option<&str>) -> Result<String, PromptError> {
        match self.next(message)? {
            Answer::Text(answer) => Ok(answer),
            other => Err(PromptError::Failed(format!("expected text, got {:?}", other))),
        }
    }

    fn multi_select(&mut self, message: &str, options: &[String]) -> Result<Vec<usize>, PromptError> {
        self.offered_options.push(options.to_vec());
        match self.next(message)? {
            Answer::Select(indexes) => Ok(indexes),
            other => Err(PromptError::Failed(format!("expected a selection, got {:?}", other))),
        }
    }
}

pub fn look(id: &str, folder_id: &str, query: Value) -> Look {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Look {}", id),
        "folder_id": folder_id,
        "query_id": query.get("id").cloned().unwrap_or(Value::Null),
        "query": query,
    }))
    .unwrap()
}

pub fn plan(id: &str, enabled: bool, user_id: &str) -> ScheduledPlan {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Plan {}", id),
        "crontab": "0 6 * * *",
        "enabled": enabled,
        "user_id": user_id,
        "scheduled_plan_destination": [{"type": "email", "address": "team@example.com"}]
    }))
    .unwrap()
}
