//! Pausing and resuming scheduled plans.

use crate::api::{ApiError, ContentApi};
use crate::model::{ContentType, ScheduledPlan, ScheduledPlanUpdate};

/// Scheduled plans of a look or dashboard, optionally limited to one owner.
pub async fn plans_for_content<A: ContentApi>(
    api: &A,
    content_type: ContentType,
    content_id: &str,
    user_id: Option<&str>,
) -> Result<Vec<ScheduledPlan>, ApiError> {
    match content_type {
        ContentType::Dashboard => api.scheduled_plans_for_dashboard(content_id, user_id).await,
        _ => api.scheduled_plans_for_look(content_id, user_id).await,
    }
}

/// The plans whose state would change: enabled ones when pausing, paused ones
/// when reverting.
pub fn toggle_candidates(plans: &[ScheduledPlan], revert: bool) -> Vec<&ScheduledPlan> {
    plans.iter().filter(|plan| plan.enabled != revert).collect()
}

/// One line describing a plan in the selection list.
pub fn describe_plan(plan: &ScheduledPlan) -> String {
    let name = plan
        .name
        .as_deref()
        .or(plan.title.as_deref())
        .unwrap_or("Unnamed schedule");
    let destinations = plan
        .scheduled_plan_destination
        .iter()
        .filter_map(|d| match (d.destination_type.as_deref(), d.address.as_deref()) {
            (Some(kind), Some(address)) => Some(format!("{}:{}", kind, address)),
            (Some(kind), None) => Some(kind.to_string()),
            (None, Some(address)) => Some(address.to_string()),
            (None, None) => None,
        })
        .collect::<Vec<_>>()
        .join(", ");
    let status = if plan.enabled { "✅" } else { "⏸" };

    let mut line = format!("{} #{} {}", status, plan.id, name);
    if let Some(crontab) = &plan.crontab {
        line.push_str(&format!(" [{}]", crontab));
    }
    if let Some(user_id) = &plan.user_id {
        line.push_str(&format!(" owner #{}", user_id));
    }
    if !destinations.is_empty() {
        line.push_str(&format!(" -> {}", destinations));
    }
    line
}

/// Message printed when nothing can be toggled.
pub fn nothing_to_toggle_message(revert: bool) -> &'static str {
    if revert {
        "No paused schedules for this content"
    } else {
        "No enabled schedules for this content"
    }
}

/// Sets `enabled` on a plan: false to pause it, true to resume it.
pub async fn set_plan_enabled<A: ContentApi>(
    api: &A,
    plan_id: &str,
    enabled: bool,
) -> Result<ScheduledPlan, ApiError> {
    api.update_scheduled_plan(plan_id, &ScheduledPlanUpdate { enabled })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plans() -> Vec<ScheduledPlan> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Daily", "crontab": "0 6 * * *", "enabled": true, "user_id": 8,
             "scheduled_plan_destination": [{"type": "email", "address": "ops@example.com"}]},
            {"id": 2, "title": "Weekly", "enabled": false},
            {"id": 3, "enabled": true}
        ]))
        .unwrap()
    }

    #[test]
    fn test_toggle_candidates() {
        let plans = plans();
        let enabled: Vec<&str> = toggle_candidates(&plans, false).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(enabled, vec!["1", "3"]);
        let paused: Vec<&str> = toggle_candidates(&plans, true).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(paused, vec!["2"]);
    }

    #[test]
    fn test_describe_plan() {
        let plans = plans();
        assert_eq!(
            describe_plan(&plans[0]),
            "✅ #1 Daily [0 6 * * *] owner #8 -> email:ops@example.com"
        );
        assert_eq!(describe_plan(&plans[1]), "⏸ #2 Weekly");
        assert_eq!(describe_plan(&plans[2]), "✅ #3 Unnamed schedule");
    }
}
