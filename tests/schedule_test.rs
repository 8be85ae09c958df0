mod common;

#[cfg(test)]
mod schedule_tests {
    use super::common::{plan, Answer, MemoryContentApi, ScriptedPrompter};
    use binocle::actions::schedule::{pause_schedules, PauseRequest};
    use binocle::model::ContentType;

    fn api_with_plans() -> MemoryContentApi {
        let api = MemoryContentApi::new();
        api.add_plan(ContentType::Dashboard, "30", plan("1", true, "8"));
        api.add_plan(ContentType::Dashboard, "30", plan("2", false, "8"));
        api.add_plan(ContentType::Dashboard, "30", plan("3", true, "9"));
        api.add_plan(ContentType::Look, "30", plan("4", true, "8"));
        api
    }

    fn request(revert: bool, user_id: Option<&str>) -> PauseRequest {
        PauseRequest {
            content_type: ContentType::Dashboard,
            content_id: "30".to_string(),
            user_id: user_id.map(str::to_string),
            revert,
        }
    }

    #[tokio::test]
    async fn test_only_enabled_plans_are_offered_for_pausing() {
        let api = api_with_plans();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(vec![1])]);

        let updated = pause_schedules(&api, &mut prompter, &request(false, None))
            .await
            .unwrap();

        let offered = &prompter.offered_options[0];
        assert_eq!(offered.len(), 2);
        assert!(offered[0].starts_with("✅ #1 Plan 1"));
        assert!(offered[0].ends_with("-> email:team@example.com"));
        assert!(offered[1].starts_with("✅ #3 Plan 3"));

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id, "3");
        assert!(!api.plan("3").enabled);
        assert!(api.plan("1").enabled);
        assert_eq!(api.calls_to("update_scheduled_plan"), vec!["update_scheduled_plan:3"]);
    }

    #[tokio::test]
    async fn test_revert_resumes_paused_plans() {
        let api = api_with_plans();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(vec![0])]);

        let updated = pause_schedules(&api, &mut prompter, &request(true, None))
            .await
            .unwrap();

        assert_eq!(prompter.offered_options[0].len(), 1);
        assert_eq!(updated[0].id, "2");
        assert!(api.plan("2").enabled);
    }

    #[tokio::test]
    async fn test_owner_filter_limits_the_plans() {
        let api = api_with_plans();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(vec![0])]);

        pause_schedules(&api, &mut prompter, &request(false, Some("9")))
            .await
            .unwrap();

        assert_eq!(prompter.offered_options[0].len(), 1);
        assert!(!api.plan("3").enabled);
        assert!(api.plan("1").enabled);
    }

    #[tokio::test]
    async fn test_nothing_to_toggle_skips_the_prompt() {
        let api = MemoryContentApi::new();
        api.add_plan(ContentType::Dashboard, "30", plan("1", false, "8"));
        let mut prompter = ScriptedPrompter::new(vec![]);

        let updated = pause_schedules(&api, &mut prompter, &request(false, None))
            .await
            .unwrap();

        assert!(updated.is_empty());
        assert!(prompter.questions.is_empty());
        assert!(api.calls_to("update_scheduled_plan").is_empty());
    }

    #[tokio::test]
    async fn test_look_plans_are_fetched_for_looks() {
        let api = api_with_plans();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(vec![0])]);
        let mut look_request = request(false, None);
        look_request.content_type = ContentType::Look;

        let updated = pause_schedules(&api, &mut prompter, &look_request)
            .await
            .unwrap();

        assert_eq!(updated[0].id, "4");
        assert_eq!(api.calls_to("scheduled_plans_for_look"), vec!["scheduled_plans_for_look:30"]);
    }

    #[tokio::test]
    async fn test_failure_stops_after_the_failing_plan() {
        let api = api_with_plans();
        api.fail_on("update_scheduled_plan:1");
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(vec![0, 1])]);

        let result = pause_schedules(&api, &mut prompter, &request(false, None)).await;

        assert!(result.is_err());
        assert!(api.plan("3").enabled);
        assert_eq!(api.calls_to("update_scheduled_plan").len(), 1);
    }
}
