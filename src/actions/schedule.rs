use crate::{
    actions::utils::{required_value, Session},
    api::ContentApi,
    commands::params::{PARAMETER_CONTENT_TYPE, PARAMETER_ID, PARAMETER_REVERT, PARAMETER_USER_ID},
    error::CliError,
    model::{ContentType, ScheduledPlan},
    progress::Spinner,
    prompt::Prompter,
    schedules::{
        describe_plan, nothing_to_toggle_message, plans_for_content, set_plan_enabled,
        toggle_candidates,
    },
};
use clap::ArgMatches;
use color_print::cprintln;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseRequest {
    pub content_type: ContentType,
    pub content_id: String,
    pub user_id: Option<String>,
    /// Resume paused plans instead of pausing enabled ones
    pub revert: bool,
}

/// Lets the user pick schedules of a look or dashboard and pauses (or resumes) them.
///
/// Returns the plans as updated by the service, empty when nothing matched or
/// nothing was selected.
pub async fn pause_schedules<A: ContentApi, P: Prompter>(
    api: &A,
    prompter: &mut P,
    request: &PauseRequest,
) -> Result<Vec<ScheduledPlan>, CliError> {
    let spinner = Spinner::start("Fetching content schedules");
    let plans = match plans_for_content(
        api,
        request.content_type,
        &request.content_id,
        request.user_id.as_deref(),
    )
    .await
    {
        Ok(plans) => {
            spinner.clear();
            plans
        }
        Err(e) => {
            spinner.fail("Failed to find schedules for this content");
            return Err(e.into());
        }
    };

    let candidates = toggle_candidates(&plans, request.revert);
    if candidates.is_empty() {
        println!("{}", nothing_to_toggle_message(request.revert));
        return Ok(Vec::new());
    }

    let (state, verb) = if request.revert {
        ("paused", "resume")
    } else {
        ("enabled", "pause")
    };
    let choices: Vec<String> = candidates.iter().map(|plan| describe_plan(plan)).collect();
    let indexes = prompter.multi_select(
        &format!("Which {} schedules do you want to {}?", state, verb),
        &choices,
    )?;

    let mut updated = Vec::with_capacity(indexes.len());
    for plan in indexes.into_iter().filter_map(|index| candidates.get(index)) {
        let spinner = Spinner::start(format!("Updating schedule #{}", plan.id));
        match set_plan_enabled(api, &plan.id, request.revert).await {
            Ok(plan) => {
                spinner.succeed(format!(
                    "Schedule #{} {}",
                    plan.id,
                    if request.revert { "resumed" } else { "paused" }
                ));
                updated.push(plan);
            }
            Err(e) => {
                spinner.fail(format!("Failed to {} schedule #{}", verb, plan.id));
                return Err(e.into());
            }
        }
    }
    Ok(updated)
}

pub async fn pause(session: &Session, prompter: &mut impl Prompter, sub_matches: &ArgMatches) -> Result<(), CliError> {
    let request = PauseRequest {
        content_type: ContentType::from_str(required_value(sub_matches, PARAMETER_CONTENT_TYPE)?)?,
        content_id: required_value(sub_matches, PARAMETER_ID)?.clone(),
        user_id: sub_matches.get_one::<String>(PARAMETER_USER_ID).cloned(),
        revert: sub_matches.get_flag(PARAMETER_REVERT),
    };

    let updated = pause_schedules(&session.client, prompter, &request).await?;
    if !updated.is_empty() {
        cprintln!(
            "<green>{} schedule(s) of {} {} {}</green>",
            updated.len(),
            request.content_type,
            session.reference(request.content_type, &request.content_id),
            if request.revert { "resumed" } else { "paused" }
        );
    }
    Ok(())
}
