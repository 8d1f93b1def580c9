//! Job list and job card, including the Apply button.

use dioxus::prelude::*;

use crate::client::use_session;
use crate::models::Job;
use crate::views::fetch::{FetchState, FetchView, LOADING_TEXT, error_text};
use crate::views::group_thousands;
use crate::views::search::SearchForm;

/// Placeholder for a missing salary or equity.
pub const MISSING_VALUE: &str = "—";

/// `"$120,000"`, or `"—"` when the posting has no salary.
pub fn format_salary(salary: Option<u64>) -> String {
    salary.map_or_else(
        || MISSING_VALUE.to_string(),
        |amount| format!("${}", group_thousands(amount)),
    )
}

pub fn format_equity(equity: Option<&str>) -> &str {
    equity.unwrap_or(MISSING_VALUE)
}

/// All jobs, filterable by title.
#[component]
pub fn JobList() -> Element {
    let session = use_session();
    let mut jobs = use_signal(FetchState::<Vec<Job>>::default);

    let search = use_callback(move |title: Option<String>| {
        let api = session.api().clone();
        jobs.write().begin();
        spawn(async move {
            let result = api.get_jobs(title.as_deref()).await;
            jobs.write().finish(result);
        });
    });

    use_effect(move || search.call(None));

    let jobs = jobs.read();
    let content = match jobs.list_view() {
        FetchView::Loading => rsx! { div { "{LOADING_TEXT}" } },
        FetchView::Failed(error) => rsx! { div { class: "alert error", {error_text(error)} } },
        FetchView::Empty => rsx! { div { "No jobs found." } },
        FetchView::Ready(items) => rsx! {
            div { class: "grid cards",
                for job in items.iter() {
                    JobCard { key: "{job.id}", job: job.clone(), show_company: true }
                }
            }
        },
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h2 { "Jobs" }
                div { class: "subtle", "Find current openings" }
            }
            SearchForm { on_search: move |title| search.call(title) }
            {content}
        }
    }
}

/// One posting. Logged-in users get an Apply button, replaced by an
/// "Applied" badge once the backend has recorded the application.
#[component]
pub fn JobCard(job: Job, #[props(default)] show_company: bool) -> Element {
    let session = use_session();
    let mut submitting = use_signal(|| false);

    let job_id = job.id;
    let logged_in = session.current_user().is_some();
    let applied = session.has_applied_to_job(job_id);
    let busy = submitting() || session.is_applying_to_job(job_id);

    let apply = move |_: MouseEvent| {
        let session = session.clone();
        submitting.set(true);
        spawn(async move {
            if let Err(err) = session.apply_to_job(job_id).await {
                tracing::debug!("Apply button for job {} failed: {}", job_id, err);
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "card",
            div { class: "title", "{job.title}" }
            if show_company {
                if let Some(company_name) = &job.company_name {
                    div { class: "muted", "{company_name}" }
                }
            }
            div { class: "muted", "Salary: {format_salary(job.salary)}" }
            div { class: "muted", "Equity: {format_equity(job.equity.as_deref())}" }
            if logged_in {
                div { class: "actions",
                    if applied {
                        span { class: "pill good", "Applied" }
                    } else {
                        button {
                            class: "btn primary",
                            disabled: busy,
                            onclick: apply,
                            if busy { "Applying…" } else { "Apply" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(Some(120_000)), "$120,000");
        assert_eq!(format_salary(Some(50)), "$50");
        assert_eq!(format_salary(None), "—");
    }

    #[test]
    fn test_format_equity() {
        assert_eq!(format_equity(Some("0.05")), "0.05");
        assert_eq!(format_equity(None), "—");
    }
}
