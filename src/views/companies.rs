//! Company list, company detail and the company card.

use dioxus::prelude::*;

use crate::app::Route;
use crate::client::use_session;
use crate::models::Company;
use crate::views::fetch::{FetchState, FetchView, LOADING_TEXT, error_text};
use crate::views::group_thousands;
use crate::views::jobs::JobCard;
use crate::views::search::SearchForm;

/// `"1,234 employees"`, or `"Employee count n/a"` when unknown.
pub fn employee_count_label(num_employees: Option<u64>) -> String {
    match num_employees {
        Some(count) => format!("{} employees", group_thousands(count)),
        None => "Employee count n/a".to_string(),
    }
}

/// All companies, filterable by name.
#[component]
pub fn CompanyList() -> Element {
    let session = use_session();
    let mut companies = use_signal(FetchState::<Vec<Company>>::default);

    let search = use_callback(move |name: Option<String>| {
        let api = session.api().clone();
        companies.write().begin();
        spawn(async move {
            let result = api.get_companies(name.as_deref()).await;
            companies.write().finish(result);
        });
    });

    use_effect(move || search.call(None));

    let companies = companies.read();
    let content = match companies.list_view() {
        FetchView::Loading => rsx! { div { "{LOADING_TEXT}" } },
        FetchView::Failed(error) => rsx! { div { class: "alert error", {error_text(error)} } },
        FetchView::Empty => rsx! { div { "No companies found." } },
        FetchView::Ready(items) => rsx! {
            div { class: "grid cards",
                for company in items.iter() {
                    CompanyCard { key: "{company.handle}", company: company.clone() }
                }
            }
        },
    };

    rsx! {
        div { class: "container",
            div { class: "page-header",
                h2 { "Companies" }
                div { class: "subtle", "Search and explore employers" }
            }
            SearchForm { on_search: move |name| search.call(name) }
            {content}
        }
    }
}

/// One company with its open positions.
#[component]
pub fn CompanyDetail(handle: String) -> Element {
    let session = use_session();
    let mut company = use_signal(FetchState::<Company>::default);

    use_effect(use_reactive((&handle,), move |(handle,)| {
        let api = session.api().clone();
        company.write().begin();
        spawn(async move {
            let result = api.get_company(&handle).await;
            company.write().finish(result);
        });
    }));

    let company = company.read();
    match company.view() {
        FetchView::Loading => rsx! { div { class: "container", "{LOADING_TEXT}" } },
        FetchView::Failed(error) => rsx! {
            div { class: "container alert error", {error_text(error)} }
        },
        FetchView::Empty => rsx! { div { class: "container", "Company not found." } },
        FetchView::Ready(company) => rsx! {
            div { class: "container",
                h2 { "{company.name}" }
                p { class: "subtle", "{company.description}" }
                h3 { "Open Jobs" }
                if company.jobs.is_empty() {
                    div { "No current job postings." }
                } else {
                    div { class: "grid",
                        for job in company.jobs.iter() {
                            JobCard { key: "{job.id}", job: job.clone() }
                        }
                    }
                }
            }
        },
    }
}

/// Summary card linking to the company's detail page.
#[component]
pub fn CompanyCard(company: Company) -> Element {
    let logo = match &company.logo_url {
        Some(url) => rsx! { img { class: "logo", src: "{url}", alt: "{company.name} logo" } },
        None => rsx! { div { class: "logo", aria_hidden: "true" } },
    };

    rsx! {
        Link {
            class: "card",
            to: Route::CompanyPage { handle: company.handle.clone() },
            {logo}
            div { class: "title", "{company.name}" }
            div { class: "muted", "{company.description}" }
            div { class: "muted", {employee_count_label(company.num_employees)} }
        }
    }
}
