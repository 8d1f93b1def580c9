//! Search box shared by the company and job lists.

use dioxus::prelude::*;

/// Trims a search term. Blank input means "no filter".
pub fn normalize_search_term(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_string())
}

/// Controlled search input; reports the normalized term on submit.
#[component]
pub fn SearchForm(
    on_search: EventHandler<Option<String>>,
    #[props(default)] initial_term: String,
) -> Element {
    let mut term = use_signal(move || initial_term);

    rsx! {
        form {
            class: "search",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_search.call(normalize_search_term(&term.read()));
            },
            input {
                value: "{term}",
                placeholder: "Search…",
                aria_label: "search term",
                oninput: move |evt| term.set(evt.value()),
            }
            button { class: "btn outline", r#type: "submit", "Search" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_term_means_no_filter() {
        assert_eq!(normalize_search_term(""), None);
        assert_eq!(normalize_search_term("   "), None);
        assert_eq!(normalize_search_term("\t\n"), None);
    }

    #[test]
    fn test_term_is_trimmed() {
        assert_eq!(normalize_search_term("apple").as_deref(), Some("apple"));
        assert_eq!(normalize_search_term("  data eng ").as_deref(), Some("data eng"));
    }
}
