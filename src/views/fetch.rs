//! Loading/error/data lifecycle shared by the list and detail pages.

use crate::error::ApiError;

/// Text shown while a request is in flight.
pub const LOADING_TEXT: &str = "Loading…";

/// State of a view's backend request.
///
/// Starts out loading, so the first render shows [`LOADING_TEXT`] before the
/// request has even been sent.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<T> {
    data: Option<T>,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
        }
    }
}

/// What a view should display for a [`FetchState`].
#[derive(Debug, PartialEq)]
pub enum FetchView<'a, T: ?Sized> {
    Loading,
    /// The error text, messages already joined with `", "`.
    Failed(&'a str),
    /// Nothing to show: no data, or an empty list.
    Empty,
    Ready(&'a T),
}

impl<T> FetchState<T> {
    /// Marks a new request as started. Previous data is kept until the
    /// result arrives.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Records the result of the request started by [`begin`](Self::begin).
    pub fn finish(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(data) => self.data = Some(data),
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn view(&self) -> FetchView<'_, T> {
        if self.loading {
            FetchView::Loading
        } else if let Some(error) = &self.error {
            FetchView::Failed(error)
        } else {
            self.data.as_ref().map_or(FetchView::Empty, FetchView::Ready)
        }
    }
}

impl<T> FetchState<Vec<T>> {
    /// Like [`view`](Self::view), with an empty list reported as `Empty`.
    pub fn list_view(&self) -> FetchView<'_, [T]> {
        match self.view() {
            FetchView::Loading => FetchView::Loading,
            FetchView::Failed(error) => FetchView::Failed(error),
            FetchView::Ready(items) if !items.is_empty() => FetchView::Ready(items.as_slice()),
            FetchView::Ready(_) | FetchView::Empty => FetchView::Empty,
        }
    }
}

/// `"Error: …"` line shown in place of the content.
pub fn error_text(error: &str) -> String {
    format!("Error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let state = FetchState::<Vec<u32>>::default();
        assert_eq!(state.list_view(), FetchView::Loading);
        assert!(state.data().is_none());
    }

    #[test]
    fn test_empty_list_is_empty_not_error() {
        let mut state = FetchState::<Vec<u32>>::default();
        state.begin();
        state.finish(Ok(Vec::new()));

        assert_eq!(state.list_view(), FetchView::Empty);
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_items_are_ready() {
        let mut state = FetchState::default();
        state.finish(Ok(vec![1, 2]));
        assert_eq!(state.list_view(), FetchView::Ready(&[1, 2][..]));
    }

    #[test]
    fn test_rejection_shows_joined_error_and_clears_loading() {
        let mut state = FetchState::<Vec<u32>>::default();
        state.begin();
        state.finish(Err(ApiError::new(vec![
            "title must be a string".to_string(),
            "minSalary must be an integer".to_string(),
        ])));

        assert!(!state.is_loading());
        assert_eq!(
            state.list_view(),
            FetchView::Failed("title must be a string, minSalary must be an integer")
        );
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut state = FetchState::<u32>::default();
        state.finish(Err(ApiError::generic()));
        state.begin();

        assert_eq!(state.view(), FetchView::Loading);
        assert!(state.error().is_none());

        state.finish(Ok(7));
        assert_eq!(state.view(), FetchView::Ready(&7));
    }

    #[test]
    fn test_detail_without_data_is_empty() {
        let mut state = FetchState::<u32>::default();
        state.loading = false;
        assert_eq!(state.view(), FetchView::Empty);
    }

    #[test]
    fn test_error_text() {
        assert_eq!(error_text("API Error"), "Error: API Error");
    }
}
