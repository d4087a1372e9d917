//! Fetch lifecycle shared by the data views
//!
//! A view owns one [`ViewState`] per fetched collection and feeds it
//! [`FetchEvent`]s as the request progresses. Rendering is decided from the
//! derived [`ViewPhase`], never from the raw flags.

/// Loading/error/data state for one fetched collection
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// Progress of a single fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent<T> {
    Started,
    Succeeded(Vec<T>),
    Failed(String),
}

/// What a view should render for its current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Ready,
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition: consume the current state and an event, return the next.
    ///
    /// A failure keeps whatever data was already present.
    pub fn apply(self, event: FetchEvent<T>) -> Self {
        match event {
            FetchEvent::Started => Self {
                data: self.data,
                loading: true,
                error: None,
            },
            FetchEvent::Succeeded(data) => Self {
                data,
                loading: false,
                error: None,
            },
            FetchEvent::Failed(message) => Self {
                data: self.data,
                loading: false,
                error: Some(message),
            },
        }
    }

    /// In-place variant of [`ViewState::apply`] for view entities.
    pub fn dispatch(&mut self, event: FetchEvent<T>) {
        let current = std::mem::take(self);
        *self = current.apply(event);
    }

    pub fn phase(&self) -> ViewPhase<'_> {
        if self.loading && self.data.is_empty() {
            ViewPhase::Loading
        } else if let Some(message) = self.error.as_deref() {
            ViewPhase::Failed(message)
        } else if self.data.is_empty() {
            ViewPhase::Empty
        } else {
            ViewPhase::Ready
        }
    }

    pub fn items(&self) -> &[T] {
        &self.data
    }
}

/// Translate a client result into the terminal event of a fetch.
///
/// The underlying error is logged; views only ever show `user_message`.
pub fn settle<T, E: std::fmt::Display>(
    resource: &str,
    result: Result<Vec<T>, E>,
    user_message: &str,
) -> FetchEvent<T> {
    match result {
        Ok(items) => {
            tracing::debug!(resource, count = items.len(), "fetch succeeded");
            FetchEvent::Succeeded(items)
        }
        Err(e) => {
            tracing::warn!(resource, error = %e, "fetch failed");
            FetchEvent::Failed(user_message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_enters_loading() {
        let state = ViewState::<u32>::new().apply(FetchEvent::Started);
        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.phase(), ViewPhase::Loading);
    }

    #[test]
    fn test_success_stores_data() {
        let state = ViewState::new()
            .apply(FetchEvent::Started)
            .apply(FetchEvent::Succeeded(vec![1, 2, 3]));
        assert!(!state.loading);
        assert_eq!(state.data, vec![1, 2, 3]);
        assert_eq!(state.phase(), ViewPhase::Ready);
    }

    #[test]
    fn test_success_with_no_items_is_empty() {
        let state = ViewState::<u32>::new()
            .apply(FetchEvent::Started)
            .apply(FetchEvent::Succeeded(Vec::new()));
        assert_eq!(state.phase(), ViewPhase::Empty);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let state = ViewState::new()
            .apply(FetchEvent::Succeeded(vec![7]))
            .apply(FetchEvent::Started)
            .apply(FetchEvent::Failed("boom".to_string()));
        assert!(!state.loading);
        assert_eq!(state.data, vec![7]);
        assert_eq!(state.phase(), ViewPhase::Failed("boom"));
    }

    #[test]
    fn test_first_load_failure_leaves_data_empty() {
        let state = ViewState::<u32>::new()
            .apply(FetchEvent::Started)
            .apply(FetchEvent::Failed("offline".to_string()));
        assert!(state.data.is_empty());
        assert_eq!(state.phase(), ViewPhase::Failed("offline"));
    }

    #[test]
    fn test_refetch_with_data_renders_ready() {
        let state = ViewState::new()
            .apply(FetchEvent::Succeeded(vec![1]))
            .apply(FetchEvent::Started);
        assert!(state.loading);
        assert_eq!(state.phase(), ViewPhase::Ready);
    }

    #[test]
    fn test_dispatch_matches_apply() {
        let mut state = ViewState::new();
        state.dispatch(FetchEvent::Started);
        state.dispatch(FetchEvent::Succeeded(vec!["a"]));
        assert_eq!(state, ViewState::new().apply(FetchEvent::Succeeded(vec!["a"])));
    }

    #[test]
    fn test_settle_maps_error_to_user_message() {
        let event: FetchEvent<u8> = settle("kpis", Err("connection refused"), "Veri yüklenemedi.");
        assert_eq!(event, FetchEvent::Failed("Veri yüklenemedi.".to_string()));

        let event = settle::<u8, String>("kpis", Ok(vec![1]), "unused");
        assert_eq!(event, FetchEvent::Succeeded(vec![1]));
    }
}
