#[cfg(test)]
pub mod test {
    use std::sync::{Arc, Mutex};

    use crate::source::{self, Source};

    /// An in-memory source over literal pairs.
    pub fn values(pairs: &[(&str, &str)]) -> Source {
        source::map_source(pairs.iter().copied())
    }

    /// A source answering every key with whatever the returned cell holds.
    /// Swap the cell's contents to simulate the environment changing.
    pub fn switchable(initial: Option<&str>) -> (Arc<Mutex<Option<String>>>, Source) {
        let cell = Arc::new(Mutex::new(initial.map(str::to_string)));
        let reader = cell.clone();
        let source = source::from_fn(move |_| reader.lock().ok().and_then(|v| v.clone()));
        (cell, source)
    }

    /// The values the end-to-end tests run against.
    pub fn prefixed_env() -> Source {
        values(&[
            ("PREFIX_URL", "X"),
            ("PREFIX_SETTING_URL", "Y"),
            ("APP_SECRET_KEY", "app_secret"),
            ("CUSTOM_KEY_WHATEVER", "custom"),
            ("DATABASE_URL", "pg://db"),
        ])
    }

    #[test]
    fn switchable_tracks_cell() {
        let (cell, source) = switchable(None);
        assert_eq!(source("ANY"), None);
        *cell.lock().unwrap() = Some("v".into());
        assert_eq!(source("ANY").as_deref(), Some("v"));
    }
}
