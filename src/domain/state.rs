use crate::domain::ContentItem;

/// How a fetched item relates to what the poller has already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Nothing was seen before this item
    FirstRun,
    /// The item id differs from the last seen one
    Changed,
    /// Same id as last time
    Unchanged,
}

/// In-memory change detection state. Lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    last_seen_id: Option<String>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen_id(&self) -> Option<&str> {
        self.last_seen_id.as_deref()
    }

    /// Compare `item` against the last seen id and record it.
    ///
    /// Once an id has been recorded the state never goes back to unset.
    pub fn observe(&mut self, item: &ContentItem) -> Observation {
        let observation = match self.last_seen_id.as_deref() {
            None => Observation::FirstRun,
            Some(seen) if seen != item.id => Observation::Changed,
            Some(_) => Observation::Unchanged,
        };

        if observation != Observation::Unchanged {
            self.last_seen_id = Some(item.id.clone());
        }

        observation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_is_first_run() {
        let mut state = PollState::new();
        assert_eq!(state.last_seen_id(), None);
        assert_eq!(
            state.observe(&ContentItem::new("A", "a")),
            Observation::FirstRun
        );
        assert_eq!(state.last_seen_id(), Some("A"));
    }

    #[test]
    fn test_same_id_is_unchanged() {
        let mut state = PollState::new();
        state.observe(&ContentItem::new("A", "a"));
        assert_eq!(
            state.observe(&ContentItem::new("A", "renamed")),
            Observation::Unchanged
        );
        assert_eq!(state.last_seen_id(), Some("A"));
    }

    #[test]
    fn test_new_id_is_changed_and_recorded() {
        let mut state = PollState::new();
        state.observe(&ContentItem::new("A", "a"));
        assert_eq!(
            state.observe(&ContentItem::new("B", "b")),
            Observation::Changed
        );
        assert_eq!(state.last_seen_id(), Some("B"));
    }

    #[test]
    fn test_sequence_only_records_fetched_ids() {
        let mut state = PollState::new();
        let ids = ["A", "A", "B", "A", "C", "C"];
        let mut observations = Vec::new();

        for id in ids {
            observations.push(state.observe(&ContentItem::new(id, id)));
            assert_eq!(state.last_seen_id(), Some(id));
        }

        assert_eq!(
            observations,
            vec![
                Observation::FirstRun,
                Observation::Unchanged,
                Observation::Changed,
                Observation::Changed,
                Observation::Changed,
                Observation::Unchanged,
            ]
        );
    }
}
