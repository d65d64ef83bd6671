use std::sync::{Arc, Mutex};

/// Single-slot cell bridging the input event pump (producer) and an
/// interactive [`ActionSource`](crate::player::ActionSource) (consumer).
///
/// A post overwrites any unread value: only the latest click counts. The slot
/// is mutex-guarded so the pump can move to another thread without changing
/// the protocol.
#[derive(Clone, Default)]
pub struct ActionMailbox {
    slot: Arc<Mutex<Option<usize>>>,
}

impl ActionMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, action: usize) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(action);
        }
    }

    /// Take and clear the pending action, if any.
    pub fn try_take(&self) -> Option<usize> {
        self.slot.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_the_slot() {
        let mailbox = ActionMailbox::new();
        assert_eq!(mailbox.try_take(), None);
        mailbox.post(19);
        assert_eq!(mailbox.try_take(), Some(19));
        assert_eq!(mailbox.try_take(), None);
    }

    #[test]
    fn post_overwrites_unread_value() {
        let mailbox = ActionMailbox::new();
        mailbox.post(19);
        mailbox.post(26);
        assert_eq!(mailbox.try_take(), Some(26));
        assert_eq!(mailbox.try_take(), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let producer = ActionMailbox::new();
        let consumer = producer.clone();
        producer.post(44);
        assert_eq!(consumer.try_take(), Some(44));
        assert_eq!(producer.try_take(), None);
    }
}
