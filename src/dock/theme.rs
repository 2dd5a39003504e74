/// Light/dark theme value, injected into chrome that needs it. Nothing in the
/// engine infers the theme from ambient style state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Explicit theme state with a subscribe/unsubscribe lifecycle. Subscribers
/// are notified on actual change only.
#[derive(Default)]
pub struct ThemeState {
    current: Option<Theme>,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(Theme) + Send>)>,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self {
            current: Some(theme),
            next_subscription: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> Option<Theme> {
        self.current
    }

    pub fn set(&mut self, theme: Theme) {
        if self.current == Some(theme) {
            return;
        }
        self.current = Some(theme);
        for (_, callback) in &mut self.subscribers {
            callback(theme);
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(Theme) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.saturating_add(1);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != id);
        self.subscribers.len() != before
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
