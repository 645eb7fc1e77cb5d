use uuid::Uuid;

pub type Callback<E> = Box<dyn FnMut(&E) + Send>;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
  pub fn new() -> SubscriptionId {
    SubscriptionId(Uuid::new_v4())
  }
}

/// Synchronous publisher of events. Subscribers are called in the order they subscribed.
pub struct NotificationBus<E> {
  subscribers: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Default for NotificationBus<E> {
  fn default() -> Self {
    NotificationBus {
      subscribers: Vec::new(),
    }
  }
}

impl<E> NotificationBus<E> {
  pub fn new() -> NotificationBus<E> {
    NotificationBus::default()
  }

  pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
  where
    F: FnMut(&E) + Send + 'static,
  {
    let id = SubscriptionId::new();
    let callback: Callback<E> = Box::new(callback);
    self.subscribers.push((id, callback));
    id
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    let len = self.subscribers.len();
    self.subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);
    self.subscribers.len() != len
  }

  pub fn publish(&mut self, event: &E) {
    for (_, callback) in self.subscribers.iter_mut() {
      callback(event);
    }
  }

  pub fn len(&self) -> usize {
    self.subscribers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.subscribers.is_empty()
  }
}
