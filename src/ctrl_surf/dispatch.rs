use std::{collections::HashMap, fmt, hash::Hash, rc::Rc};

use super::Event;

pub type Handler<C> = Rc<dyn Fn(&mut C, &Event)>;
pub type Filter = Rc<dyn Fn(&Event) -> bool>;

struct Entry<C> {
    handler: Handler<C>,
    filter: Filter,
}

/// Routes each [`Event`] to the handler registered for its key.
///
/// The key is computed by the `extract` function given at construction.
/// Handlers get a mutable access to a context `C` owned by the caller,
/// e.g. the [`Surface`](crate::controller::Surface) to update.
pub struct Dispatcher<K, C> {
    extract: fn(&Event) -> K,
    map: HashMap<K, Entry<C>>,
}

impl<K, C> Dispatcher<K, C>
where
    K: Eq + Hash + fmt::Debug,
{
    pub fn new(extract: fn(&Event) -> K) -> Self {
        Self {
            extract,
            map: HashMap::new(),
        }
    }

    /// Associates `handler` to `key`, replacing any previous association.
    pub fn register(
        &mut self,
        key: K,
        handler: impl Fn(&mut C, &Event) + 'static,
    ) -> &mut Self {
        self.insert(key, Rc::new(handler), always())
    }

    /// Associates `handler` to `key`.
    ///
    /// Events for `key` rejected by `filter` are consumed
    /// without calling `handler`.
    pub fn register_filtered(
        &mut self,
        key: K,
        handler: impl Fn(&mut C, &Event) + 'static,
        filter: impl Fn(&Event) -> bool + 'static,
    ) -> &mut Self {
        self.insert(key, Rc::new(handler), Rc::new(filter))
    }

    pub fn register_for_many(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        handler: impl Fn(&mut C, &Event) + 'static,
    ) -> &mut Self {
        self.insert_many(keys, Rc::new(handler), always())
    }

    pub fn register_for_many_filtered(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        handler: impl Fn(&mut C, &Event) + 'static,
        filter: impl Fn(&Event) -> bool + 'static,
    ) -> &mut Self {
        self.insert_many(keys, Rc::new(handler), Rc::new(filter))
    }

    fn insert(&mut self, key: K, handler: Handler<C>, filter: Filter) -> &mut Self {
        if self.map.insert(key, Entry { handler, filter }).is_some() {
            log::trace!("Dispatcher: replaced handler");
        }

        self
    }

    fn insert_many(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        handler: Handler<C>,
        filter: Filter,
    ) -> &mut Self {
        for key in keys {
            self.insert(key, handler.clone(), filter.clone());
        }

        self
    }

    /// Dispatches `event` to the handler registered for its key.
    ///
    /// Returns `false` if no handler is registered for the key, in which
    /// case `event.handled` is left untouched. Otherwise `event.handled`
    /// is set and `true` is returned, even if the filter dropped the event.
    pub fn dispatch(&self, ctx: &mut C, event: &mut Event) -> bool {
        let key = (self.extract)(event);

        let entry = match self.map.get(&key) {
            Some(entry) => entry,
            None => {
                log::debug!("No handler found for {key:?}: {}", event.msg().display());
                return false;
            }
        };

        event.handled = true;

        if (entry.filter)(event) {
            (entry.handler)(ctx, event);
        } else {
            log::debug!("Event {} dropped by filter", event.msg().display());
        }

        true
    }

}

fn always() -> Filter {
    Rc::new(|_: &Event| true)
}
