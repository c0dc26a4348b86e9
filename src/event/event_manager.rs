use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryIter};

use crate::event::WindowEvent;

/// An event received by the window.
///
/// Unless [`inhibit`](Event::inhibit) is called, the event is handed to the
/// default handlers (camera, render-mode keys, screenshot) on the next frame.
pub struct Event<'a> {
    /// The event itself.
    pub value: WindowEvent,
    inhibited: bool,
    unhandled: &'a RefCell<Vec<WindowEvent>>,
}

impl<'a> Event<'a> {
    #[inline]
    fn new(value: WindowEvent, unhandled: &'a RefCell<Vec<WindowEvent>>) -> Event<'a> {
        Event {
            value,
            inhibited: false,
            unhandled,
        }
    }

    /// Prevents the default handlers from seeing this event.
    #[inline]
    pub fn inhibit(&mut self) {
        self.inhibited = true;
    }
}

impl Drop for Event<'_> {
    #[inline]
    fn drop(&mut self) {
        if !self.inhibited {
            self.unhandled.borrow_mut().push(self.value)
        }
    }
}

/// An iterator over the events received since the last frame.
pub struct Events<'a> {
    stream: TryIter<'a, WindowEvent>,
    unhandled: &'a RefCell<Vec<WindowEvent>>,
}

impl<'a> Iterator for Events<'a> {
    type Item = Event<'a>;

    #[inline]
    fn next(&mut self) -> Option<Event<'a>> {
        self.stream.next().map(|e| Event::new(e, self.unhandled))
    }
}

/// Gives access to the events of a window.
pub struct EventManager {
    events: Rc<Receiver<WindowEvent>>,
    unhandled: Rc<RefCell<Vec<WindowEvent>>>,
}

impl EventManager {
    /// Creates a new event manager over a window event stream.
    #[inline]
    pub fn new(
        events: Rc<Receiver<WindowEvent>>,
        unhandled: Rc<RefCell<Vec<WindowEvent>>>,
    ) -> EventManager {
        EventManager { events, unhandled }
    }

    /// Iterates through the events received since the last frame.
    #[inline]
    pub fn iter(&mut self) -> Events<'_> {
        Events {
            stream: self.events.try_iter(),
            unhandled: &self.unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Action, Key, Modifiers};
    use std::sync::mpsc;

    #[test]
    fn uninhibited_events_are_kept_for_default_handlers() {
        let (send, recv) = mpsc::channel();
        let unhandled = Rc::new(RefCell::new(Vec::new()));
        let mut manager = EventManager::new(Rc::new(recv), unhandled.clone());

        let w = WindowEvent::Key(Key::W, Action::Press, Modifiers::empty());
        send.send(w).unwrap();
        send.send(WindowEvent::Close).unwrap();

        for mut event in manager.iter() {
            if event.value == WindowEvent::Close {
                event.inhibit();
            }
        }

        assert_eq!(*unhandled.borrow(), vec![w]);
        assert!(manager.iter().next().is_none());
    }
}
