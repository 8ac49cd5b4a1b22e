//! Records the callbacks a slider fires.

use std::cell::RefCell;
use std::rc::Rc;

use slidekit_ui::SliderProps;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderEvent {
    DragStart,
    DragEnd,
    PrevSlide,
    NextSlide,
    TransitionEnd,
}

/// Shared log of [`SliderEvent`]s, in the order the slider fired them.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<SliderEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: SliderEvent) {
        log::trace!("recorded {event:?}");
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<SliderEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<SliderEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn count(&self, event: SliderEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|recorded| **recorded == event)
            .count()
    }

    /// Events recorded at or after position `from`.
    pub fn since(&self, from: usize) -> Vec<SliderEvent> {
        self.events.borrow().get(from..).map(<[_]>::to_vec).unwrap_or_default()
    }

    /// Wrap every callback in `props` so it is recorded before the original
    /// runs.
    pub fn instrument<C>(&self, props: SliderProps<C>) -> SliderProps<C> {
        let prev = Rc::clone(&props.prev_slide);
        let next = Rc::clone(&props.next_slide);
        let drag_start = Rc::clone(&props.on_drag_start);
        let drag_end = Rc::clone(&props.on_drag_end);
        let transition_end = Rc::clone(&props.on_transition_end);

        let recorder = self.clone();
        let props = props.on_prev_slide(move || {
            recorder.record(SliderEvent::PrevSlide);
            prev();
        });
        let recorder = self.clone();
        let props = props.on_next_slide(move || {
            recorder.record(SliderEvent::NextSlide);
            next();
        });
        let recorder = self.clone();
        let props = props.on_drag_start(move || {
            recorder.record(SliderEvent::DragStart);
            drag_start();
        });
        let recorder = self.clone();
        let props = props.on_drag_end(move || {
            recorder.record(SliderEvent::DragEnd);
            drag_end();
        });
        let recorder = self.clone();
        props.on_transition_end(move || {
            recorder.record(SliderEvent::TransitionEnd);
            transition_end();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn instrumented_callbacks_record_then_delegate() {
        let recorder = EventRecorder::new();
        let nexts = Rc::new(Cell::new(0));
        let props = {
            let nexts = Rc::clone(&nexts);
            SliderProps::new(vec![(); 3]).on_next_slide(move || nexts.set(nexts.get() + 1))
        };
        let props = recorder.instrument(props);

        (props.next_slide)();
        (props.on_drag_end)();
        assert_eq!(nexts.get(), 1);
        assert_eq!(
            recorder.events(),
            vec![SliderEvent::NextSlide, SliderEvent::DragEnd]
        );
        assert_eq!(recorder.since(1), vec![SliderEvent::DragEnd]);
        assert_eq!(recorder.since(5), Vec::new());
        assert_eq!(recorder.take().len(), 2);
        assert!(recorder.is_empty());
    }
}
