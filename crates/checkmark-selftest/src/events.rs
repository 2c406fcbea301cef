//! Event descriptor matching, and the `Events` suite that covers it

use checkmark::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: &'static str,
    pub source: &'static str,
}

/// Selects events by kind and, optionally, by source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    kind: Option<&'static str>,
    source: Option<&'static str>,
}

impl Descriptor {
    /// Matches every event
    pub fn any() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    /// Number of constrained fields; more specific descriptors win
    pub fn specificity(&self) -> usize {
        usize::from(self.kind.is_some()) + usize::from(self.source.is_some())
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.kind.map_or(true, |k| k == event.kind) && self.source.map_or(true, |s| s == event.source)
    }
}

/// Descriptors and a log of events shared by the matching tests
pub struct Dispatch {
    pub descriptors: Vec<Descriptor>,
    pub events: Vec<Event>,
}

impl Default for Dispatch {
    fn default() -> Self {
        Self {
            descriptors: vec![
                Descriptor::any(),
                Descriptor::any().kind("click"),
                Descriptor::any().kind("click").source("button"),
            ],
            events: vec![
                Event {
                    kind: "click",
                    source: "button",
                },
                Event {
                    kind: "click",
                    source: "canvas",
                },
                Event {
                    kind: "key",
                    source: "input",
                },
            ],
        }
    }
}

impl Dispatch {
    /// The most specific descriptor matching `event`
    pub fn best_match(&self, event: &Event) -> Option<&Descriptor> {
        self.descriptors
            .iter()
            .filter(|d| d.matches(event))
            .max_by_key(|d| d.specificity())
    }
}

suite! {
    Events {
        test_case! {
            fn Constructor(t) {
                let descriptor = Descriptor::any();
                check_equal!(t, descriptor.specificity(), 0);
                check!(t, descriptor == Descriptor::default());
            }
        }

        test_case! {
            fn DescriptorSpecificity(t) {
                let specificity: Vec<usize> = Dispatch::default()
                    .descriptors
                    .iter()
                    .map(Descriptor::specificity)
                    .collect();
                check_array_equal!(t, specificity, [0, 1, 2], 3);
            }
        }

        test_fixture! {
            fn EventMatching(fx: Dispatch, t) {
                let button = fx.events[0].clone();
                let canvas = fx.events[1].clone();
                let key = fx.events[2].clone();

                check_equal!(t, fx.best_match(&button).map(Descriptor::specificity), Some(2));
                check_equal!(t, fx.best_match(&canvas).map(Descriptor::specificity), Some(1));
                check_equal!(t, fx.best_match(&key).map(Descriptor::specificity), Some(0));

                fx.descriptors.clear();
                check!(t, fx.best_match(&key).is_none());
            }
        }
    }
}
