// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    program::BinaryProgram,
    solution::BinarySolution,
};

/// Aggregates several monitors and forwards every event to each of them.
/// The first monitor asking for termination wins.
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().collect::<Vec<_>>().join(", "))
            .finish()
    }
}

impl std::fmt::Display for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CompositeMonitor([{}])",
            self.names().collect::<Vec<_>>().join(", ")
        )
    }
}

impl Default for CompositeMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeMonitor<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn from_vec(monitors: Vec<Box<dyn SearchMonitor + 'a>>) -> Self {
        Self { monitors }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// The names of the contained monitors, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.monitors.iter().map(|m| m.name())
    }
}

impl<'a> FromIterator<Box<dyn SearchMonitor + 'a>> for CompositeMonitor<'a> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, program: &BinaryProgram) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(program);
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    fn on_solution_found(&mut self, solution: &BinarySolution) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{BinaryProgramBuilder, ObjectiveSense};
    use std::{cell::Cell, rc::Rc};

    #[derive(Clone)]
    struct Counting {
        name: &'static str,
        steps: Rc<Cell<u32>>,
        solutions: Rc<Cell<u32>>,
        entered: Rc<Cell<bool>>,
        exited: Rc<Cell<bool>>,
        stop_after: Option<u32>,
    }

    impl Counting {
        fn new(name: &'static str, stop_after: Option<u32>) -> Self {
            Self {
                name,
                steps: Rc::new(Cell::new(0)),
                solutions: Rc::new(Cell::new(0)),
                entered: Rc::new(Cell::new(false)),
                exited: Rc::new(Cell::new(false)),
                stop_after,
            }
        }
    }

    impl SearchMonitor for Counting {
        fn name(&self) -> &str {
            self.name
        }
        fn on_enter_search(&mut self, _program: &BinaryProgram) {
            self.entered.set(true);
        }
        fn on_exit_search(&mut self) {
            self.exited.set(true);
        }
        fn on_solution_found(&mut self, _solution: &BinarySolution) {
            self.solutions.set(self.solutions.get() + 1);
        }
        fn on_step(&mut self) {
            self.steps.set(self.steps.get() + 1);
        }
        fn search_command(&self) -> SearchCommand {
            match self.stop_after {
                Some(limit) if self.steps.get() >= limit => {
                    SearchCommand::Terminate(format!("{} stop", self.name))
                }
                _ => SearchCommand::Continue,
            }
        }
    }

    #[test]
    fn test_forwards_lifecycle_events_to_all_monitors() {
        let a = Counting::new("a", None);
        let b = Counting::new("b", None);
        let mut composite = CompositeMonitor::with_capacity(2);
        composite.add_monitor(a.clone());
        composite.add_monitor_boxed(Box::new(b.clone()));
        assert_eq!(composite.len(), 2);

        let program = BinaryProgramBuilder::new(ObjectiveSense::Maximize).build();
        composite.on_enter_search(&program);
        composite.on_step();
        composite.on_step();
        composite.on_solution_found(&BinarySolution::new(Vec::new(), 0.0));
        composite.on_exit_search();

        for m in [&a, &b] {
            assert!(m.entered.get());
            assert!(m.exited.get());
            assert_eq!(m.steps.get(), 2);
            assert_eq!(m.solutions.get(), 1);
        }
    }

    #[test]
    fn test_first_terminating_monitor_wins() {
        let composite: CompositeMonitor = vec![
            Box::new(Counting::new("never", None)) as Box<dyn SearchMonitor>,
            Box::new(Counting::new("first", Some(1))),
            Box::new(Counting::new("second", Some(1))),
        ]
        .into_iter()
        .collect();

        let mut composite = composite;
        assert_eq!(composite.search_command(), SearchCommand::Continue);
        composite.on_step();
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("first stop".to_string())
        );
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::default();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
        assert_eq!(composite.to_string(), "CompositeMonitor([])");
    }

    #[test]
    fn test_names_in_insertion_order() {
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(Counting::new("x", None));
        composite.add_monitor(Counting::new("y", None));
        assert_eq!(composite.names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(composite.to_string(), "CompositeMonitor([x, y])");
    }
}
