use std::collections::{HashSet, VecDeque};

use crate::solver::variable::Variable;

/// A FIFO worklist of ordered arcs with membership tracking, so an arc
/// queued again before being processed is only revised once.
pub(crate) struct WorkList {
    queue: VecDeque<(Variable, Variable)>,
    queue_members: HashSet<(Variable, Variable)>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queue_members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, arc: (Variable, Variable)) {
        if !self.queue_members.contains(&arc) {
            self.queue_members.insert(arc.clone());
            self.queue.push_back(arc);
        }
    }

    pub fn pop_front(&mut self) -> Option<(Variable, Variable)> {
        let arc = self.queue.pop_front()?;
        self.queue_members.remove(&arc);
        Some(arc)
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}
