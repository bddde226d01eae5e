use crate::domain::models::Task;
use chrono::Utc;

/// In-memory task list. Insertion order is stable; ids are max-existing + 1
/// so an id is never reused while its holder is still on the board.
#[derive(Debug, Default, Clone)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task. Text that is empty after trimming is silently
    /// rejected.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self
            .tasks
            .iter()
            .map(|task| task.id + 1)
            .max()
            .unwrap_or(0);
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
        });
        self.tasks.last()
    }

    /// Flips completion for the matching task; unknown ids are a no-op.
    pub fn toggle(&mut self, id: u64) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        Some(&*task)
    }

    /// Removes the matching task, reporting whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }
}
