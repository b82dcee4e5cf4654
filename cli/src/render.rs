//! Text rendering for the terminal surface

use taskify_core::diff::ListChange;
use taskify_core::task::{Task, TaskPriority};
use taskify_core::{OperationOutcome, SearchResults};

pub const HELP: &str = "\
commands:
  add <high|medium|low> <title>   add a task
  edit <id> <title>               rename a task
  priority <id> <level>           change priority
  done <id> / undo <id>           mark completed / not completed
  rm <id>                         delete a task (asks first)
  search [text]                   filter by title; no text clears
  list                            show every task
  help                            this text
  quit                            exit";

fn priority_marker(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "●",
        TaskPriority::Medium => "◐",
        TaskPriority::Low => "○",
    }
}

pub fn task_row(task: &Task) -> String {
    let check = if task.is_completed { "[x]" } else { "[ ]" };
    format!(
        "#{:<4} {} {} {:<6} {}",
        task.id,
        check,
        priority_marker(task.priority),
        task.priority,
        task.title
    )
}

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "  (no tasks)".to_string();
    }
    tasks
        .iter()
        .map(|task| format!("  {}", task_row(task)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per list change
pub fn change_line(change: &ListChange) -> String {
    match change {
        ListChange::Inserted { task, .. } => format!("+ {}", task_row(task)),
        ListChange::Changed { task, .. } => format!("~ {}", task_row(task)),
        ListChange::Removed { id, .. } => format!("- #{}", id),
        ListChange::Moved { id, from, to } => format!("↕ #{} moved {} → {}", id, from + 1, to + 1),
    }
}

pub fn outcome_line(outcome: &OperationOutcome) -> String {
    match outcome {
        OperationOutcome::Success => "✓ done".to_string(),
        OperationOutcome::Failure { reason } => format!("✗ {}", reason),
    }
}

pub fn search_block(results: &SearchResults) -> String {
    format!(
        "search {:?}: {} match{}\n{}",
        results.query,
        results.tasks.len(),
        if results.tasks.len() == 1 { "" } else { "es" },
        task_list(&results.tasks)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn saved(id: u64, title: &str, priority: TaskPriority) -> Task {
        let mut task = Task::new(title).with_priority(priority);
        task.id = id;
        task
    }

    #[test]
    fn test_task_row() {
        let task = saved(3, "Call bank", TaskPriority::High);
        assert_eq!(task_row(&task), "#3    [ ] ● High   Call bank");
        assert_eq!(
            task_row(&task.completed(true)),
            "#3    [x] ● High   Call bank"
        );
    }

    #[test]
    fn test_change_lines() {
        let milk = saved(1, "Buy milk", TaskPriority::Medium);
        assert_eq!(
            change_line(&ListChange::Inserted {
                index: 0,
                task: milk.clone()
            }),
            "+ #1    [ ] ◐ Medium Buy milk"
        );
        assert_eq!(change_line(&ListChange::Removed { index: 0, id: 1 }), "- #1");
        assert_eq!(
            change_line(&ListChange::Moved {
                from: 2,
                to: 0,
                id: 1
            }),
            "↕ #1 moved 3 → 1"
        );
    }

    #[test]
    fn test_outcome_lines() {
        assert_eq!(outcome_line(&OperationOutcome::Success), "✓ done");
        assert_eq!(
            outcome_line(&OperationOutcome::Failure {
                reason: "Failed to save task: disk full".to_string()
            }),
            "✗ Failed to save task: disk full"
        );
    }

    #[test]
    fn test_search_block() {
        let results = SearchResults {
            query: "milk".to_string(),
            tasks: Arc::new(vec![saved(1, "Buy milk", TaskPriority::Low)]),
        };
        assert_eq!(
            search_block(&results),
            "search \"milk\": 1 match\n  #1    [ ] ○ Low    Buy milk"
        );

        let empty = SearchResults {
            query: "xyz".to_string(),
            tasks: Arc::new(Vec::new()),
        };
        assert_eq!(search_block(&empty), "search \"xyz\": 0 matches\n  (no tasks)");
    }
}
