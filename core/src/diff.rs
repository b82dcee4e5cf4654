//! List reconciliation
//!
//! Turns two task list snapshots into an ordered edit script so a view can
//! update only the rows that changed. Items are matched by id; a matched
//! item whose fields differ is reported as changed.

use std::collections::HashSet;

use crate::task::{Task, TaskId};

/// One step of an edit script; indices refer to the list as edited so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    Removed { index: usize, id: TaskId },
    Inserted { index: usize, task: Task },
    Moved { from: usize, to: usize, id: TaskId },
    Changed { index: usize, task: Task },
}

/// Edit script that turns `old` into `new` when applied in order
pub fn reconcile(old: &[Task], new: &[Task]) -> Vec<ListChange> {
    let mut changes = Vec::new();
    let mut working: Vec<Task> = old.to_vec();

    let kept: HashSet<TaskId> = new.iter().map(|task| task.id).collect();
    for index in (0..working.len()).rev() {
        if !kept.contains(&working[index].id) {
            let removed = working.remove(index);
            changes.push(ListChange::Removed {
                index,
                id: removed.id,
            });
        }
    }

    for (index, target) in new.iter().enumerate() {
        let found = working[index..]
            .iter()
            .position(|task| task.id == target.id)
            .map(|offset| index + offset);

        match found {
            Some(from) => {
                if from != index {
                    let moved = working.remove(from);
                    working.insert(index, moved);
                    changes.push(ListChange::Moved {
                        from,
                        to: index,
                        id: target.id,
                    });
                }
                if working[index] != *target {
                    working[index] = target.clone();
                    changes.push(ListChange::Changed {
                        index,
                        task: target.clone(),
                    });
                }
            }
            None => {
                working.insert(index, target.clone());
                changes.push(ListChange::Inserted {
                    index,
                    task: target.clone(),
                });
            }
        }
    }

    changes
}

/// Apply an edit script produced by [`reconcile`]
pub fn apply(list: &mut Vec<Task>, changes: &[ListChange]) {
    for change in changes {
        match change {
            ListChange::Removed { index, .. } => {
                list.remove(*index);
            }
            ListChange::Inserted { index, task } => list.insert(*index, task.clone()),
            ListChange::Moved { from, to, .. } => {
                let moved = list.remove(*from);
                list.insert(*to, moved);
            }
            ListChange::Changed { index, task } => list[*index] = task.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPriority;

    fn task(id: TaskId, title: &str) -> Task {
        let mut task = Task::new(title);
        task.id = id;
        task
    }

    fn assert_reconciles(old: &[Task], new: &[Task]) -> Vec<ListChange> {
        let changes = reconcile(old, new);
        let mut edited = old.to_vec();
        apply(&mut edited, &changes);
        assert_eq!(edited, new);
        changes
    }

    #[test]
    fn test_identical_lists_need_no_changes() {
        let list = vec![task(1, "a"), task(2, "b")];
        assert!(reconcile(&list, &list).is_empty());
    }

    #[test]
    fn test_insert_into_empty_list() {
        let changes = assert_reconciles(&[], &[task(1, "Buy milk")]);
        assert_eq!(
            changes,
            vec![ListChange::Inserted {
                index: 0,
                task: task(1, "Buy milk")
            }]
        );
    }

    #[test]
    fn test_higher_priority_task_lands_on_top() {
        let milk = task(1, "Buy milk");
        let bank = task(2, "Call bank").with_priority(TaskPriority::High);

        let changes = assert_reconciles(&[milk.clone()], &[bank.clone(), milk]);
        assert_eq!(changes, vec![ListChange::Inserted { index: 0, task: bank }]);
    }

    #[test]
    fn test_completion_is_a_content_change() {
        let bank = task(2, "Call bank");
        let milk = task(1, "Buy milk");
        let done = milk.clone().completed(true);

        let changes = assert_reconciles(&[bank.clone(), milk], &[bank, done.clone()]);
        assert_eq!(changes, vec![ListChange::Changed { index: 1, task: done }]);
    }

    #[test]
    fn test_removal() {
        let changes = assert_reconciles(
            &[task(2, "Call bank"), task(1, "Buy milk")],
            &[task(1, "Buy milk")],
        );
        assert_eq!(changes, vec![ListChange::Removed { index: 0, id: 2 }]);
    }

    #[test]
    fn test_priority_change_moves_item() {
        let a = task(1, "a");
        let b = task(2, "b");
        let c = task(3, "c");
        let promoted = c.clone().with_priority(TaskPriority::High);

        let changes =
            assert_reconciles(&[a.clone(), b.clone(), c], &[promoted.clone(), a, b]);
        assert_eq!(
            changes,
            vec![
                ListChange::Moved {
                    from: 2,
                    to: 0,
                    id: 3
                },
                ListChange::Changed {
                    index: 0,
                    task: promoted
                },
            ]
        );
    }

    #[test]
    fn test_mixed_edits_reconcile() {
        let old = vec![task(1, "a"), task(2, "b"), task(3, "c"), task(4, "d")];
        let new = vec![
            task(4, "d"),
            task(5, "e"),
            task(2, "b edited"),
            task(1, "a"),
        ];
        assert_reconciles(&old, &new);
    }
}
