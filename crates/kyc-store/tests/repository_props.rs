use std::sync::Arc;
use std::thread;

use kyc_store::{InMemoryRepository, Repository};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shared_types::{Task, WorkStatus};

fn task(id: String) -> Task {
    Task {
        id: id.clone(),
        flow_id: "flow_1".to_string(),
        title: format!("Task {}", id),
        assignee_id: None,
        due_date: None,
        status: WorkStatus::ToDo,
        client_visible: true,
        created_at: "2024-01-15".to_string(),
    }
}

#[test]
fn concurrent_creates_are_all_kept() {
    let repo = Arc::new(InMemoryRepository::<Task>::new());
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                for n in 0..25 {
                    repo.create(task(format!("{}-{}", worker, n))).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(repo.len().unwrap(), 200);
}

proptest! {
    #[test]
    fn list_preserves_insertion_order(ids in prop::collection::hash_set("[a-z0-9]{1,8}", 0..20)) {
        let ids: Vec<String> = ids.into_iter().collect();
        let repo = InMemoryRepository::new();
        for id in &ids {
            repo.create(task(id.clone())).unwrap();
        }
        let listed: Vec<String> = repo.list().unwrap().into_iter().map(|t| t.id).collect();
        prop_assert_eq!(listed, ids);
    }

    #[test]
    fn delete_removes_only_target(ids in prop::collection::hash_set("[a-z]{1,6}", 1..12), pick in any::<prop::sample::Index>()) {
        let ids: Vec<String> = ids.into_iter().collect();
        let repo = InMemoryRepository::with_records(ids.iter().cloned().map(task));
        let target = &ids[pick.index(ids.len())];

        repo.delete(target).unwrap();
        let remaining: Vec<String> = repo.list().unwrap().into_iter().map(|t| t.id).collect();
        let expected: Vec<String> = ids.iter().filter(|id| *id != target).cloned().collect();
        prop_assert_eq!(remaining, expected);
        prop_assert!(repo.get(target).is_err());
    }
}
