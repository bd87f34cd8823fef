// src/watch/event_handler.rs

//! Turning raw `notify` events into change notifications.

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

use crate::engine::{ChangeKind, ChangeNotification};
use crate::watch::target::WatchTarget;

/// Map a notify event kind onto the change kinds we react to.
///
/// Access, `Any` and `Other` events carry no content change and are dropped.
/// So is the old-name half of a split rename; its `To` half reports the file.
pub fn change_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => None,
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Renamed),
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        EventKind::Remove(_) => Some(ChangeKind::Deleted),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}

/// Extract the notifications for `target` from one notify event.
///
/// A rename reports the new name only (the last path of the event). Every
/// other kind yields one notification per matching path.
pub fn notifications_for(target: &WatchTarget, event: &Event) -> Vec<ChangeNotification> {
    let Some(kind) = change_kind(&event.kind) else {
        return Vec::new();
    };

    let paths = match kind {
        ChangeKind::Renamed => &event.paths[event.paths.len().saturating_sub(1)..],
        _ => &event.paths[..],
    };

    paths
        .iter()
        .filter(|p| target.matches(p))
        .map(|p| ChangeNotification::new(p.clone(), kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use notify::event::{AccessKind, CreateKind, DataChange, RemoveKind};
    use std::path::Path;

    fn target() -> WatchTarget {
        let fs = MockFileSystem::new();
        fs.add_dir("/proj");
        WatchTarget::resolve("/proj/*.txt", Path::new("/"), &fs).unwrap()
    }

    #[test]
    fn maps_kinds() {
        assert_eq!(
            change_kind(&EventKind::Create(CreateKind::File)),
            Some(ChangeKind::Created)
        );
        assert_eq!(
            change_kind(&EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            Some(ChangeKind::Modified)
        );
        assert_eq!(
            change_kind(&EventKind::Modify(ModifyKind::Name(RenameMode::Both))),
            Some(ChangeKind::Renamed)
        );
        assert_eq!(
            change_kind(&EventKind::Remove(RemoveKind::File)),
            Some(ChangeKind::Deleted)
        );
        assert_eq!(change_kind(&EventKind::Access(AccessKind::Any)), None);
    }

    #[test]
    fn rename_reports_new_name() {
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path("/proj/old.txt".into())
            .add_path("/proj/new.txt".into());
        let out = notifications_for(&target(), &event);
        assert_eq!(
            out,
            vec![ChangeNotification::new("/proj/new.txt", ChangeKind::Renamed)]
        );
    }

    #[test]
    fn old_name_half_of_split_rename_is_ignored() {
        let from = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
            .add_path("/proj/a.txt".into());
        assert!(notifications_for(&target(), &from).is_empty());

        let to = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
            .add_path("/proj/b.txt".into());
        assert_eq!(
            notifications_for(&target(), &to),
            vec![ChangeNotification::new("/proj/b.txt", ChangeKind::Renamed)]
        );
    }

    #[test]
    fn filters_paths_outside_target() {
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Any)))
            .add_path("/proj/a.txt".into())
            .add_path("/proj/a.rs".into())
            .add_path("/proj/sub/b.txt".into());
        let out = notifications_for(&target(), &event);
        assert_eq!(
            out,
            vec![ChangeNotification::new("/proj/a.txt", ChangeKind::Modified)]
        );
    }

    #[test]
    fn access_events_are_ignored() {
        let event = Event::new(EventKind::Access(AccessKind::Any)).add_path("/proj/a.txt".into());
        assert!(notifications_for(&target(), &event).is_empty());
    }
}
